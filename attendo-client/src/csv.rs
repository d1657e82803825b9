//! CSV export and bulk roster import

use std::path::{Path, PathBuf};

use rand::Rng;
use serde_json::Value;
use shared::models::BulkUserRow;
use thiserror::Error;

/// One exported row: ordered `(column, value)` pairs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvRecord {
    fields: Vec<(String, Value)>,
}

impl CsvRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }
}

fn render_cell(value: Option<&Value>) -> String {
    let cell = match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        // nested values are written as JSON
        Some(v) => v.to_string(),
    };
    let cell = cell.replace('"', "\"\"");
    if cell.contains(['"', ',', '\n']) {
        format!("\"{cell}\"")
    } else {
        cell
    }
}

/// Serialize records to CSV text
///
/// The header is the first record's keys in order. Rows are joined with
/// `\n` and there is no trailing newline; no records yields `""`.
pub fn to_csv(records: &[CsvRecord]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };
    let headers: Vec<&str> = first.keys().collect();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(headers.join(","));
    for record in records {
        let row: Vec<String> = headers.iter().map(|h| render_cell(record.get(h))).collect();
        lines.push(row.join(","));
    }
    lines.join("\n")
}

/// Write records as CSV into `dir/file_name`, returning the full path
pub async fn export_to_file(records: &[CsvRecord], dir: &Path, file_name: &str) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(file_name);
    tokio::fs::write(&path, to_csv(records)).await?;
    tracing::info!(path = %path.display(), rows = records.len(), "exported csv");
    Ok(path)
}

// ============================================================================
// Bulk import
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("The file contains no employee rows.")]
    NoRows,
    #[error("Row {line}: missing {field}")]
    MissingField { line: usize, field: &'static str },
}

/// Random `EMP` id in `EMP1000..=EMP9999`
pub fn generate_employee_id<R: Rng>(rng: &mut R) -> String {
    format!("EMP{}", rng.gen_range(1000..=9999))
}

/// Parse roster CSV with columns Name, Email, Role, Department, Phone
///
/// The first line is a header and is dropped. Blank lines are skipped.
/// Cells are split on `,` without quoting support.
pub fn parse_bulk_users(text: &str) -> Result<Vec<BulkUserRow>, ImportError> {
    parse_bulk_users_with(text, &mut rand::thread_rng())
}

pub fn parse_bulk_users_with<R: Rng>(text: &str, rng: &mut R) -> Result<Vec<BulkUserRow>, ImportError> {
    let mut rows = Vec::new();
    for (idx, line) in text.split('\n').enumerate().skip(1) {
        if line.trim().is_empty() {
            continue;
        }
        let mut cells = line.split(',').map(str::trim);
        let mut next = || cells.next().unwrap_or_default().to_string();
        let row = BulkUserRow {
            name: next(),
            email: next(),
            role: next(),
            department: next(),
            phone: next(),
            employee_id: generate_employee_id(rng),
        };
        // 1-based file line for messages
        let line = idx + 1;
        if row.name.is_empty() {
            return Err(ImportError::MissingField { line, field: "name" });
        }
        if row.email.is_empty() {
            return Err(ImportError::MissingField { line, field: "email" });
        }
        rows.push(row);
    }
    if rows.is_empty() {
        return Err(ImportError::NoRows);
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    #[test]
    fn test_quotes_cells_with_commas() {
        let records = vec![CsvRecord::new().field("a", 1).field("b", "x,y")];
        assert_eq!(to_csv(&records), "a,b\n1,\"x,y\"");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(to_csv(&[]), "");
    }

    #[test]
    fn test_escaping_and_nulls() {
        let records = vec![
            CsvRecord::new()
                .field("name", "Ann \"Nan\" Lee")
                .field("note", Value::Null)
                .field("tags", json!(["a", "b"]))
                .field("multi", "line1\nline2"),
        ];
        assert_eq!(
            to_csv(&records),
            "name,note,tags,multi\n\"Ann \"\"Nan\"\" Lee\",,\"[\"\"a\"\",\"\"b\"\"]\",\"line1\nline2\""
        );
    }

    #[test]
    fn test_header_follows_first_record() {
        let records = vec![
            CsvRecord::new().field("x", 1).field("y", 2),
            CsvRecord::new().field("y", 4).field("z", 9),
        ];
        // missing key renders empty, extra key ignored
        assert_eq!(to_csv(&records), "x,y\n1,2\n,4");
    }

    #[test]
    fn test_float_and_bool_cells() {
        let records = vec![CsvRecord::new().field("h", 7.5).field("ok", true)];
        assert_eq!(to_csv(&records), "h,ok\n7.5,true");
    }

    #[tokio::test]
    async fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![CsvRecord::new().field("ID", "EMP1001")];
        let path = export_to_file(&records, dir.path(), "employees.csv").await.unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "ID\nEMP1001");
    }

    #[test]
    fn test_bulk_import() {
        let text = "Name,Email,Role,Department,Phone\n Ann , ann@x.io ,EMPLOYEE,IT, 555\n\n  \nBob,bob@x.io,EMPLOYEE,HR,\r\n";
        let mut rng = StdRng::seed_from_u64(7);
        let rows = parse_bulk_users_with(text, &mut rng).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Ann");
        assert_eq!(rows[0].email, "ann@x.io");
        assert_eq!(rows[0].phone, "555");
        assert_eq!(rows[1].department, "HR");
        assert_eq!(rows[1].phone, "");
        for row in &rows {
            let n: u32 = row.employee_id.strip_prefix("EMP").unwrap().parse().unwrap();
            assert!((1000..=9999).contains(&n));
        }
    }

    #[test]
    fn test_bulk_import_errors() {
        assert_eq!(parse_bulk_users("Name,Email\n"), Err(ImportError::NoRows));
        assert_eq!(
            parse_bulk_users("Name,Email\nAnn,ann@x.io\nBob\n"),
            Err(ImportError::MissingField { line: 3, field: "email" })
        );
    }
}
