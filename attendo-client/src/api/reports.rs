//! `/reports` endpoints

use shared::models::{AttendanceRecord, ReportBundle, ReportStatCard};

use crate::error::ClientResult;
use crate::http::HttpClient;
use crate::AttendoClient;

impl<C: HttpClient> AttendoClient<C> {
    pub async fn report_stats(&self) -> ClientResult<Vec<ReportStatCard>> {
        self.fetch("/reports/stats").await
    }

    pub async fn attendance_chart(&self) -> ClientResult<serde_json::Value> {
        self.fetch("/reports/attendance-chart").await
    }

    pub async fn attendance_records(&self) -> ClientResult<Vec<AttendanceRecord>> {
        self.fetch("/reports/attendance-records").await
    }

    /// Stats, chart and records fetched together
    pub async fn report_bundle(&self) -> ClientResult<ReportBundle> {
        let (stats, chart, records) = tokio::try_join!(
            self.report_stats(),
            self.attendance_chart(),
            self.attendance_records()
        )?;
        Ok(ReportBundle { stats, chart, records })
    }
}
