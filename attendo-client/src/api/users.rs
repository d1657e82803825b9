//! `/users` roster endpoints

use serde::Serialize;
use shared::models::{BulkUserRequest, BulkUserRow, User, UserCreate, UserRole, UserUpdate};

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::AttendoClient;

/// Which roster a management page works on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterMode {
    Employee,
    Admin,
}

impl RosterMode {
    /// Role filter sent as `?role=`
    pub fn role(&self) -> UserRole {
        match self {
            Self::Employee => UserRole::Employee,
            Self::Admin => UserRole::Admin,
        }
    }

    /// Singular label used in messages ("Employee", "Admin")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Employee => "Employee",
            Self::Admin => "Admin",
        }
    }

    /// Export file name (`employees.csv`, `admins.csv`)
    pub fn export_file_name(&self) -> &'static str {
        match self {
            Self::Employee => "employees.csv",
            Self::Admin => "admins.csv",
        }
    }

    /// Bulk upload is offered for the employee roster only
    pub fn supports_bulk_upload(&self) -> bool {
        matches!(self, Self::Employee)
    }
}

/// Roles an actor may assign when creating or editing users
pub fn assignable_roles(actor: UserRole) -> &'static [UserRole] {
    match actor {
        UserRole::SuperAdmin => &[UserRole::Employee, UserRole::Admin],
        UserRole::Admin => &[UserRole::Employee],
        UserRole::Employee => &[],
    }
}

#[derive(Serialize)]
struct RoleQuery {
    role: UserRole,
}

impl<C: HttpClient> AttendoClient<C> {
    /// List users of one roster
    pub async fn list_users(&self, mode: RosterMode) -> ClientResult<Vec<User>> {
        self.fetch_with_query("/users", &RoleQuery { role: mode.role() }).await
    }

    /// List every user visible to the caller
    pub async fn all_users(&self) -> ClientResult<Vec<User>> {
        self.fetch("/users").await
    }

    pub async fn create_user(&self, user: &UserCreate) -> ClientResult<()> {
        self.ensure_can_assign(user.role)?;
        self.send_post("/users", user).await
    }

    pub async fn update_user(&self, id: &str, update: &UserUpdate) -> ClientResult<()> {
        if let Some(role) = update.role {
            self.ensure_can_assign(role)?;
        }
        self.send_put(&format!("/users/{id}"), update).await
    }

    pub async fn delete_user(&self, id: &str) -> ClientResult<()> {
        self.send_delete(&format!("/users/{id}")).await
    }

    /// Add many employees at once
    pub async fn bulk_add_users(&self, rows: Vec<BulkUserRow>) -> ClientResult<()> {
        if rows.is_empty() {
            return Err(ClientError::Validation("No rows to upload.".into()));
        }
        tracing::info!(count = rows.len(), "bulk user upload");
        self.send_post("/users/bulk", &BulkUserRequest { employees: rows }).await
    }

    fn ensure_can_assign(&self, role: UserRole) -> ClientResult<()> {
        let actor = self.session.user().map(|u| u.role).ok_or(ClientError::NotLoggedIn)?;
        if !assignable_roles(actor).contains(&role) {
            return Err(ClientError::Forbidden(format!(
                "{} may not assign role {}",
                actor.label(),
                role.label()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assignable_roles() {
        assert_eq!(assignable_roles(UserRole::SuperAdmin), &[UserRole::Employee, UserRole::Admin]);
        assert_eq!(assignable_roles(UserRole::Admin), &[UserRole::Employee]);
        assert!(assignable_roles(UserRole::Employee).is_empty());
    }

    #[test]
    fn test_roster_mode() {
        assert_eq!(RosterMode::Admin.role(), UserRole::Admin);
        assert_eq!(RosterMode::Employee.export_file_name(), "employees.csv");
        assert!(!RosterMode::Admin.supports_bulk_upload());
    }
}
