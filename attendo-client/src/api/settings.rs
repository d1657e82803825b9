//! `/settings` and `/company-settings` endpoints

use shared::models::{CompanySettings, Settings, UserRole};

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use crate::AttendoClient;

impl<C: HttpClient> AttendoClient<C> {
    pub async fn settings(&self) -> ClientResult<Settings> {
        self.require_role(&[UserRole::Admin, UserRole::SuperAdmin])?;
        self.fetch("/settings").await
    }

    pub async fn save_settings(&self, settings: &Settings) -> ClientResult<()> {
        self.require_role(&[UserRole::Admin, UserRole::SuperAdmin])?;
        self.send_put("/settings", settings).await
    }

    pub async fn company_settings(&self) -> ClientResult<CompanySettings> {
        self.require_role(&[UserRole::SuperAdmin])?;
        self.fetch("/company-settings").await
    }

    pub async fn save_company_settings(&self, settings: &CompanySettings) -> ClientResult<()> {
        self.require_role(&[UserRole::SuperAdmin])?;
        self.send_put("/company-settings", settings).await
    }

    fn require_role(&self, allowed: &[UserRole]) -> ClientResult<()> {
        let role = self.session.user().map(|u| u.role).ok_or(ClientError::NotLoggedIn)?;
        if allowed.contains(&role) {
            Ok(())
        } else {
            Err(ClientError::Forbidden("Not Authorized".into()))
        }
    }
}
