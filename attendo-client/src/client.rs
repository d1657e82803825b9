//! Core client definition.
//!
//! `AttendoClient` bundles the HTTP transport, the session context and the
//! token store. Endpoint methods are implemented per resource under
//! [`crate::api`].

use std::sync::Arc;

use serde::de::DeserializeOwned;
use shared::ApiResponse;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::http::{HttpClient, NetworkHttpClient};
use crate::session::{FileTokenStore, Session, TokenStore};

/// A typed client for the Attendo HR backend.
///
/// # Example
///
/// ```no_run
/// use attendo_client::{AttendoClient, ClientConfig};
///
/// # async fn example() -> Result<(), attendo_client::ClientError> {
/// let client = AttendoClient::connect(ClientConfig::from_env())?;
/// let user = client.login("ada@example.com", "secret").await?;
/// let status = client.attendance_status().await?;
/// println!("{} is {}", user.name, status.status);
/// client.logout()?;
/// # Ok(())
/// # }
/// ```
pub struct AttendoClient<C: HttpClient = NetworkHttpClient> {
    pub(crate) http: C,
    pub(crate) session: Session,
    pub(crate) store: Arc<dyn TokenStore>,
    pub(crate) config: ClientConfig,
}

impl AttendoClient<NetworkHttpClient> {
    /// Build a network client with a file-backed token store
    pub fn connect(config: ClientConfig) -> ClientResult<Self> {
        let http = NetworkHttpClient::new(&config)?;
        let store = Arc::new(FileTokenStore::new(config.token_path()));
        Ok(Self::with_parts(http, store, config))
    }
}

impl<C: HttpClient> AttendoClient<C> {
    /// Assemble a client from an arbitrary transport and token store
    pub fn with_parts(http: C, store: Arc<dyn TokenStore>, config: ClientConfig) -> Self {
        let session = Session::new(config.unauthorized_threshold);
        Self {
            http,
            session,
            store,
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// Full logout: clear the transport token, the stored token and the session
    pub fn logout(&self) -> ClientResult<()> {
        self.http.set_token(None);
        self.session.end();
        self.store.clear()?;
        Ok(())
    }

    /// Route a call outcome through the session's 401 accounting
    pub(crate) fn observe<T>(&self, result: ClientResult<T>) -> ClientResult<T> {
        match &result {
            Ok(_) => self.session.record_success(),
            Err(ClientError::Unauthorized) => {
                if self.session.record_unauthorized() {
                    tracing::warn!("repeated unauthorized responses, logging out");
                    if let Err(e) = self.logout() {
                        tracing::error!("failed to clear stored token: {e}");
                    }
                }
            }
            Err(_) => {}
        }
        result
    }

    fn require_token(&self) -> ClientResult<()> {
        if self.http.token().is_none() {
            return Err(ClientError::NotLoggedIn);
        }
        Ok(())
    }

    // ========== Envelope helpers ==========

    pub(crate) async fn fetch<T: DeserializeOwned + Send>(&self, path: &str) -> ClientResult<T> {
        self.require_token()?;
        let result = self.http.get::<ApiResponse<T>>(path).await;
        self.observe(result).map(ApiResponse::into_data)
    }

    pub(crate) async fn fetch_with_query<T, Q>(&self, path: &str, query: &Q) -> ClientResult<T>
    where
        T: DeserializeOwned + Send,
        Q: serde::Serialize + Sync,
    {
        self.require_token()?;
        let result = self.http.get_with_query::<ApiResponse<T>, Q>(path, query).await;
        self.observe(result).map(ApiResponse::into_data)
    }

    /// POST and discard the response body
    pub(crate) async fn send_post<B: serde::Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<()> {
        self.require_token()?;
        let result = self.http.post::<serde_json::Value, B>(path, body).await;
        self.observe(result).map(|_| ())
    }

    /// PUT and discard the response body
    pub(crate) async fn send_put<B: serde::Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<()> {
        self.require_token()?;
        let result = self.http.put::<serde_json::Value, B>(path, body).await;
        self.observe(result).map(|_| ())
    }

    pub(crate) async fn send_put_empty(&self, path: &str) -> ClientResult<()> {
        self.require_token()?;
        let result = self.http.put_empty::<serde_json::Value>(path).await;
        self.observe(result).map(|_| ())
    }

    pub(crate) async fn send_delete(&self, path: &str) -> ClientResult<()> {
        self.require_token()?;
        let result = self.http.delete::<serde_json::Value>(path).await;
        self.observe(result).map(|_| ())
    }
}
