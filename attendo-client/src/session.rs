//! Session context
//!
//! Replaces ambient auth globals with an explicit object: login populates
//! it, logout clears it, and every API call reports its 401 outcome here.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use shared::models::User;
use tokio::sync::watch;

// ============================================================================
// Token storage
// ============================================================================

/// Persistent storage for the bearer token
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> std::io::Result<()>;
    fn clear(&self) -> std::io::Result<()>;
}

/// Token kept in a single file under the work directory
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let token = std::fs::read_to_string(&self.path).ok()?;
        let token = token.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    fn save(&self, token: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)
    }

    fn clear(&self) -> std::io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

/// Process-local token storage
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().ok().and_then(|t| t.clone())
    }

    fn save(&self, token: &str) -> std::io::Result<()> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
        Ok(())
    }

    fn clear(&self) -> std::io::Result<()> {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
        Ok(())
    }
}

// ============================================================================
// Session Data
// ============================================================================

/// Session data stored in memory during the client's lifecycle.
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    /// Bearer token for HTTP API authentication.
    pub token: Option<String>,
    /// Current user information after login.
    pub user: Option<User>,
}

impl SessionData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the token and user after a successful login.
    pub fn set_login(&mut self, token: String, user: User) {
        self.token = Some(token);
        self.user = Some(user);
    }

    /// Clears the session data on logout.
    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }
}

// ============================================================================
// Session handle
// ============================================================================

struct SessionInner {
    data: RwLock<SessionData>,
    unauthorized_streak: AtomicU32,
    threshold: u32,
    state_tx: watch::Sender<bool>,
}

/// Shared session handle
///
/// Cheap to clone; pollers and views hold clones and observe logout via
/// [`Session::subscribe`].
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .field("unauthorized_streak", &self.unauthorized_streak())
            .finish()
    }
}

impl Session {
    /// Create an empty session that logs out after `threshold` consecutive 401s
    pub fn new(threshold: u32) -> Self {
        let (state_tx, _) = watch::channel(false);
        Self {
            inner: Arc::new(SessionInner {
                data: RwLock::new(SessionData::new()),
                unauthorized_streak: AtomicU32::new(0),
                threshold: threshold.max(1),
                state_tx,
            }),
        }
    }

    /// Populate the session after login or token restore
    pub fn begin(&self, token: String, user: User) {
        tracing::info!(user = %user.name, role = %user.role, "session started");
        self.write(|data| data.set_login(token, user));
        self.inner.unauthorized_streak.store(0, Ordering::SeqCst);
        self.inner.state_tx.send_replace(true);
    }

    /// Tear the session down
    pub fn end(&self) {
        self.write(SessionData::clear);
        self.inner.unauthorized_streak.store(0, Ordering::SeqCst);
        self.inner.state_tx.send_replace(false);
        tracing::info!("session ended");
    }

    /// Replace the cached user after a profile refresh
    pub fn update_user(&self, user: User) {
        self.write(|data| data.user = Some(user));
    }

    pub fn user(&self) -> Option<User> {
        self.read(|data| data.user.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.read(|data| data.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read(SessionData::is_authenticated)
    }

    /// Reset the 401 streak after a successful call
    pub fn record_success(&self) {
        self.inner.unauthorized_streak.store(0, Ordering::SeqCst);
    }

    /// Count a 401; returns `true` once the streak reaches the threshold
    pub fn record_unauthorized(&self) -> bool {
        let streak = self.inner.unauthorized_streak.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::warn!(streak, threshold = self.inner.threshold, "unauthorized response");
        streak >= self.inner.threshold
    }

    pub fn unauthorized_streak(&self) -> u32 {
        self.inner.unauthorized_streak.load(Ordering::SeqCst)
    }

    /// Watch authentication state (`true` while logged in)
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.state_tx.subscribe()
    }

    fn read<R>(&self, f: impl FnOnce(&SessionData) -> R) -> R {
        match self.inner.data.read() {
            Ok(guard) => f(&guard),
            Err(poisoned) => f(&poisoned.into_inner()),
        }
    }

    fn write(&self, f: impl FnOnce(&mut SessionData)) {
        match self.inner.data.write() {
            Ok(mut guard) => f(&mut guard),
            Err(poisoned) => f(&mut poisoned.into_inner()),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(crate::config::UNAUTHORIZED_LOGOUT_THRESHOLD)
    }
}
