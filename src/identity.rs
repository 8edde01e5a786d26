// Identity collaborator: the login/register/logout/session capability the
// marketplace calls, plus a mock provider and the local session file.

use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Missing required field: {0}")]
    MissingRequiredField(&'static str),

    #[error("An account already exists for {0}")]
    AlreadyRegistered(String),

    #[error("Unknown session")]
    UnknownSession,

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParseError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone)]
pub struct IdentityConfig {
    pub simulated_latency_ms: u64,
    // Where the signed-in session is kept between runs; None keeps it in memory only
    pub session_path: Option<PathBuf>,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            simulated_latency_ms: 1000,
            session_path: None,
        }
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    async fn register(&self, name: &str, email: &str, password: &str)
        -> Result<Session, AuthError>;

    async fn logout(&self, token: &str) -> Result<(), AuthError>;

    // None when the token is unknown or was logged out
    async fn get_session(&self, token: &str) -> Option<Session>;
}

// Current session persisted as JSON, the way a browser keeps it in local storage
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn save(&self, session: &Session) -> Result<(), AuthError> {
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, json)?;
        debug!("Saved session for {} to {}", session.user.id, self.path.display());
        Ok(())
    }

    pub fn load(&self) -> Result<Option<Session>, AuthError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AuthError::IoError(e)),
        }
    }

    pub fn clear(&self) -> Result<(), AuthError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::IoError(e)),
        }
    }
}

struct Account {
    password: String,
    user: User,
}

// Stand-in for a real identity provider, holding accounts in memory
pub struct MockIdentityProvider {
    config: IdentityConfig,
    accounts: DashMap<String, Account>,
    sessions: DashMap<String, Session>,
    session_store: Option<SessionStore>,
}

impl MockIdentityProvider {
    pub fn new(config: IdentityConfig) -> Self {
        let session_store = config.session_path.clone().map(SessionStore::new);
        Self {
            config,
            accounts: DashMap::new(),
            sessions: DashMap::new(),
            session_store,
        }
    }

    // Bring back the session saved by an earlier run, if any
    pub fn restore(&self) -> Result<Option<Session>, AuthError> {
        let Some(store) = &self.session_store else {
            return Ok(None);
        };

        let restored = store.load()?;
        if let Some(session) = &restored {
            info!("Restored session for {}", session.user.id);
            self.sessions.insert(session.token.clone(), session.clone());
        }
        Ok(restored)
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    async fn simulate_latency(&self) {
        if self.config.simulated_latency_ms > 0 {
            sleep(Duration::from_millis(self.config.simulated_latency_ms)).await;
        }
    }

    fn start_session(&self, user: User) -> Result<Session, AuthError> {
        let session = Session {
            token: format!("session_{:016x}", rand::random::<u64>()),
            user,
        };
        // Persist first; a session that failed to save is never handed out
        if let Some(store) = &self.session_store {
            store.save(&session)?;
        }
        self.sessions.insert(session.token.clone(), session.clone());
        Ok(session)
    }
}

fn account_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn required<'a>(value: &'a str, field: &'static str) -> Result<&'a str, AuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(AuthError::MissingRequiredField(field))
    } else {
        Ok(trimmed)
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let email = required(email, "email")?;
        required(password, "password")?;
        self.simulate_latency().await;

        let user = match self.accounts.get(&account_key(email)) {
            Some(account) if account.password == password => account.user.clone(),
            _ => {
                warn!("Failed login attempt for {}", email);
                return Err(AuthError::InvalidCredentials);
            }
        };

        info!("User {} logged in", user.id);
        self.start_session(user)
    }

    async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, AuthError> {
        let name = required(name, "name")?;
        let email = required(email, "email")?;
        required(password, "password")?;
        self.simulate_latency().await;

        let user = User {
            id: format!("user_{}", rand::random::<u32>()),
            name: name.to_string(),
            email: email.to_string(),
            profile_image: None,
        };

        match self.accounts.entry(account_key(email)) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                return Err(AuthError::AlreadyRegistered(email.to_string()));
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(Account {
                    password: password.to_string(),
                    user: user.clone(),
                });
            }
        }

        let user_id = user.id.clone();
        match self.start_session(user) {
            Ok(session) => {
                info!("Registered user {}", user_id);
                Ok(session)
            }
            Err(e) => {
                warn!("Rolling back registration of {}: {}", user_id, e);
                self.accounts
                    .remove_if(&account_key(email), |_, account| account.user.id == user_id);
                Err(e)
            }
        }
    }

    async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let (_, session) = self
            .sessions
            .remove(token)
            .ok_or(AuthError::UnknownSession)?;

        // The file only holds the most recent session; a newer one must survive
        if let Some(store) = &self.session_store {
            if matches!(store.load()?, Some(saved) if saved.token == token) {
                store.clear()?;
            }
        }
        info!("User {} logged out", session.user.id);
        Ok(())
    }

    async fn get_session(&self, token: &str) -> Option<Session> {
        self.sessions.get(token).map(|session| session.clone())
    }
}
