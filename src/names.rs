//! Nickname handling for the active account
//!
//! Nicknames live in the external naming collaborator, keyed by the
//! lowercased account address. A first-time account gets a generated
//! guest name so posts always carry a non-empty display name.

use crate::error::{BoardError, Result};
use crate::session::Session;
use crate::traits::NameDirectory;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

/// Guest name fallback: `Guest_` + six address characters past the
/// `0x` prefix
fn guest_name(account: &str) -> String {
    let lower = account.to_lowercase();
    let tail = lower.strip_prefix("0x").unwrap_or(&lower);
    format!("Guest_{}", &tail[..tail.len().min(6)])
}

/// Cached nickname for the active account
pub struct NicknameBook {
    directory: Arc<dyn NameDirectory>,
    session: Session,
    current: Mutex<String>,
}

impl NicknameBook {
    pub fn new(directory: Arc<dyn NameDirectory>, session: Session) -> Self {
        Self {
            directory,
            session,
            current: Mutex::new(String::new()),
        }
    }

    /// Fetch the nickname for the active account, generating and saving
    /// a guest name when none exists yet. Clears the cache when no
    /// account is connected.
    pub async fn load(&self) -> Result<String> {
        let Some(account) = self.session.account() else {
            self.current.lock().await.clear();
            return Ok(String::new());
        };

        let name = match self.directory.current_name(&account).await? {
            Some(existing) if !existing.trim().is_empty() => existing,
            _ => {
                let generated = guest_name(&account);
                // best-effort: a failed save still leaves a usable name
                if let Err(err) = self.directory.save_name(&account, &generated).await {
                    warn!("failed to persist guest nickname: {}", err);
                }
                generated
            }
        };

        *self.current.lock().await = name.clone();
        Ok(name)
    }

    /// Save a new nickname for the active account
    pub async fn update(&self, new_name: &str) -> Result<()> {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return Err(BoardError::Validation("nickname cannot be empty".into()));
        }
        let Some(account) = self.session.account() else {
            return Err(BoardError::AuthRequired);
        };

        self.directory.save_name(&account, trimmed).await?;
        *self.current.lock().await = trimmed.to_string();
        Ok(())
    }

    /// Last loaded nickname, empty when none
    pub async fn current(&self) -> String {
        self.current.lock().await.clone()
    }
}
