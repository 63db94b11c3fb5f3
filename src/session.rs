//! Reactive account/session state
//!
//! The wallet collaborator may change the active account at any time
//! (connect, disconnect, account switch). Gates that depend on it must
//! read the current value at the gate itself rather than carrying an
//! account captured before an await, so `Session` exposes a cheap
//! re-readable view backed by a watch channel.

use tokio::sync::watch;

/// Shared view of the currently authenticated account
///
/// `None` means no wallet is connected. A present account carries the
/// signing capability with it; the wallet never exposes one without the
/// other.
#[derive(Clone)]
pub struct Session {
    tx: watch::Sender<Option<String>>,
}

impl Session {
    /// Start with no account connected
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { tx }
    }

    /// Current account address, if authenticated
    pub fn account(&self) -> Option<String> {
        self.tx.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Set or clear the active account (wallet connect/disconnect)
    pub fn set_account(&self, account: Option<String>) {
        // send_replace never fails; the sender keeps the channel alive
        self.tx.send_replace(account);
    }

    /// Subscribe to account changes
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.tx.subscribe()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
