//! Session storage and management.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{SessionKey, Slot, Slots};
use crate::error::OrderDeskError;
use crate::nlu::Intent;
use crate::Result;

/// Dialogue state for one conversation.
#[derive(Debug, Clone)]
pub struct Session {
    /// Caller-supplied key.
    pub key: SessionKey,
    /// Intent waiting on a slot, if a flow is in progress.
    pub pending_intent: Option<Intent>,
    /// Failed slot captures since the flow started or last captured a slot.
    pub retry_count: u32,
    /// Captured slot values.
    pub slots: Slots,
    /// Time when session was created.
    pub created_at: Instant,
    /// Time of last activity.
    pub last_activity: Instant,
}

impl Session {
    /// Create an idle session with no pending flow.
    pub fn new(key: SessionKey) -> Self {
        let now = Instant::now();
        Self {
            key,
            pending_intent: None,
            retry_count: 0,
            slots: Slots::new(),
            created_at: now,
            last_activity: now,
        }
    }

    /// Start collecting slots for `intent`.
    ///
    /// Resets the retry counter and drops any previously captured slots.
    pub fn begin_flow(&mut self, intent: Intent) {
        self.pending_intent = Some(intent);
        self.retry_count = 0;
        self.slots.clear();
    }

    /// End the current flow, whatever its result.
    pub fn finish_flow(&mut self) {
        self.pending_intent = None;
        self.retry_count = 0;
        self.slots.clear();
    }

    /// Record a failed slot capture and return the new retry count.
    pub fn record_retry(&mut self) -> u32 {
        self.retry_count = self.retry_count.saturating_add(1);
        self.retry_count
    }

    /// Store a captured slot value. A successful capture resets retries.
    pub fn fill_slot(&mut self, slot: Slot, value: impl Into<String>) {
        self.slots.set(slot, value);
        self.retry_count = 0;
    }

    pub fn slot(&self, slot: Slot) -> Option<&str> {
        self.slots.get(slot)
    }

    pub fn has_pending_flow(&self) -> bool {
        self.pending_intent.is_some()
    }

    /// Update the last activity timestamp.
    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    /// Get the idle duration since last activity.
    pub fn idle_duration(&self) -> Duration {
        self.last_activity.elapsed()
    }
}

/// Shared handle to one session.
///
/// Holding the lock for a whole turn serializes turns on the same key.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Thread-safe storage for sessions.
///
/// The map lock is only held to look up or insert handles; per-session
/// work happens under the session's own async mutex, so distinct keys
/// never wait on each other.
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionKey, SessionHandle>>,
}

impl SessionStore {
    /// Create a new empty session store.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Return the session for `key`, creating it on first use.
    pub fn get_or_create(&self, key: &SessionKey) -> Result<SessionHandle> {
        {
            let sessions = self
                .sessions
                .read()
                .map_err(|_| OrderDeskError::LockPoisoned)?;
            if let Some(handle) = sessions.get(key) {
                return Ok(Arc::clone(handle));
            }
        }

        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| OrderDeskError::LockPoisoned)?;

        // Another caller may have inserted between the two locks.
        let handle = sessions.entry(key.clone()).or_insert_with(|| {
            debug!(session = %key, "creating session");
            Arc::new(Mutex::new(Session::new(key.clone())))
        });
        Ok(Arc::clone(handle))
    }

    fn handle(&self, key: &SessionKey) -> Result<Option<SessionHandle>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| OrderDeskError::LockPoisoned)?;
        Ok(sessions.get(key).cloned())
    }

    /// Get a copy of the session for `key`.
    ///
    /// Waits for any in-flight turn on that session to finish.
    pub async fn snapshot(&self, key: &SessionKey) -> Result<Option<Session>> {
        match self.handle(key)? {
            Some(handle) => Ok(Some(handle.lock().await.clone())),
            None => Ok(None),
        }
    }

    /// Check if a session exists.
    pub fn contains(&self, key: &SessionKey) -> Result<bool> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| OrderDeskError::LockPoisoned)?;
        Ok(sessions.contains_key(key))
    }

    /// Remove a session from the store.
    ///
    /// Returns true if the session existed.
    pub fn remove(&self, key: &SessionKey) -> Result<bool> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| OrderDeskError::LockPoisoned)?;
        Ok(sessions.remove(key).is_some())
    }

    /// Get the number of sessions in the store.
    pub fn count(&self) -> usize {
        self.sessions.read().map(|s| s.len()).unwrap_or(0)
    }

    /// List all session keys.
    pub fn list_keys(&self) -> Result<Vec<SessionKey>> {
        let sessions = self
            .sessions
            .read()
            .map_err(|_| OrderDeskError::LockPoisoned)?;
        Ok(sessions.keys().cloned().collect())
    }

    /// Remove sessions idle for at least `ttl`.
    ///
    /// Sessions referenced by an in-flight turn are skipped. Returns the
    /// number of sessions removed.
    pub fn evict_idle(&self, ttl: Duration) -> Result<usize> {
        let mut sessions = self
            .sessions
            .write()
            .map_err(|_| OrderDeskError::LockPoisoned)?;

        let before = sessions.len();
        sessions.retain(|_, handle| {
            if Arc::strong_count(handle) > 1 {
                return true;
            }
            match handle.try_lock() {
                Ok(session) => session.idle_duration() < ttl,
                Err(_) => true,
            }
        });
        Ok(before - sessions.len())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Periodically evict idle sessions from `store`.
pub fn spawn_sweeper(store: Arc<SessionStore>, ttl: Duration, every: Duration) -> JoinHandle<()> {
    let every = every.max(Duration::from_millis(10));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match store.evict_idle(ttl) {
                Ok(0) => {}
                Ok(evicted) => debug!(evicted, remaining = store.count(), "evicted idle sessions"),
                Err(e) => warn!(error = %e, "session sweep failed"),
            }
        }
    })
}
