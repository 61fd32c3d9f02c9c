//! In-process [`ActivityStore`] with fault injection.
//!
//! Backs unit tests and lets callers exercise the pipeline without SQLite.
//! Clones share state, so a test can keep a handle after passing a clone to
//! the analyzer.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::{InactiveLogEntry, LoginValue, NewInactiveLogEntry};
use crate::services::error::StoreError;
use crate::services::store::{ActivityStore, LogTransaction};

#[derive(Default)]
struct Shared {
    users: Mutex<BTreeMap<i64, Option<LoginValue>>>,
    log: Mutex<Vec<InactiveLogEntry>>,
    fail_loads: AtomicBool,
    fail_begin: AtomicBool,
    fail_insert_after: Mutex<Option<usize>>,
    transactions_opened: AtomicUsize,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Default)]
pub struct MemoryActivityStore {
    shared: Arc<Shared>,
}

impl MemoryActivityStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a user.
    pub fn add_user(&self, user_id: i64, last_login: Option<LoginValue>) {
        lock(&self.shared.users).insert(user_id, last_login);
    }

    /// Every subsequent read fails.
    pub fn fail_loads(&self) {
        self.shared.fail_loads.store(true, Ordering::SeqCst);
    }

    /// Every subsequent `begin` fails.
    pub fn fail_begin(&self) {
        self.shared.fail_begin.store(true, Ordering::SeqCst);
    }

    /// Inside each transaction, the first `n` inserts succeed and the next one fails.
    pub fn fail_insert_after(&self, n: usize) {
        *lock(&self.shared.fail_insert_after) = Some(n);
    }

    /// Committed log rows in insertion order.
    #[must_use]
    pub fn logged(&self) -> Vec<InactiveLogEntry> {
        lock(&self.shared.log).clone()
    }

    #[must_use]
    pub fn transactions_opened(&self) -> usize {
        self.shared.transactions_opened.load(Ordering::SeqCst)
    }

    fn check_loads(&self) -> Result<(), StoreError> {
        if self.shared.fail_loads.load(Ordering::SeqCst) {
            return Err(StoreError::Injected("read failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ActivityStore for MemoryActivityStore {
    async fn user_ids(&self) -> Result<Vec<i64>, StoreError> {
        self.check_loads()?;
        Ok(lock(&self.shared.users).keys().copied().collect())
    }

    async fn last_login(&self, user_id: i64) -> Result<Option<Option<LoginValue>>, StoreError> {
        self.check_loads()?;
        Ok(lock(&self.shared.users).get(&user_id).cloned())
    }

    async fn users_with_login(&self) -> Result<Vec<(i64, Option<LoginValue>)>, StoreError> {
        self.check_loads()?;
        Ok(lock(&self.shared.users)
            .iter()
            .map(|(id, login)| (*id, login.clone()))
            .collect())
    }

    async fn begin(&self) -> Result<Box<dyn LogTransaction>, StoreError> {
        if self.shared.fail_begin.load(Ordering::SeqCst) {
            return Err(StoreError::Injected("cannot open transaction".to_string()));
        }

        self.shared.transactions_opened.fetch_add(1, Ordering::SeqCst);
        let fail_after = *lock(&self.shared.fail_insert_after);

        Ok(Box::new(MemoryTransaction {
            shared: Arc::clone(&self.shared),
            staged: Vec::new(),
            fail_after,
        }))
    }
}

struct MemoryTransaction {
    shared: Arc<Shared>,
    staged: Vec<NewInactiveLogEntry>,
    fail_after: Option<usize>,
}

#[async_trait::async_trait]
impl LogTransaction for MemoryTransaction {
    async fn insert(&mut self, entry: &NewInactiveLogEntry) -> Result<(), StoreError> {
        if self.fail_after.is_some_and(|n| self.staged.len() >= n) {
            return Err(StoreError::Injected(format!(
                "insert failed for user {}",
                entry.user_id
            )));
        }

        self.staged.push(entry.clone());
        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let mut log = lock(&self.shared.log);
        let mut next_id = log.last().map_or(1, |e| e.log_id + 1);

        for entry in &self.staged {
            log.push(InactiveLogEntry {
                log_id: next_id,
                user_id: entry.user_id.value(),
                last_login: entry.last_login_text(),
                days_since_login: entry.days_since_login,
                logged_at: entry.logged_at_text(),
            });
            next_id += 1;
        }

        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), StoreError> {
        Ok(())
    }
}
