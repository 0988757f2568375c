//! Attendance service: per-user serialization around validate-and-upsert,
//! plus an in-process cache overlay that keeps the bot answering when the
//! durable store is unreachable.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::warn;

use crate::database::attendance::AttendanceStore;
use crate::database::models::AttendanceRecord;

/// Cheap-to-clone handle shared by every handler task.
#[derive(Clone)]
pub struct AttendanceService {
    store: Arc<dyn AttendanceStore>,
    cache: Arc<RwLock<HashMap<u64, AttendanceRecord>>>,
    user_locks: Arc<Mutex<HashMap<u64, Arc<Mutex<()>>>>>,
}

impl AttendanceService {
    pub fn new(store: Arc<dyn AttendanceStore>) -> Self {
        Self {
            store,
            cache: Arc::new(RwLock::new(HashMap::new())),
            user_locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Keyed mutex: two tasks acting for the same user serialize here, so a
    /// validate-then-upsert pair can never interleave with another one for
    /// that user. Different users never contend. Guards are owned, letting
    /// callers hold them across the whole transition.
    pub async fn lock_user(&self, user_id: u64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.user_locks.lock().await;
            locks
                .entry(user_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }

    /// Current record for a user. The in-process cache is consulted first:
    /// every write lands there, so it is at least as fresh as the store.
    pub async fn get(&self, user_id: u64) -> Option<AttendanceRecord> {
        if let Some(record) = self.cache.read().await.get(&user_id).cloned() {
            return Some(record);
        }
        match self.store.get(user_id).await {
            Ok(Some(record)) => {
                self.cache.write().await.insert(user_id, record.clone());
                Some(record)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(target = "attendance.store", user_id, error = %e, "read failed; using in-memory view");
                None
            }
        }
    }

    /// Writes the record to the cache, then through to the store. A store
    /// failure is logged and the cached copy stays authoritative for the
    /// rest of the process.
    pub async fn set(&self, user_id: u64, record: AttendanceRecord) {
        self.cache.write().await.insert(user_id, record.clone());
        if let Err(e) = self.store.upsert(user_id, &record).await {
            warn!(target = "attendance.store", user_id, error = %e, "upsert failed; in-memory copy stays authoritative");
        }
    }

    /// Every known record for the team view: the store listing overlaid
    /// with any fresher in-process copies, plus users the store never saw.
    pub async fn team_view(&self) -> Vec<(u64, AttendanceRecord)> {
        let cache = self.cache.read().await;
        match self.store.get_all().await {
            Ok(mut rows) => {
                for (id, record) in rows.iter_mut() {
                    if let Some(cached) = cache.get(id) {
                        *record = cached.clone();
                    }
                }
                for (id, record) in cache.iter() {
                    if !rows.iter().any(|(rid, _)| rid == id) {
                        rows.push((*id, record.clone()));
                    }
                }
                rows
            }
            Err(e) => {
                warn!(target = "attendance.store", error = %e, "listing failed; using in-memory view");
                cache.iter().map(|(id, r)| (*id, r.clone())).collect()
            }
        }
    }
}
