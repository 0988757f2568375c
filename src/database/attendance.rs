//! Durable storage for per-user attendance records.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::str::FromStr;
use tokio::sync::Mutex;

use super::init::DbPool;
use super::models::{AttendanceRecord, Workload};
use crate::error::StoreError;

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn get(&self, user_id: u64) -> Result<Option<AttendanceRecord>, StoreError>;
    /// Every known record, for the team view. Ordering is implementation
    /// defined: first-seen insertion order in memory, user id in Postgres.
    async fn get_all(&self) -> Result<Vec<(u64, AttendanceRecord)>, StoreError>;
    /// Create-or-replace keyed by user id; same-user concurrent upserts are
    /// last-write-wins (callers serialize per user, see the service layer).
    async fn upsert(&self, user_id: u64, record: &AttendanceRecord) -> Result<(), StoreError>;
}

#[derive(sqlx::FromRow)]
struct AttendanceRow {
    user_id: i64,
    active: bool,
    username: String,
    workload: Option<String>,
    checked_in_at: Option<DateTime<Utc>>,
    checked_out_at: Option<DateTime<Utc>>,
}

impl AttendanceRow {
    fn into_record(self) -> Result<(u64, AttendanceRecord), StoreError> {
        let workload = self
            .workload
            .map(|w| {
                Workload::from_str(&w)
                    .map_err(|_| StoreError::Decode(format!("unknown workload {w:?}")))
            })
            .transpose()?;
        Ok((
            self.user_id as u64,
            AttendanceRecord {
                active: self.active,
                username: self.username,
                workload,
                checked_in_at: self.checked_in_at,
                checked_out_at: self.checked_out_at,
            },
        ))
    }
}

pub struct PgAttendanceStore {
    pool: DbPool,
}

impl PgAttendanceStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceStore for PgAttendanceStore {
    async fn get(&self, user_id: u64) -> Result<Option<AttendanceRecord>, StoreError> {
        let row: Option<AttendanceRow> = sqlx::query_as(
            "SELECT user_id, active, username, workload, checked_in_at, checked_out_at \
             FROM attendance WHERE user_id = $1",
        )
        .bind(user_id as i64)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| r.into_record().map(|(_, record)| record))
            .transpose()
    }

    async fn get_all(&self) -> Result<Vec<(u64, AttendanceRecord)>, StoreError> {
        let rows: Vec<AttendanceRow> = sqlx::query_as(
            "SELECT user_id, active, username, workload, checked_in_at, checked_out_at \
             FROM attendance ORDER BY user_id",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(AttendanceRow::into_record).collect()
    }

    async fn upsert(&self, user_id: u64, record: &AttendanceRecord) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO attendance (user_id, active, username, workload, checked_in_at, checked_out_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 active = EXCLUDED.active, \
                 username = EXCLUDED.username, \
                 workload = EXCLUDED.workload, \
                 checked_in_at = EXCLUDED.checked_in_at, \
                 checked_out_at = EXCLUDED.checked_out_at",
        )
        .bind(user_id as i64)
        .bind(record.active)
        .bind(&record.username)
        .bind(record.workload.map(|w| w.as_str()))
        .bind(record.checked_in_at)
        .bind(record.checked_out_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// In-memory store preserving first-seen insertion order.
#[derive(Default)]
pub struct MemoryAttendanceStore {
    records: Mutex<Vec<(u64, AttendanceRecord)>>,
}

#[async_trait]
impl AttendanceStore for MemoryAttendanceStore {
    async fn get(&self, user_id: u64) -> Result<Option<AttendanceRecord>, StoreError> {
        Ok(self
            .records
            .lock()
            .await
            .iter()
            .find(|(id, _)| *id == user_id)
            .map(|(_, record)| record.clone()))
    }

    async fn get_all(&self) -> Result<Vec<(u64, AttendanceRecord)>, StoreError> {
        Ok(self.records.lock().await.clone())
    }

    async fn upsert(&self, user_id: u64, record: &AttendanceRecord) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        match records.iter_mut().find(|(id, _)| *id == user_id) {
            Some((_, existing)) => *existing = record.clone(),
            None => records.push((user_id, record.clone())),
        }
        Ok(())
    }
}
