//! Usage event logging
//!
//! Records user activity (QR scans, captures, shares, ...) as
//! `{user, type, timestamp}` records and hands them to a [`LogSink`].
//! Tracking is best-effort: [`UsageLogger::log_event`] never fails the caller.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tenantweb_shared::{LogRecord, WebError};

use crate::error::{ClientError, ClientResult};
use crate::identity::IdentityProvider;

/// Persists usage records somewhere outside this crate
#[async_trait]
pub trait LogSink: Send + Sync {
    async fn persist(&self, record: &LogRecord) -> ClientResult<()>;
}

#[async_trait]
impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    async fn persist(&self, record: &LogRecord) -> ClientResult<()> {
        (**self).persist(record).await
    }
}

/// Sink that keeps records in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    records: RwLock<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.read().map(|r| r.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LogSink for MemorySink {
    async fn persist(&self, record: &LogRecord) -> ClientResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| ClientError::Shared(WebError::Internal("sink lock poisoned".to_string())))?;
        records.push(record.clone());
        Ok(())
    }
}

/// Attributes events to an actor and persists them
pub struct UsageLogger<I, S> {
    identity: I,
    sink: S,
}

impl<I: IdentityProvider, S: LogSink> UsageLogger<I, S> {
    pub fn new(identity: I, sink: S) -> Self {
        Self { identity, sink }
    }

    /// Record an event and report whether it was persisted
    pub async fn try_log_event(&self, event_type: &str) -> ClientResult<LogRecord> {
        let user = self.identity.resolve_actor_id();
        let record = LogRecord::now(user, event_type);

        self.sink.persist(&record).await?;

        tracing::info!(
            user = %record.user,
            event_type = %record.event_type,
            "Logged usage event"
        );
        Ok(record)
    }

    /// Record an event, logging and swallowing any failure
    pub async fn log_event(&self, event_type: &str) {
        if let Err(e) = self.try_log_event(event_type).await {
            tracing::error!(
                event_type = %event_type,
                code = e.code(),
                error = %e,
                "Failed to log usage event"
            );
        }
    }
}
