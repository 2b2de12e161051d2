//! In-memory sources for tests and demos.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use tagdrop_core::error::SourceError;
use tagdrop_core::model::TagRecord;
use tagdrop_core::traits::TagSource;

/// Serves a fixed record set without touching the network or disk.
///
/// Counts calls so tests can assert how often a session re-fetched.
pub struct StaticSource {
    records: Vec<TagRecord>,
    call_count: AtomicU32,
}

impl StaticSource {
    pub fn new(records: Vec<TagRecord>) -> Self {
        Self {
            records,
            call_count: AtomicU32::new(0),
        }
    }

    /// Number of fetches served so far.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl TagSource for StaticSource {
    fn describe(&self) -> String {
        format!("static ({} records)", self.records.len())
    }

    async fn fetch_tags(&self) -> Result<Vec<TagRecord>, SourceError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        Ok(self.records.clone())
    }
}

/// Always fails with a network error; for exercising load-failure paths.
pub struct FailingSource {
    message: String,
}

impl FailingSource {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl TagSource for FailingSource {
    fn describe(&self) -> String {
        "failing".to_string()
    }

    async fn fetch_tags(&self) -> Result<Vec<TagRecord>, SourceError> {
        Err(SourceError::Network(self.message.clone()))
    }
}
