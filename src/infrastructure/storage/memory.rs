//! In-memory reading storage

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{DomainResult, Reading, ReadingRepository};

/// In-memory reading store for development and testing
pub struct InMemoryReadingStore {
    readings: DashMap<String, Vec<Reading>>,
}

impl InMemoryReadingStore {
    pub fn new() -> Self {
        Self {
            readings: DashMap::new(),
        }
    }

    /// Build a store pre-filled with the given meter histories.
    pub fn with_readings<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<Reading>)>,
        S: Into<String>,
    {
        let store = Self::new();
        for (meter_id, readings) in entries {
            store.readings.insert(meter_id.into(), readings);
        }
        store
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

impl Default for InMemoryReadingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReadingRepository for InMemoryReadingStore {
    async fn find_by_meter(&self, meter_id: &str) -> DomainResult<Option<Vec<Reading>>> {
        // Hand out a copy; callers never see the stored sequence itself.
        Ok(self.readings.get(meter_id).map(|r| r.value().clone()))
    }

    async fn append(&self, meter_id: &str, readings: Vec<Reading>) -> DomainResult<()> {
        self.readings
            .entry(meter_id.to_string())
            .or_default()
            .extend(readings);
        Ok(())
    }

    async fn meter_ids(&self) -> DomainResult<Vec<String>> {
        let mut ids: Vec<String> = self.readings.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        Ok(ids)
    }
}
