//! Reading ingestion and retrieval

use std::sync::Arc;

use tracing::info;

use crate::domain::{DomainError, DomainResult, Reading, ReadingRepository};

/// Service for storing and reading meter readings
pub struct ReadingService {
    readings: Arc<dyn ReadingRepository>,
}

impl ReadingService {
    pub fn new(readings: Arc<dyn ReadingRepository>) -> Self {
        Self { readings }
    }

    /// Append readings to a meter's history.
    pub async fn store(&self, meter_id: &str, readings: Vec<Reading>) -> DomainResult<usize> {
        if meter_id.trim().is_empty() {
            return Err(DomainError::Validation(
                "smart meter id must not be empty".to_string(),
            ));
        }
        if readings.is_empty() {
            return Err(DomainError::Validation(
                "at least one reading is required".to_string(),
            ));
        }
        if let Some(bad) = readings.iter().find(|r| !r.is_valid()) {
            return Err(DomainError::Validation(format!(
                "invalid reading at time {}: {} (readings must be finite, non-negative kW)",
                bad.time, bad.reading
            )));
        }

        let count = readings.len();
        self.readings.append(meter_id, readings).await?;

        info!(meter_id, stored = count, "Readings stored");

        Ok(count)
    }

    /// The meter's full reading history.
    pub async fn read(&self, meter_id: &str) -> DomainResult<Vec<Reading>> {
        match self.readings.find_by_meter(meter_id).await? {
            Some(readings) if !readings.is_empty() => Ok(readings),
            _ => Err(DomainError::NoReadings {
                meter_id: meter_id.to_string(),
            }),
        }
    }

    pub async fn meter_ids(&self) -> DomainResult<Vec<String>> {
        self.readings.meter_ids().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::InMemoryReadingStore;

    fn service() -> ReadingService {
        ReadingService::new(Arc::new(InMemoryReadingStore::new()))
    }

    #[tokio::test]
    async fn store_then_read() {
        let service = service();
        let stored = service
            .store(
                "smart-meter-0",
                vec![Reading::new(100, 0.5), Reading::new(200, 0.7)],
            )
            .await
            .unwrap();
        assert_eq!(stored, 2);

        let readings = service.read("smart-meter-0").await.unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(service.meter_ids().await.unwrap(), vec!["smart-meter-0"]);
    }

    #[tokio::test]
    async fn read_unknown_meter_is_no_data() {
        let err = service().read("smart-meter-9").await.unwrap_err();
        assert!(matches!(err, DomainError::NoReadings { .. }));
    }

    #[tokio::test]
    async fn rejects_empty_batches_and_bad_values() {
        let service = service();
        assert!(matches!(
            service.store("smart-meter-0", vec![]).await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            service
                .store("smart-meter-0", vec![Reading::new(1, -2.0)])
                .await,
            Err(DomainError::Validation(_))
        ));
        assert!(matches!(
            service.store(" ", vec![Reading::new(1, 2.0)]).await,
            Err(DomainError::Validation(_))
        ));

        // Nothing was written by the rejected batches.
        assert!(service.read("smart-meter-0").await.is_err());
    }
}
