use crate::domain::model::PlanRecord;
use crate::domain::ports::PlanRepository;
use crate::utils::error::Result;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores each plan as `<base_path>/<plan_id>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    base_path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn record_path(&self, plan_id: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", plan_id))
    }
}

impl PlanRepository for JsonFileRepository {
    async fn load(&self, plan_id: &str) -> Result<Option<PlanRecord>> {
        let path = self.record_path(plan_id);
        tracing::debug!("Loading plan record from {}", path.display());

        let data = match tokio::fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record: PlanRecord = serde_json::from_slice(&data)?;
        Ok(Some(record))
    }

    async fn save(&self, record: &PlanRecord) -> Result<String> {
        let path = self.record_path(&record.plan_id);

        // 確保目錄存在
        tokio::fs::create_dir_all(&self.base_path).await?;

        let json = serde_json::to_vec_pretty(record)?;
        tracing::debug!("Writing plan record ({} bytes) to {}", json.len(), path.display());
        tokio::fs::write(&path, json).await?;

        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::controller::ConsistencyController;
    use rust_decimal::Decimal;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_plan_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonFileRepository::new(temp_dir.path());
        assert!(repository.load("absent").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_creates_nested_directory() {
        let temp_dir = TempDir::new().unwrap();
        let repository = JsonFileRepository::new(temp_dir.path().join("plans/2026"));
        let record = ConsistencyController::new(Decimal::from(80))
            .state()
            .to_record("silver", "Silver");

        let location = repository.save(&record).await.unwrap();
        assert!(location.ends_with("silver.json"));
        assert!(temp_dir.path().join("plans/2026/silver.json").exists());
    }

    #[tokio::test]
    async fn test_corrupted_record_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("broken.json"), b"{ not json").unwrap();
        let repository = JsonFileRepository::new(temp_dir.path());

        let result = repository.load("broken").await;
        assert!(matches!(
            result,
            Err(crate::utils::error::PricingError::SerializationError(_))
        ));
    }
}
