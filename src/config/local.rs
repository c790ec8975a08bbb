use crate::domain::model::RunOutput;
use crate::domain::ports::{ArtifactStore, DataSink};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::fs;
use std::path::Path;

/// Filesystem-backed store for both the extracted record and the
/// diagnostic snapshots. Everything lands under `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn write(&self, file_name: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(file_name);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}

#[async_trait]
impl ArtifactStore for LocalStorage {
    async fn save(&self, key: &str, extension: &str, data: &[u8]) -> Result<()> {
        self.write(&format!("{}.{}", key, extension), data)
    }
}

#[async_trait]
impl DataSink for LocalStorage {
    async fn push(&self, output: &RunOutput) -> Result<()> {
        let json = serde_json::to_vec_pretty(output)?;
        self.write("reservation.json", &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ReservationRecord;

    #[tokio::test]
    async fn test_save_writes_keyed_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().to_string_lossy().into_owned());

        storage.save("login-result", "html", b"<html/>").await.unwrap();

        let written = fs::read(dir.path().join("login-result.html")).unwrap();
        assert_eq!(written, b"<html/>");
    }

    #[tokio::test]
    async fn test_push_writes_reservation_json() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().to_string_lossy().into_owned());

        let output = RunOutput {
            reservation: ReservationRecord {
                stylist_id: "ST001".to_string(),
                date: "2024-10-02".to_string(),
                start_time: "1030".to_string(),
                term: "60".to_string(),
            },
        };
        storage.push(&output).await.unwrap();

        let json = fs::read_to_string(dir.path().join("reservation.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["reservation"]["stylistId"], "ST001");
        assert_eq!(parsed["reservation"]["startTime"], "1030");
    }

    #[tokio::test]
    async fn test_write_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        let storage = LocalStorage::new(nested.to_string_lossy().into_owned());

        storage.save("extReserveChange", "png", &[0x89, 0x50]).await.unwrap();

        assert!(nested.join("extReserveChange.png").exists());
    }
}
