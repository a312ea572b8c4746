use crate::core::{ConfigProvider, Storage};
use crate::domain::model::{BarcodeEntry, BarcodeRecord, Detection, ScanMode, ScanRecord, ScanType};
use crate::domain::services::barcode::analyze;
use crate::domain::services::detection::interpret;
use crate::domain::services::history::{History, HistoryEntry};
use crate::utils::error::{Result, ScanError};
use crate::utils::validation::normalize_target;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const SCAN_HISTORY_FILE: &str = "scan_history.json";
pub const BARCODE_HISTORY_FILE: &str = "barcode_history.json";

/// Drives website and barcode scans and keeps their histories persisted.
pub struct ScanEngine<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    scans: History<ScanRecord>,
    barcodes: History<BarcodeEntry>,
}

impl<S: Storage, C: ConfigProvider> ScanEngine<S, C> {
    /// Creates an engine with both histories read back from storage.
    pub async fn load(storage: S, config: C) -> Result<Self> {
        let scans = load_history(&storage, SCAN_HISTORY_FILE, config.scan_history_limit()).await?;
        let barcodes =
            load_history(&storage, BARCODE_HISTORY_FILE, config.barcode_history_limit()).await?;

        tracing::debug!(
            "Loaded {} scan(s) and {} barcode(s) from history",
            scans.len(),
            barcodes.len()
        );

        Ok(Self {
            storage,
            config,
            scans,
            barcodes,
        })
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    pub fn scan_history(&self) -> &History<ScanRecord> {
        &self.scans
    }

    pub fn barcode_history(&self) -> &History<BarcodeEntry> {
        &self.barcodes
    }

    /// Validates the target and records a scan of it. `None` uses the
    /// configured default scan type.
    pub async fn scan_url(&mut self, input: &str, scan_type: Option<ScanType>) -> Result<ScanRecord> {
        let url = normalize_target(input)?;
        let scan_type = scan_type.unwrap_or_else(|| self.config.default_scan_type());

        let record = ScanRecord {
            sections: scan_type.sections().into_iter().map(String::from).collect(),
            url,
            scan_type,
            scanned_at: Utc::now(),
        };

        tracing::info!("Scanned {} ({})", record.url, record.scan_type);

        let mut scans = self.scans.clone();
        scans.record(record.clone());
        save_history(&self.storage, SCAN_HISTORY_FILE, &scans).await?;
        self.scans = scans;
        Ok(record)
    }

    pub async fn scan_barcode(&mut self, code: &str) -> Result<BarcodeRecord> {
        let record = analyze(code);
        self.remember_barcode(&record).await?;
        Ok(record)
    }

    /// Interprets decoded camera text; barcode detections are recorded.
    pub async fn detect(&mut self, text: &str, mode: ScanMode) -> Result<Detection> {
        let detection = interpret(text, mode);
        match &detection {
            Detection::Url { url } => tracing::info!("Detected URL {}", url),
            Detection::Barcode { record, .. } => {
                tracing::info!("Detected {} barcode {}", record.symbology, record.code);
                self.remember_barcode(record).await?;
            }
            Detection::Text { text } => tracing::info!("Detected text ({} chars)", text.len()),
        }
        Ok(detection)
    }

    pub async fn clear_history(&mut self) -> Result<()> {
        self.scans.clear();
        self.barcodes.clear();
        self.storage.remove_file(SCAN_HISTORY_FILE).await?;
        self.storage.remove_file(BARCODE_HISTORY_FILE).await?;
        tracing::info!("Scan history cleared");
        Ok(())
    }

    async fn remember_barcode(&mut self, record: &BarcodeRecord) -> Result<()> {
        if !record.is_valid {
            tracing::warn!("Barcode {} failed its check digit", record.code);
        }
        let mut barcodes = self.barcodes.clone();
        barcodes.record(BarcodeEntry {
            record: record.clone(),
            scanned_at: Utc::now(),
        });
        save_history(&self.storage, BARCODE_HISTORY_FILE, &barcodes).await?;
        self.barcodes = barcodes;
        Ok(())
    }
}

async fn load_history<S, T>(storage: &S, path: &str, capacity: usize) -> Result<History<T>>
where
    S: Storage,
    T: HistoryEntry + DeserializeOwned,
{
    let data = match storage.read_file(path).await {
        Ok(data) => data,
        Err(ScanError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(History::new(capacity));
        }
        Err(e) => return Err(e),
    };

    match serde_json::from_slice::<Vec<T>>(&data) {
        Ok(entries) => Ok(History::from_entries(entries, capacity)),
        Err(e) => {
            tracing::warn!("Ignoring unreadable history file {}: {}", path, e);
            Ok(History::new(capacity))
        }
    }
}

async fn save_history<S, T>(storage: &S, path: &str, history: &History<T>) -> Result<()>
where
    S: Storage,
    T: HistoryEntry + Serialize,
{
    let data = serde_json::to_vec_pretty(history)?;
    storage.write_file(path, &data).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Symbology;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
        read_only: Arc<AtomicBool>,
    }

    impl MockStorage {
        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }

        fn set_read_only(&self, read_only: bool) {
            self.read_only.store(read_only, Ordering::SeqCst);
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ScanError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            if self.read_only.load(Ordering::SeqCst) {
                return Err(ScanError::StorageError {
                    path: path.to_string(),
                    message: "read-only".to_string(),
                });
            }
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        async fn remove_file(&self, path: &str) -> Result<()> {
            let mut files = self.files.lock().await;
            files.remove(path);
            Ok(())
        }
    }

    struct TestConfig {
        limit: usize,
    }

    impl ConfigProvider for TestConfig {
        fn data_dir(&self) -> &str {
            "memory"
        }

        fn scan_history_limit(&self) -> usize {
            self.limit
        }

        fn barcode_history_limit(&self) -> usize {
            self.limit
        }

        fn default_scan_type(&self) -> ScanType {
            ScanType::Performance
        }
    }

    #[test]
    fn test_scan_url_uses_default_type_and_persists() {
        tokio_test::block_on(async {
            let storage = MockStorage::default();
            let mut engine = ScanEngine::load(storage.clone(), TestConfig { limit: 20 })
                .await
                .unwrap();

            let record = engine.scan_url("example.com", None).await.unwrap();
            assert_eq!(record.url.as_str(), "https://example.com/");
            assert_eq!(record.scan_type, ScanType::Performance);
            assert_eq!(
                record.sections,
                vec!["Basic Information", "Performance Metrics"]
            );

            let saved = storage.get_file(SCAN_HISTORY_FILE).await.unwrap();
            let entries: Vec<ScanRecord> = serde_json::from_slice(&saved).unwrap();
            assert_eq!(entries, vec![record]);
        });
    }

    #[test]
    fn test_invalid_target_is_not_recorded() {
        tokio_test::block_on(async {
            let storage = MockStorage::default();
            let mut engine = ScanEngine::load(storage.clone(), TestConfig { limit: 20 })
                .await
                .unwrap();

            let err = engine.scan_url("not a url", None).await.unwrap_err();
            assert!(matches!(err, ScanError::InvalidTargetError { .. }));
            assert!(engine.scan_history().is_empty());
            assert!(storage.get_file(SCAN_HISTORY_FILE).await.is_none());
        });
    }

    #[test]
    fn test_barcode_history_dedups_and_reloads() {
        tokio_test::block_on(async {
            let storage = MockStorage::default();
            let mut engine = ScanEngine::load(storage.clone(), TestConfig { limit: 2 })
                .await
                .unwrap();

            engine.scan_barcode("4006381333931").await.unwrap();
            engine.scan_barcode("40170725").await.unwrap();
            engine.scan_barcode("4006381333931").await.unwrap();
            engine.scan_barcode("ABC-123").await.unwrap();

            let reloaded = ScanEngine::load(storage, TestConfig { limit: 2 })
                .await
                .unwrap();
            let codes: Vec<&str> = reloaded
                .barcode_history()
                .entries()
                .map(|entry| entry.record.code.as_str())
                .collect();
            assert_eq!(codes, vec!["ABC-123", "4006381333931"]);
            assert_eq!(
                reloaded.barcode_history().get(0).unwrap().record.symbology,
                Symbology::Code39
            );
        });
    }

    #[test]
    fn test_corrupt_history_starts_empty() {
        tokio_test::block_on(async {
            let storage = MockStorage::default();
            storage
                .write_file(SCAN_HISTORY_FILE, b"{ not json")
                .await
                .unwrap();

            let engine = ScanEngine::load(storage, TestConfig { limit: 20 })
                .await
                .unwrap();
            assert!(engine.scan_history().is_empty());
        });
    }

    #[test]
    fn test_detect_records_barcodes_only() {
        tokio_test::block_on(async {
            let storage = MockStorage::default();
            let mut engine = ScanEngine::load(storage.clone(), TestConfig { limit: 20 })
                .await
                .unwrap();

            engine.detect("https://example.com", ScanMode::Barcode).await.unwrap();
            engine.detect("free text", ScanMode::Text).await.unwrap();
            assert!(engine.barcode_history().is_empty());

            engine.detect("40170725", ScanMode::Barcode).await.unwrap();
            assert_eq!(engine.barcode_history().len(), 1);
            assert!(storage.get_file(BARCODE_HISTORY_FILE).await.is_some());
        });
    }

    #[test]
    fn test_failed_write_leaves_history_unchanged() {
        tokio_test::block_on(async {
            let storage = MockStorage::default();
            let mut engine = ScanEngine::load(storage.clone(), TestConfig { limit: 20 })
                .await
                .unwrap();

            let kept = engine.scan_url("https://example.com", None).await.unwrap();
            engine.scan_barcode("40170725").await.unwrap();

            storage.set_read_only(true);
            let err = engine.scan_url("example.org", None).await.unwrap_err();
            assert!(matches!(err, ScanError::StorageError { .. }));
            assert!(engine.scan_barcode("4006381333931").await.is_err());

            let urls: Vec<&str> = engine.scan_history().entries().map(|r| r.url.as_str()).collect();
            assert_eq!(urls, vec![kept.url.as_str()]);
            let codes: Vec<&str> = engine
                .barcode_history()
                .entries()
                .map(|entry| entry.record.code.as_str())
                .collect();
            assert_eq!(codes, vec!["40170725"]);
        });
    }

    #[test]
    fn test_clear_history_removes_files() {
        tokio_test::block_on(async {
            let storage = MockStorage::default();
            let mut engine = ScanEngine::load(storage.clone(), TestConfig { limit: 20 })
                .await
                .unwrap();

            engine.scan_url("https://example.com", None).await.unwrap();
            engine.scan_barcode("40170725").await.unwrap();
            engine.clear_history().await.unwrap();

            assert!(engine.scan_history().is_empty());
            assert!(engine.barcode_history().is_empty());
            assert!(storage.get_file(SCAN_HISTORY_FILE).await.is_none());
            assert!(storage.get_file(BARCODE_HISTORY_FILE).await.is_none());
        });
    }
}
