use crate::connection::connect;
use crate::error::DbError;
use crate::repository::{TableRef, WarehouseRepository};
use async_trait::async_trait;
use configuration::{DatabaseSettings, SourceKind, SourceSettings};
use core_types::DailyRecord;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The abstract interface for anything that can supply one reporting window of
/// daily records. The report and the web server only ever talk to this trait, so
/// the warehouse can be swapped for a file export or a fixture.
#[async_trait]
pub trait DailyRecordSource: Send + Sync {
    /// Loads every record of the window. Order is not guaranteed.
    async fn load_daily_records(&self) -> Result<Vec<DailyRecord>, DbError>;

    /// A short human-readable description, used in logs.
    fn describe(&self) -> String;
}

#[async_trait]
impl DailyRecordSource for WarehouseRepository {
    async fn load_daily_records(&self) -> Result<Vec<DailyRecord>, DbError> {
        self.fetch_daily_records().await
    }

    fn describe(&self) -> String {
        format!("warehouse table {}", self.table().full_name())
    }
}

/// Reads a JSON array of daily records, e.g. an export of the warehouse table.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DailyRecordSource for JsonFileSource {
    async fn load_daily_records(&self) -> Result<Vec<DailyRecord>, DbError> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|source| DbError::Io {
            path: self.path.clone(),
            source,
        })?;
        let records: Vec<DailyRecord> = serde_json::from_slice(&bytes)?;

        tracing::info!(
            path = %self.path.display(),
            records = records.len(),
            "Loaded daily records from file."
        );

        Ok(records)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Serves a fixed set of records held in memory.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    records: Vec<DailyRecord>,
}

impl FixtureSource {
    pub fn new(records: Vec<DailyRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl DailyRecordSource for FixtureSource {
    async fn load_daily_records(&self) -> Result<Vec<DailyRecord>, DbError> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("fixture of {} records", self.records.len())
    }
}

/// Builds the source selected by `source.kind`, connecting to the warehouse if needed.
pub async fn build_source(
    source: &SourceSettings,
    database: &DatabaseSettings,
) -> Result<Arc<dyn DailyRecordSource>, DbError> {
    let built: Arc<dyn DailyRecordSource> = match source.kind {
        SourceKind::Warehouse => {
            // Validate the identifiers before opening any connection.
            let table = TableRef::from_settings(source)?;
            let pool = connect(database).await?;
            Arc::new(WarehouseRepository::new(pool, table))
        }
        SourceKind::File => {
            let path = source.file.as_ref().ok_or_else(|| {
                DbError::ConnectionConfigError("source.file must be set for the file source.".to_string())
            })?;
            Arc::new(JsonFileSource::new(path.clone()))
        }
    };

    tracing::info!(source = %built.describe(), "Data source ready.");
    Ok(built)
}
