use crate::cli::DatabaseArgs;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use yakkai_wellness::config::AppConfig;
use yakkai_wellness::error::AppError;
use yakkai_wellness::intake::SqliteIntakeStore;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) db_initialized: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Resolves the database path (CLI override first, then configuration) and opens it.
pub(crate) fn open_store(args: &DatabaseArgs) -> Result<(SqliteIntakeStore, PathBuf), AppError> {
    let path = match &args.database {
        Some(path) => path.clone(),
        None => AppConfig::load()?.database.path,
    };
    let store = SqliteIntakeStore::open(&path)?;
    Ok((store, path))
}
