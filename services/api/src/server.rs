use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_operational_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;
use yakkai_wellness::config::AppConfig;
use yakkai_wellness::error::AppError;
use yakkai_wellness::intake::{IntakeService, SqliteIntakeStore};
use yakkai_wellness::telemetry;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(path) = args.database.database.take() {
        config.database.path = path;
    }

    telemetry::init(&config.telemetry)?;

    let store = Arc::new(SqliteIntakeStore::open(&config.database.path)?);
    let db_initialized = Arc::new(AtomicBool::new(store.is_initialized()?));
    info!(path = %config.database.path.display(), "database tables created/verified");

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        db_initialized,
        metrics: Arc::new(prometheus_handle),
    };

    let intake_service = Arc::new(IntakeService::new(store));
    let app = with_operational_routes(intake_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "wellness intake service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
