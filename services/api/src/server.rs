use crate::cli::ServeArgs;
use crate::infra::{default_engine_config, seeded_catalog, AppState, InMemoryAdvisingStore};
use crate::routes::with_advising_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use counsel_ai::config::AppConfig;
use counsel_ai::error::AppError;
use counsel_ai::telemetry;
use counsel_ai::workflows::advising::{
    AdvisingService, RecommendationEngine, UniversityCatalog,
};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let catalog = match &config.catalog_path {
        Some(path) => UniversityCatalog::from_path(path)?,
        None => seeded_catalog(),
    };
    info!(universities = catalog.len(), "university catalog loaded");

    let store = Arc::new(InMemoryAdvisingStore::default());
    let engine = RecommendationEngine::new(default_engine_config());
    let advising_service = Arc::new(AdvisingService::new(Arc::new(catalog), store, engine));

    let app = with_advising_routes(advising_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "advising backend ready");

    axum::serve(listener, app).await?;
    Ok(())
}
