use crate::cli::ServeArgs;
use crate::infra::{load_store, AppState};
use crate::routes::with_scholarship_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use scholar_track::config::AppConfig;
use scholar_track::error::AppError;
use scholar_track::telemetry;
use scholar_track::tracker::ScholarshipService;
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
    if let Some(seed_csv) = args.seed_csv.take() {
        config.store.seed_csv = Some(seed_csv);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = load_store(config.store.seed_csv.as_deref())?;
    if let Some(path) = &config.store.seed_csv {
        let seeded = store.len()?;
        info!(records = seeded, path = %path.display(), "seeded scholarship store");
    }
    let service = Arc::new(ScholarshipService::new(Arc::new(store)));

    let app = with_scholarship_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "scholarship tracker ready");

    axum::serve(listener, app).await?;
    Ok(())
}
