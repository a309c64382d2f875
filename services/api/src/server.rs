use crate::cli::ServeArgs;
use crate::infra::{seeded_moderation, AppState};
use crate::routes::with_moderation_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;
use vehicle_market::clock::SystemClock;
use vehicle_market::config::AppConfig;
use vehicle_market::error::AppError;
use vehicle_market::telemetry;

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

    let moderation = seeded_moderation(
        Arc::new(SystemClock),
        config.moderation.clone(),
        &mut rand::rng(),
    )?;

    let app = with_moderation_routes(moderation)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "vehicle market moderation service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
