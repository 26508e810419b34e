use std::io;
use std::sync::Arc;
use std::time::Instant;

use actix_web::dev::Service as _;
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{middleware::Logger, web, App, HttpServer};
use storefront_backend::api::routes::{self, AppState};
use storefront_backend::application::{CategoryService, TreeOptions};
use storefront_backend::config::AppConfig;
use storefront_backend::infrastructure::db::{migrations::run_migrations, pool::create_pool};
use storefront_backend::infrastructure::repositories::CategoryRepositoryImpl;
use storefront_backend::middleware::request_logging::{
    create_request_span, get_client_ip, get_status_class, get_user_agent, RequestSummary,
};
use storefront_backend::observability::error_tracking::capture_server_error;
use storefront_backend::observability::AppMetrics;
use storefront_backend::security::{cors_middleware, security_headers};
use tracing::{info, warn, Instrument};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().map_err(io::Error::other)?;
    config.validate().map_err(io::Error::other)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    if config.logging.json_format {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_span_list(true),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty())
            .init();
    }

    let pool = create_pool(&config.database)
        .await
        .map_err(io::Error::other)?;

    run_migrations(&pool).await.map_err(io::Error::other)?;

    let category_repo = Arc::new(CategoryRepositoryImpl::new(pool.clone()));
    let category_service = CategoryService::new(category_repo)
        .with_tree_options(TreeOptions::from(&config.catalog));

    let state = AppState {
        category_service: Arc::new(category_service),
        security: config.security.clone(),
        metrics: Arc::new(AppMetrics::default()),
        db_pool: Some(pool.clone()),
    };

    let bind_host = config.app.host.clone();
    let bind_port = config.app.port;
    let security_config = config.security.clone();
    let metrics = state.metrics.clone();

    info!(
        host = %bind_host,
        port = bind_port,
        environment = %config.app.environment,
        strategy = ?config.catalog.strategy,
        "starting storefront backend"
    );

    HttpServer::new(move || {
        let metrics = metrics.clone();
        App::new()
            .wrap(Logger::default())
            .wrap_fn(move |req, srv| {
                let summary = RequestSummary::from_request(&req);
                let span = create_request_span(
                    &summary,
                    &get_client_ip(&req),
                    &get_user_agent(&req),
                );
                let metrics = metrics.clone();
                let start = Instant::now();

                let fut = srv.call(req);
                async move {
                    let mut response = fut.await?;
                    response.headers_mut().insert(
                        HeaderName::from_static("x-request-id"),
                        HeaderValue::from_str(&summary.request_id)
                            .unwrap_or_else(|_| HeaderValue::from_static("invalid-request-id")),
                    );

                    let status = response.status().as_u16();
                    let latency_ms = start.elapsed().as_millis() as u64;
                    metrics.record_request(status, latency_ms);

                    info!(
                        status = status,
                        status_class = get_status_class(status),
                        latency_ms = latency_ms,
                        "request completed"
                    );

                    if status >= 500 {
                        if let Err(error) = capture_server_error(&summary, status) {
                            warn!(error = %error, "failed to capture server error");
                        }
                    }
                    Ok(response)
                }
                .instrument(span)
            })
            .wrap(cors_middleware(&security_config))
            .wrap(security_headers())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
    })
    .bind((bind_host, bind_port))?
    .run()
    .await
}
