//! # Sitecraft Server
//!
//! Local design server for the Sitecraft website builder.
//! Binds to localhost only.

use axum::http::{header, HeaderValue, Method};
use clap::Parser;
use site_core::ProjectStore;
use site_export::SiteExporter;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use site_server::{router, AppState, ServerConfig};

/// Build a CORS layer that only allows localhost origins.
fn build_cors_layer(port: u16) -> CorsLayer {
    let localhost_origins = [
        format!("http://localhost:{port}"),
        format!("http://127.0.0.1:{port}"),
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(), // Vite
        "http://127.0.0.1:3000".to_string(),
        "http://127.0.0.1:5173".to_string(),
    ];

    let origins: Vec<HeaderValue> = localhost_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: info,site_server=debug,tower_http=debug).
/// Set `RUST_LOG_FORMAT=json` for JSON output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,site_server=debug,tower_http=debug"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Open the project store, loading persisted projects when a data directory is set.
fn open_store(config: &ServerConfig) -> anyhow::Result<ProjectStore> {
    let history = config.history_config();
    let Some(dir) = &config.data_dir else {
        tracing::info!("No data directory configured; projects live in memory only");
        return Ok(ProjectStore::new().with_history_config(history));
    };

    let store = ProjectStore::with_data_dir(dir)?.with_history_config(history);
    let loaded = store.load_all()?;
    tracing::info!(
        dir = %dir.display(),
        projects = loaded.len(),
        "Loaded persisted projects"
    );
    Ok(store)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ServerConfig::parse();
    let store = open_store(&config)?;
    let state = AppState::new(store, SiteExporter::new(config.export_config()));

    let app = router(state).layer(
        ServiceBuilder::new()
            // Request ID for log correlation
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(build_cors_layer(config.port)),
    );

    // Bind to localhost ONLY
    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Sitecraft server starting on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
