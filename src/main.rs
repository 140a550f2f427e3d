use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use axum_prometheus::PrometheusMetricLayer;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use wechat_cover_server::config::Config;
use wechat_cover_server::fetch::ReqwestFetcher;
use wechat_cover_server::handlers::{self, assets};
use wechat_cover_server::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing: JSON in production, human-readable in dev.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "wechat_cover_server=info,tower_http=info"
            .parse()
            .unwrap()
    });

    if std::env::var("APP_ENV").as_deref() == Ok("production") {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!("🚀 WeChat cover server starting...");

    let config = Config::from_env();
    info!(
        dev = config.is_dev,
        article_timeout = ?config.article_timeout,
        image_timeout = ?config.image_timeout,
        "📝 Configuration loaded"
    );

    let fetcher =
        ReqwestFetcher::new(config.fetch_settings()).expect("Failed to build HTTP client");

    let app_state = AppState {
        fetcher: Arc::new(fetcher),
    };

    // The API is public and keyless, so any origin may call it.
    let cors = CorsLayer::permissive();

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let static_dir = config.static_dir.clone();
    info!("📂 Static directory: {}", static_dir.display());

    let app = Router::new()
        // Health check + metrics
        .route("/health", get(handlers::health_check))
        .route(
            "/metrics",
            get(move || async move { metric_handle.render() }),
        )
        // Cover API
        .route("/api/parse", post(handlers::parse::parse_article_cover))
        .route("/api/docs.json", get(handlers::docs::api_docs_json))
        // Static pages
        .merge(assets::router(&static_dir))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(prometheus_layer)
        .layer(cors)
        .with_state(app_state);

    let addr = config.server_addr();
    info!("🎧 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .await
        .expect("Server failed to start");
}
