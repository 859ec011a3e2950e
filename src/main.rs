use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use asistencia_backend::{
    config::{get_config, init_config},
    database::{pool::create_pool, repository::MySqlRepository},
    middleware::cors::api_cors,
    routes,
    storage::create_storage,
    AppState,
};
use axum::extract::DefaultBodyLimit;
use reqwest::Client;
use tokio::net::TcpListener;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json") {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await.map_err(|e| {
        error!("Could not connect to MySQL: {}", e);
        e
    })?;
    info!(
        host = %config.database.host,
        database = %config.database.name,
        "Connected to MySQL"
    );

    sqlx::migrate!("./migrations").run(&pool).await?;

    let http_client = Client::builder()
        .timeout(Duration::from_secs(60))
        .build()?;
    let storage = create_storage(&config.storage, http_client)?;
    let app_state = AppState::new(Arc::new(MySqlRepository::new(pool)), storage);

    let mut app = routes::router(app_state);
    if let Some(upload_path) = config.public_uploads_dir() {
        info!("Serving uploads from: {}", upload_path.display());
        app = app.nest_service("/uploads", ServeDir::new(upload_path));
    }

    let app = app
        .layer(api_cors())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(config.max_upload_bytes));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
