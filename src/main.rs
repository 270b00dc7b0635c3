use dotenvy::dotenv;
use varsity::logging::init_tracing;
use varsity::router::init_router;
use varsity::state::init_app_state;
use varsity_config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = AppConfig::from_env();
    let _log_guards = init_tracing(&config.logging)?;

    let state = init_app_state(&config).await?;
    let app = init_router(state);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        storage = %config.server.storage_backend,
        "Server running on http://{}",
        addr
    );
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);
    tracing::info!("Scalar UI available at http://{}/scalar", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
