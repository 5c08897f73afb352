use shopcore_api::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shopcore_observability::init();

    let config = Config::from_env()?;
    let app = shopcore_api::app::build_app(&config.jwt_secret);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
