use passgate_api::config::ApiConfig;
use passgate_auth::ExpirationPolicy;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    passgate_observability::init();

    let ApiConfig {
        addr,
        jwt_secret,
        password_expiration_after_days,
    } = ApiConfig::from_env()?;

    let policy = ExpirationPolicy::new(password_expiration_after_days);
    let app = passgate_api::app::build_app(jwt_secret, policy);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
