use checkin_glados::{init_log_env, run, Config};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_log_env()?;
    let config = Config::from_env();
    info!(
        "cookie set: {}, notify token set: {}",
        config.cookie.is_some(),
        config.notify_token.is_some()
    );
    run(&config).await?;
    Ok(())
}
