use kitchen_server::{Config, Server, init_logger_with_file};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // dotenv is best-effort, a missing .env file is fine
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    init_logger_with_file(
        std::env::var("LOG_LEVEL").ok().as_deref(),
        config.log_dir.as_deref(),
    );

    tracing::info!(
        environment = %config.environment,
        port = config.http_port,
        "kitchen server starting"
    );

    let server = Server::new(config).await?;
    if let Err(e) = server.run().await {
        tracing::error!("server error: {e}");
        return Err(e.into());
    }

    Ok(())
}
