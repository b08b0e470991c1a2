use store_server::{Config, Server, setup_environment};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. dotenv + logging
    setup_environment();

    tracing::info!("Store server starting...");

    // 2. Configuration
    let config = Config::from_env();

    // 3. Serve (opens the database and applies migrations first)
    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
