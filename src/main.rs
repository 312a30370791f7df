// src/main.rs

use dotenvy::dotenv;
use quiz_runner::config::Config;
use quiz_runner::logging;
use quiz_runner::models::question::QuestionBank;
use quiz_runner::routes;
use quiz_runner::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    // Initialize Tracing (Logging)
    let _guard = logging::init_with_stdout(&config.rust_log, "server.log");

    if let Err(e) = run(config).await {
        tracing::error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let bank = QuestionBank::load(&config.bank_path)?;
    tracing::info!(
        "Loaded {} questions from {}",
        bank.len(),
        config.bank_path.display()
    );

    let addr = config.socket_addr()?;

    // Create AppState
    let state = AppState::new(bank);

    // Create the Axum application router
    let app = routes::create_router(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Start the server
    axum::serve(listener, app).await?;
    Ok(())
}
