//! Seed the database with the demo user and boards
//!
//! Reads the same environment as the server (`DATABASE_URL`, `BCRYPT_COST`,
//! ...), runs migrations, then creates the demo data.

use taskboard::backend::seed::{seed_demo_data, DEMO_EMAIL, DEMO_PASSWORD};
use taskboard::backend::server::config::load_database;
use taskboard::backend::server::{AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("taskboard=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let pool = load_database(&config).await?;
    let state = AppState::new(pool, &config);

    let summary = seed_demo_data(&state).await?;
    println!(
        "Seeded {} boards, {} lists and {} cards for {} (password: {})",
        summary.boards, summary.lists, summary.cards, DEMO_EMAIL, DEMO_PASSWORD
    );

    Ok(())
}
