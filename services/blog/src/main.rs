use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod config;
mod error;
mod jwt;
mod middleware;
mod models;
mod password;
mod repositories;
mod routes;
mod state;
mod validation;

use common::database::{DatabaseConfig, init_pool};
use tokio::net::TcpListener;

use crate::config::AppConfig;
use crate::jwt::TokenService;
use crate::repositories::{PostRepository, UserRepository, VoteRepository};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting blog service");

    // Build the full configuration once; everything downstream receives it
    // through AppState.
    let config = AppConfig::from_env()?;

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    // Check database connectivity
    if common::database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    // Apply pending schema migrations
    sqlx::migrate!().run(&pool).await?;

    let token_service = TokenService::new(&config.auth);
    let user_repository = UserRepository::new(pool.clone());
    let post_repository = PostRepository::new(pool.clone());
    let vote_repository = VoteRepository::new(pool.clone());

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let app_state = AppState {
        db_pool: pool,
        config,
        token_service,
        user_repository,
        post_repository,
        vote_repository,
    };

    info!("Blog service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = TcpListener::bind(&addr).await?;
    info!("Blog service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
