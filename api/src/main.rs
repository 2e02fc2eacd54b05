use actix_web::{web, HttpServer};
use std::sync::Arc;
use std::time::Duration;

use uh_api::{config, create_app, telemetry, AppState};
use uh_core::repositories::{
    InMemoryTokenRepository, InMemoryUserRepository, TokenRepository, UserRepository,
};
use uh_core::services::token::{TokenCleanupConfig, TokenCleanupService};
use uh_infra::database::{DatabasePool, MySqlTokenRepository, MySqlUserRepository};
use uh_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load()?;
    telemetry::init(&config.logging)?;

    tracing::info!(
        environment = %config.environment,
        bind = %config.server.bind_address(),
        "Starting Userhub API server"
    );

    if config.database.is_configured() {
        let pool = DatabasePool::new(config.database.clone()).await?;
        if config.database.run_migrations {
            pool.run_migrations().await?;
        }

        let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));
        let tokens = Arc::new(MySqlTokenRepository::new(pool.get_pool().clone()));
        let result = run(users, tokens, &config).await;

        tracing::info!("Closing database pool ({})", pool.get_statistics());
        pool.close().await;
        result
    } else {
        tracing::warn!("DATABASE_URL is not set, using in-memory storage");
        run(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryTokenRepository::new()),
            &config,
        )
        .await
    }
}

/// Serve the API over the given repositories until shutdown
async fn run<U, T>(users: Arc<U>, tokens: Arc<T>, config: &AppConfig) -> anyhow::Result<()>
where
    U: UserRepository + 'static,
    T: TokenRepository + 'static,
{
    let state = web::Data::new(AppState::new(users, tokens, &config.auth));

    let cleanup = Arc::new(TokenCleanupService::new(
        state.token_service.clone(),
        TokenCleanupConfig {
            interval_seconds: config.auth.token.cleanup_interval_seconds,
            ..TokenCleanupConfig::default()
        },
    ));
    let cleanup_task = cleanup.start_background_task();

    let app_config = config.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), &app_config))
        .keep_alive(Duration::from_secs(config.server.keep_alive));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(config.server.bind_address())?.run().await?;

    if let Some(task) = cleanup_task {
        task.abort();
    }
    tracing::info!("Server stopped");
    Ok(())
}
