use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_subscriber::{fmt, EnvFilter};

use folio_api::{create_app, AppState};
use folio_core::services::PasswordHasher;
use folio_infra::database::{DatabasePool, SqliteUserRepository};
use folio_infra::email::create_email_notifier;
use folio_infra::oauth::HttpOAuthClient;
use folio_infra::seed::{seed_editor, SeedOutcome, SeedUser};
use folio_shared::config::{AppConfig, LogFormat, LoggingConfig};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    init_tracing(&config.logging);

    tracing::info!(
        environment = ?config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting Folio API server"
    );
    if config.auth.session.is_using_default_secret() {
        tracing::warn!("SESSION_SECRET is not set, using the development secret");
    }

    let database = DatabasePool::new(config.database.clone())
        .await
        .context("connecting to the database")?;
    database
        .run_migrations()
        .await
        .context("creating the schema")?;

    if let Some(seed) = SeedUser::from_env() {
        let users = SqliteUserRepository::new(database.get_pool().clone());
        let hasher = PasswordHasher::from_config(&config.auth.hashing);
        let username = seed.username.clone();
        match seed_editor(&users, &hasher, seed).await {
            Ok(SeedOutcome::Created) => tracing::info!(%username, "Seeded editor account"),
            Ok(SeedOutcome::AlreadyPresent) => {
                tracing::debug!(%username, "Editor account already present")
            }
            Err(e) => tracing::error!(%username, error = %e, "Failed to seed editor account"),
        }
    }

    let notifier = create_email_notifier(&config.email);
    let oauth_client = HttpOAuthClient::new(config.auth.oauth.clone())
        .context("building the OAuth client")?;
    tracing::info!(
        google = config.auth.oauth.google.is_some(),
        github = config.auth.oauth.github.is_some(),
        "OAuth sign-in providers"
    );
    let state = web::Data::new(AppState::new(
        database,
        &config,
        notifier,
        Arc::new(oauth_client),
    ));

    let bind_address = config.server.bind_address();
    tracing::info!(address = %bind_address, "Listening");

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("binding {}", bind_address))?
        .run()
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Install the global subscriber; `RUST_LOG` wins over the configured level
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = fmt()
        .with_env_filter(filter)
        .with_ansi(logging.colored)
        .with_file(logging.source_location)
        .with_line_number(logging.source_location);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}
