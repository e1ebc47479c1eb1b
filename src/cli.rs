//! Command line interface.
//!
//! `serve` runs the HTTP API. The other commands perform one maintenance task against
//! the configured database and exit.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use uuid::Uuid;

use crate::server::{
    config::Config,
    error::AppError,
    model::{api_key::ApiKeyParams, user::UserParams, user_group::UserGroupParams},
    router,
    scheduler::log_cleanup,
    service::{
        api_key::ApiKeyService, date_dimension::DateDimensionService, log::LogService,
        user::UserService, user_group::UserGroupService,
    },
    startup,
    state::AppState,
};

#[derive(Parser)]
#[command(name = "resource-api")]
#[command(about = "REST API for users, user groups, roles and API keys", version)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run pending migrations and serve the HTTP API
    Serve,
    /// Run pending migrations and exit
    Migrate,
    /// Create a user
    CreateUser {
        #[arg(long)]
        username: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "CREATE_USER_PASSWORD")]
        password: String,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        locale: Option<String>,
        #[arg(long)]
        timezone: Option<String>,
        /// Group ids, repeat the flag for several groups
        #[arg(long = "user-group")]
        user_groups: Vec<Uuid>,
    },
    /// Create a user group bound to a role
    CreateUserGroup {
        #[arg(long)]
        name: String,
        /// Role name, e.g. ROLE_ADMIN
        #[arg(long)]
        role: String,
    },
    /// Create an API key and print its token
    CreateApiKey {
        #[arg(long)]
        description: String,
        /// Group ids, repeat the flag for several groups
        #[arg(long = "user-group")]
        user_groups: Vec<Uuid>,
    },
    /// Fill the date dimension for a range of years; existing days are kept
    CreateDateDimension {
        #[arg(long)]
        from: i32,
        #[arg(long)]
        to: i32,
    },
    /// Delete request and login logs older than the retention period
    CleanupLogs {
        /// Overrides LOG_RETENTION_DAYS
        #[arg(long)]
        days: Option<i64>,
    },
    /// Print the OpenAPI document as JSON
    Openapi,
}

/// Runs the parsed command to completion.
pub async fn run(cli: Cli) -> Result<(), AppError> {
    if let Command::Openapi = cli.command {
        let document = router::openapi()
            .to_pretty_json()
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        println!("{}", document);
        return Ok(());
    }

    let config = Config::from_env()?;
    let db = startup::connect_to_database(&config).await?;

    match cli.command {
        Command::Serve => serve(db, config).await?,
        Command::Migrate => tracing::info!("Migrations are up to date"),
        Command::CreateUser {
            username,
            first_name,
            last_name,
            email,
            password,
            language,
            locale,
            timezone,
            user_groups,
        } => {
            let user = UserService::new(&db)
                .create(UserParams {
                    username: Some(username),
                    first_name: Some(first_name),
                    last_name: Some(last_name),
                    email: Some(email),
                    password: Some(password),
                    language,
                    locale,
                    timezone,
                    user_groups: Some(user_groups),
                })
                .await?;
            println!("Created user {} ({})", user.username, user.id);
        }
        Command::CreateUserGroup { name, role } => {
            let group = UserGroupService::new(&db)
                .create(UserGroupParams {
                    name: Some(name),
                    role: Some(role),
                })
                .await?;
            println!("Created user group {} ({})", group.name, group.id);
        }
        Command::CreateApiKey {
            description,
            user_groups,
        } => {
            let api_key = ApiKeyService::new(&db)
                .create(ApiKeyParams {
                    description: Some(description),
                    user_groups: Some(user_groups),
                })
                .await?;
            println!("Created API key {} with token {}", api_key.id, api_key.token);
        }
        Command::CreateDateDimension { from, to } => {
            let inserted = DateDimensionService::new(&db).generate(from, to).await?;
            println!("Inserted {} days", inserted);
        }
        Command::CleanupLogs { days } => {
            let result = LogService::new(&db)
                .cleanup(days.unwrap_or(config.log_retention_days))
                .await?;
            println!(
                "Removed {} request log and {} login log rows",
                result.log_requests, result.log_logins
            );
        }
        Command::Openapi => {}
    }

    Ok(())
}

async fn serve(db: sea_orm::DatabaseConnection, config: Config) -> Result<(), AppError> {
    let _scheduler = log_cleanup::start_scheduler(db.clone(), config.log_retention_days).await?;

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let app = router::router(AppState::new(db, config))?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }

    tracing::info!("Shutting down");
}
