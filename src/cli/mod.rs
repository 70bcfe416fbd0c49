use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::auth::{generate_jwt, Claims, Role};
use crate::config;
use crate::store;
use crate::Stores;

#[derive(Parser)]
#[command(name = "campus-api")]
#[command(about = "Campus API - role-gated CRUD backend for campus resources")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the HTTP server (the default)")]
    Serve {
        #[arg(long, help = "Port to listen on (overrides PORT and config)")]
        port: Option<u16>,
    },

    #[command(about = "Mint a development JWT signed with the configured secret")]
    Token {
        #[arg(long, help = "Subject (username) for the token")]
        sub: String,

        #[arg(
            long,
            default_value = "USER",
            value_delimiter = ',',
            help = "Roles to grant (USER, ADMIN)"
        )]
        roles: Vec<Role>,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Serve { port: None }) {
        Commands::Serve { port } => serve(port).await,
        Commands::Token { sub, roles } => token(sub, roles),
    }
}

async fn serve(port_override: Option<u16>) -> anyhow::Result<()> {
    let config = config::config();
    tracing::info!("Starting Campus API in {:?} mode", config.environment);

    // DATABASE_URL selects the Postgres backend; without it records live
    // in process memory and vanish on restart.
    let stores = match std::env::var("DATABASE_URL") {
        Ok(url) => {
            let pool = store::postgres::connect(&url).await?;
            store::postgres::migrate(&pool).await?;
            Stores::postgres(pool)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set; using the in-memory store");
            Stores::in_memory()
        }
    };

    let app = crate::app(stores);

    let port = port_override.unwrap_or(config.server.port);
    let bind_addr = format!("{}:{}", config.server.bind_address, port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    println!("🚀 Campus API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server")?;
    Ok(())
}

fn token(sub: String, roles: Vec<Role>) -> anyhow::Result<()> {
    let claims = Claims::new(sub, roles);
    let token = generate_jwt(claims)?;
    println!("{}", token);
    Ok(())
}
