//! Command line and environment configuration.

use std::net::SocketAddr;

use clap::Parser;

use crate::db::DEFAULT_MAX_CONNECTIONS;

#[derive(Debug, Clone, Parser)]
#[command(name = "trivia-api", version, about = "Trivia question bank REST API")]
pub struct Config {
    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://trivia.db?mode=rwc")]
    pub database_url: String,

    /// Address to listen on
    #[arg(long, env = "TRIVIA_BIND", default_value = "127.0.0.1:3001")]
    pub bind: SocketAddr,

    /// Upper bound on pooled database connections
    #[arg(long, env = "TRIVIA_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Insert the standard categories and starter questions on startup
    #[arg(long, env = "TRIVIA_SEED")]
    pub seed: bool,
}
