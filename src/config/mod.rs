//! Application configuration management

use std::env;

use anyhow::{Context, Result};
use sqlx::postgres::PgConnectOptions;

/// Database that always exists and is used for creating others
const MAINTENANCE_DATABASE: &str = "postgres";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// PostgreSQL user
    pub database_user: String,

    /// PostgreSQL host
    pub database_host: String,

    /// PostgreSQL database name
    pub database_name: String,

    /// PostgreSQL password
    pub database_password: String,

    /// PostgreSQL port
    pub database_port: u16,

    /// Maximum pool size
    pub max_connections: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 4000,
            database_user: "postgres".to_string(),
            database_host: "localhost".to_string(),
            database_name: "graphqldemo".to_string(),
            database_password: "password".to_string(),
            database_port: 5432,
            max_connections: 10,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        Ok(Self {
            port: match lookup("PORT") {
                Some(v) => v.parse().context("Invalid PORT")?,
                None => defaults.port,
            },

            database_user: lookup("POSTGRES_USER").unwrap_or(defaults.database_user),

            database_host: lookup("POSTGRES_HOST").unwrap_or(defaults.database_host),

            database_name: lookup("POSTGRES_DB").unwrap_or(defaults.database_name),

            database_password: lookup("POSTGRES_PASSWORD").unwrap_or(defaults.database_password),

            database_port: match lookup("POSTGRES_PORT") {
                Some(v) => v.parse().context("Invalid POSTGRES_PORT")?,
                None => defaults.database_port,
            },

            max_connections: match lookup("DATABASE_MAX_CONNECTIONS") {
                Some(v) => v.parse().context("Invalid DATABASE_MAX_CONNECTIONS")?,
                None => defaults.max_connections,
            },
        })
    }

    /// Connection options for the application database
    pub fn connect_options(&self) -> PgConnectOptions {
        self.admin_connect_options().database(&self.database_name)
    }

    /// Connection options for the maintenance database, used to create the
    /// application database
    ///
    /// Every session pins `standard_conforming_strings`, which the literal
    /// escaping in [SqlValue](crate::db::SqlValue) relies on.
    pub fn admin_connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.database_host)
            .port(self.database_port)
            .username(&self.database_user)
            .password(&self.database_password)
            .database(MAINTENANCE_DATABASE)
            .options([("standard_conforming_strings", "on")])
    }
}
