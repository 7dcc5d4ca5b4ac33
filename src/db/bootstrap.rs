//! Database bootstrap helpers
//!
//! Identifier checks for names that get interpolated into SQL, and creation of
//! the target database itself (used by test fixtures and first-run setups).

use once_cell::sync::Lazy;
use regex::Regex;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, Connection};
use tracing::info;

use super::repository::{RepositoryError, RepositoryResult};

static IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("valid identifier regex"));

/// Reject anything that is not a plain, unquoted SQL identifier.
pub fn validate_identifier(name: &str) -> RepositoryResult<()> {
    if IDENTIFIER_RE.is_match(name) {
        Ok(())
    } else {
        Err(RepositoryError::InvalidIdentifier(name.to_string()))
    }
}

/// Create database `name` through the maintenance connection `admin` unless it
/// already exists.
///
/// `admin` should point at a database that always exists (usually `postgres`).
pub async fn ensure_database_exists(admin: &PgConnectOptions, name: &str) -> RepositoryResult<()> {
    validate_identifier(name)?;

    let mut conn = admin.connect().await?;

    let result = async {
        let exists: Option<i32> = sqlx::query_scalar("SELECT 1 FROM pg_database WHERE datname = $1")
            .bind(name)
            .fetch_optional(&mut conn)
            .await?;

        if exists.is_none() {
            sqlx::query(&format!("CREATE DATABASE \"{}\"", name))
                .execute(&mut conn)
                .await?;
            info!(database = %name, "Database created");
        }

        Ok::<_, sqlx::Error>(())
    }
    .await;

    conn.close().await?;
    result?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_valid_identifiers() {
        for name in ["leads", "graphqldemo_test", "_private", "Leads2"] {
            assert!(validate_identifier(name).is_ok(), "{} should be valid", name);
        }
    }

    #[test]
    fn test_invalid_identifiers() {
        for name in ["", "2leads", "leads-table", "leads table", "leads\"; DROP", "lëads"] {
            assert_matches!(
                validate_identifier(name),
                Err(RepositoryError::InvalidIdentifier(n)) if n == name
            );
        }
    }
}
