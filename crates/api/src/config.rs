use std::path::PathBuf;

use roster_core::upload::DEFAULT_MAX_FILES;

/// Which record store the server runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// PostgreSQL via `DATABASE_URL` or the `DB_*` variables.
    Postgres,
    /// In-process store; data is lost on restart.
    Memory,
}

impl StoreBackend {
    fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("memory") {
            StoreBackend::Memory
        } else {
            StoreBackend::Postgres
        }
    }
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for the store to close after shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Directory uploaded files are written to and served from.
    pub upload_dir: PathBuf,
    /// Maximum files accepted by one create request.
    pub max_upload_files: usize,
    /// Maximum request body size in bytes for multipart uploads.
    pub max_upload_bytes: usize,
    pub store_backend: StoreBackend,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `5000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    /// | `UPLOAD_DIR`           | `uploads`                  |
    /// | `MAX_UPLOAD_FILES`     | `10`                       |
    /// | `MAX_UPLOAD_BYTES`     | `20971520` (20 MiB)        |
    /// | `STORE_BACKEND`        | `postgres`                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let upload_dir =
            PathBuf::from(std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into()));

        let max_upload_files: usize = std::env::var("MAX_UPLOAD_FILES")
            .unwrap_or_else(|_| DEFAULT_MAX_FILES.to_string())
            .parse()
            .expect("MAX_UPLOAD_FILES must be a valid usize");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| (20 * 1024 * 1024).to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let store_backend = std::env::var("STORE_BACKEND")
            .map(|v| StoreBackend::parse(&v))
            .unwrap_or(StoreBackend::Postgres);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            upload_dir,
            max_upload_files,
            max_upload_bytes,
            store_backend,
        }
    }
}

/// Resolve the PostgreSQL connection URL.
///
/// `DATABASE_URL` wins when set. Otherwise the URL is assembled from
/// `DB_HOST` (`localhost`), `DB_PORT` (`5432`), `DB_USER`, `DB_PASSWORD`
/// and `DB_NAME` (`employee_db`).
pub fn database_url_from_env() -> String {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return url;
    }

    let host = std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".into());
    let port = std::env::var("DB_PORT").unwrap_or_else(|_| "5432".into());
    let user = std::env::var("DB_USER").expect("DATABASE_URL or DB_USER must be set");
    let password = std::env::var("DB_PASSWORD").unwrap_or_default();
    let name = std::env::var("DB_NAME").unwrap_or_else(|_| "employee_db".into());

    database_url(&host, &port, &user, &password, &name)
}

fn database_url(host: &str, port: &str, user: &str, password: &str, name: &str) -> String {
    if password.is_empty() {
        format!("postgres://{user}@{host}:{port}/{name}")
    } else {
        format!("postgres://{user}:{password}@{host}:{port}/{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_backend_parses_memory_only() {
        assert_eq!(StoreBackend::parse("memory"), StoreBackend::Memory);
        assert_eq!(StoreBackend::parse(" MEMORY "), StoreBackend::Memory);
        assert_eq!(StoreBackend::parse("postgres"), StoreBackend::Postgres);
        assert_eq!(StoreBackend::parse("sqlite"), StoreBackend::Postgres);
    }

    #[test]
    fn database_url_with_and_without_password() {
        assert_eq!(
            database_url("db", "5432", "app", "secret", "employee_db"),
            "postgres://app:secret@db:5432/employee_db"
        );
        assert_eq!(
            database_url("localhost", "6543", "app", "", "roster"),
            "postgres://app@localhost:6543/roster"
        );
    }
}
