/// Server configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment:
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_PATH | little_lemon.db | SQLite database file |
/// | DATABASE_MAX_CONNECTIONS | 5 | connection pool size |
/// | HTTP_HOST | 0.0.0.0 | bind address |
/// | HTTP_PORT | 8000 | HTTP port |
/// | ENVIRONMENT | development | development / staging / production |
/// | LOG_LEVEL | info | max tracing level |
/// | LOG_DIR | (unset) | daily rolling log directory |
/// | MENU_PAGE_SIZE | 10 | default page size of menu and booking lists |
/// | MAX_PAGE_SIZE | 100 | upper bound of a client-chosen page size |
/// | ORDER_PAGE_SIZE | 2 | default `perpage` of the manager order list |
/// | BOOKING_STRICT_OWNERSHIP | false | also require the creating user id to match |
///
/// # Example
///
/// ```ignore
/// DATABASE_PATH=/data/lemon.db HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite database file (`:memory:` for an ephemeral store)
    pub database_path: String,
    /// Connection pool size
    pub database_max_connections: u32,
    /// Bind host
    pub http_host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Max tracing level
    pub log_level: String,
    /// Rolling log directory
    pub log_dir: Option<String>,
    /// Default page size for `/api/menu/` and `/api/bookings/`
    pub menu_page_size: u32,
    /// Upper bound of any client-chosen page size
    pub max_page_size: u32,
    /// Default `perpage` for the manager order list
    pub order_page_size: u32,
    /// Require `booking.owner_id == caller` in addition to the name match
    pub booking_strict_ownership: bool,
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from the environment, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "little_lemon.db".into()),
            database_max_connections: env_or("DATABASE_MAX_CONNECTIONS", 5),
            http_host: std::env::var("HTTP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            http_port: env_or("HTTP_PORT", 8000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            menu_page_size: env_or("MENU_PAGE_SIZE", 10),
            max_page_size: env_or("MAX_PAGE_SIZE", 100),
            order_page_size: env_or("ORDER_PAGE_SIZE", 2),
            booking_strict_ownership: env_or("BOOKING_STRICT_OWNERSHIP", false),
        }
    }

    /// Override the database location and port
    ///
    /// Used by tests
    pub fn with_overrides(database_path: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.database_path = database_path.into();
        config.http_port = http_port;
        config
    }

    /// Is this a production deployment
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Is this a development deployment
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_keep_other_defaults() {
        let config = Config::with_overrides(":memory:", 9100);
        assert_eq!(config.database_path, ":memory:");
        assert_eq!(config.http_port, 9100);
        assert!(config.bind_addr().ends_with(":9100"));
        assert!(config.max_page_size >= config.menu_page_size);
    }

    #[test]
    fn environment_helpers() {
        let mut config = Config::with_overrides(":memory:", 0);
        config.environment = "production".into();
        assert!(config.is_production());
        assert!(!config.is_development());
    }
}
