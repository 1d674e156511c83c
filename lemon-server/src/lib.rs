//! Little Lemon Server - restaurant ordering platform
//!
//! # Architecture
//!
//! - **Catalog** (`api::categories`, `api::menu`): categories and menu items
//! - **Cart Manager** (`cart`): single pending cart line per user
//! - **Order Lifecycle Engine** (`orders`): checkout, assignment, delivery status
//! - **Booking Manager** (`bookings`): table reservations owned by name
//! - **Authorization Policy** (`auth::policy`): one capability table for every decision
//!
//! # Module layout
//!
//! ```text
//! lemon-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # tokens, role resolution, policy, middleware
//! ├── db/            # SQLite pool + repositories
//! ├── cart/          # Cart Manager
//! ├── orders/        # Order Lifecycle Engine
//! ├── bookings/      # Booking Manager
//! ├── api/           # HTTP handlers per resource
//! ├── middleware/    # request logging
//! ├── routes/        # router assembly
//! └── utils/         # logger, validation, list queries
//! ```

pub mod api;
pub mod auth;
pub mod bookings;
pub mod cart;
pub mod core;
pub mod db;
pub mod middleware;
pub mod orders;
pub mod routes;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, Role, RoleSet};
pub use core::{Config, Server, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env` and initialize logging from `LOG_LEVEL` / `LOG_DIR`
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    if let Some(dir) = &log_dir {
        std::fs::create_dir_all(dir)?;
    }
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __    _ __  __  __        __
   / /   (_) /_/ /_/ /__     / /   ___  ____ ___  ____  ____
  / /   / / __/ __/ / _ \   / /   / _ \/ __ `__ \/ __ \/ __ \
 / /___/ / /_/ /_/ /  __/  / /___/  __/ / / / / / /_/ / / / /
/_____/_/\__/\__/_/\___/  /_____/\___/_/ /_/ /_/\____/_/ /_/
    "#
    );
}
