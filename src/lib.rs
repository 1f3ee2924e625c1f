//! Student API: CRUD over student records backed by SQLite.

pub mod config;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{AppConfig, DatabaseConfig, HttpConfig};
pub use error::{AppError, ConfigError, FieldViolation};
pub use model::{User, UserInput};
pub use routes::{app, common_routes, user_routes, with_middleware};
pub use service::UserService;
pub use state::AppState;
pub use store::{connect, ensure_tables};
