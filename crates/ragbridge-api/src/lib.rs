pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod state;

pub use config::Config;
pub use router::build_router;
pub use state::AppState;
