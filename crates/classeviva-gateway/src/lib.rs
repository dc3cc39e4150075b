//! # ClasseViva Gateway
//!
//! Cookie-session gateway in front of the ClasseViva student API. A login
//! exchanges credentials for an opaque session token; every resource route
//! then forwards through the upstream client bound to that session.

pub mod config;
pub mod handlers;
pub mod proxy;
pub mod routes;
pub mod session;
pub mod state;
pub mod upstream;
pub mod utils;

pub use config::Settings;
pub use routes::build_router;
pub use state::AppState;
