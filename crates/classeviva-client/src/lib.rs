//! # ClasseViva Client
//!
//! Async client for the ClasseViva (Spaggiari) student REST API: login,
//! resource categories and their request parameters.

pub mod client;
pub mod error;
pub mod models;
pub mod params;
pub mod resource;

pub use client::{ClasseVivaClient, ClientConfig, StudentSession};
pub use error::ClientError;
pub use models::Identity;
pub use params::{AgendaRange, RequestParams};
pub use resource::{ResourceCategory, UnknownCategory};
