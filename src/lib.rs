//! RESTful API skeleton.
//!
//! Settings, structured logging, a SQLite handle, health/readiness probes and
//! placeholder item routes, composed by [`lifecycle::AppFactory`].

pub mod api;
pub mod config;
pub mod db;
pub mod docs;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod models;
pub mod observability;

pub use config::Settings;
pub use http::HttpServer;
pub use lifecycle::{create_app, App, AppFactory, Shutdown, StartupError};
