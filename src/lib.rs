pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod resources;
pub mod router;
pub mod session;
pub mod ui;
pub mod validation;
pub mod views;
