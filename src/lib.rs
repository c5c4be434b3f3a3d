pub mod app;
pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod messages;
pub mod models;
pub mod services;
pub mod state;
pub mod validation;
