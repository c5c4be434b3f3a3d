pub mod appointments;
pub mod auth;
pub mod extract;
pub mod pages;
