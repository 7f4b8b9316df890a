pub mod api;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod seed;
pub mod services;
