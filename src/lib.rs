pub mod cli;
pub mod collector;
pub mod config;
pub mod error;
pub mod export;
pub mod github;
pub mod models;
pub mod paginate;
pub mod types;
