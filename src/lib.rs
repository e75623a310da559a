pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod models;
pub mod repository;
pub mod storage;

pub use error::TrackerError;
