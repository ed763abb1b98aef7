// src/application/mod.rs
pub mod cache;
pub mod commands;
pub mod dto;
pub mod error;
pub mod ports;
pub mod queries;
pub mod services;
pub mod snapshot;

pub use error::ApplicationResult;
