// src/domain/mod.rs
pub mod audit;
pub mod cache;
pub mod errors;
pub mod tracker;
