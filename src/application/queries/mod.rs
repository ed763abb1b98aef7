// src/application/queries/mod.rs
pub mod audit;
