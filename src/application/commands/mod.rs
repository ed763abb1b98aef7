// src/application/commands/mod.rs
pub mod audit;
pub mod mutation;
