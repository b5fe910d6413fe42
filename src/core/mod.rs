pub mod cache;
pub mod cli;
pub mod context;
pub mod lookup;
pub mod models;
pub mod repository;
pub mod seed;
pub mod types;
