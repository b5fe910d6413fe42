pub mod config;
pub mod core;
pub mod diagram;
pub mod errors;
pub mod extensions;
pub mod logging;
pub mod port;
pub mod schedule;
pub mod ui;
