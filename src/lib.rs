pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod probes;
pub mod report;
pub mod startup;
pub mod utils;
