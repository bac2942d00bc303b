// Frameworks layer: configuration, command line and process bootstrap.

pub mod cli;
pub mod config;
pub mod runner;
