pub mod config;
pub mod probe;
pub mod report;
pub mod runner;
