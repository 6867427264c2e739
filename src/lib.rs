pub mod config;
pub mod errors;
pub mod observability;
pub mod ops;
pub mod parallel;
pub mod runner;
pub mod table;
