pub mod metrics;
pub mod operators;
pub mod problem;
pub mod search;
pub mod types;
pub mod utils;
