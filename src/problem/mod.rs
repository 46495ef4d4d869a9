mod bks;
mod instance;
pub mod tsplib;

pub use bks::optimal_tour_length;
pub use instance::Instance;
