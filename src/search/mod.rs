pub mod annealing;
mod bound;
pub mod colony;
pub mod exact;
mod frontier;
pub mod genetic;
pub mod grasp;
pub mod ils;
pub mod local;
mod node;
pub mod tabu;

pub use bound::lower_bound;
pub use exact::branch_and_bound;
pub use frontier::Frontier;
pub use node::SearchNode;

#[cfg(test)]
mod tests;
