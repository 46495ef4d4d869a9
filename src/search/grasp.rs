use rand::Rng;

use crate::operators::construction::greedy_randomized;
use crate::problem::Instance;
use crate::search::local::two_opt;
use crate::types::{Cost, Tour};

/// Candidate-list tightness values; one is drawn per construction.
const ALPHAS: [f64; 4] = [0.1, 0.2, 0.3, 0.4];

/// GRASP: repeat greedy randomized construction followed by 2-opt
/// refinement, keeping the best tour over all iterations.
pub fn grasp<R: Rng>(instance: &Instance, max_iter: usize, rng: &mut R) -> (Cost, Tour) {
    let mut best_tour = Tour::new();
    let mut best_cost = Cost::INFINITY;

    for _ in 0..max_iter {
        let alpha = ALPHAS[rng.random_range(0..ALPHAS.len())];

        let constructed = greedy_randomized(instance, alpha, rng);
        let (refined_cost, refined_tour) = two_opt(instance, constructed);

        if refined_cost < best_cost {
            best_cost = refined_cost;
            best_tour = refined_tour;
        }
    }

    (best_cost, best_tour)
}
