use rand::Rng;

use crate::operators::perturbation::double_bridge;
use crate::problem::Instance;
use crate::search::local::two_opt;
use crate::types::{Cost, Tour};

/// Iterated local search: descend to a 2-opt local optimum, then
/// repeatedly kick the tour with a double bridge, descend again and keep
/// the candidate only when it improves.
pub fn iterated_local_search<R: Rng>(
    instance: &Instance,
    initial: Tour,
    max_iter: usize,
    rng: &mut R,
) -> (Cost, Tour) {
    let (mut current_cost, mut current_tour) = two_opt(instance, initial);

    let mut best_tour = current_tour.clone();
    let mut best_cost = current_cost;

    for _ in 0..max_iter {
        let candidate = double_bridge(&current_tour, rng);
        let (candidate_cost, candidate_tour) = two_opt(instance, candidate);

        if candidate_cost < current_cost {
            current_tour = candidate_tour;
            current_cost = candidate_cost;

            if current_cost < best_cost {
                best_tour = current_tour.clone();
                best_cost = current_cost;
            }
        }
    }

    (best_cost, best_tour)
}
