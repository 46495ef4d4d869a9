use crate::problem::Instance;
use crate::types::{Cost, Tour};

/// 2-opt descent: repeatedly reverses the segment between two tour
/// positions whenever the two replaced edges cost more than the two new
/// ones, until no improving move remains.
pub fn two_opt(instance: &Instance, mut tour: Tour) -> (Cost, Tour) {
    let n = tour.len();
    let mut best_cost = instance.tour_cost(&tour);
    if n < 4 {
        return (best_cost, tour);
    }

    let mut improved = true;
    while improved {
        improved = false;
        for i in 1..(n - 1) {
            for j in (i + 1)..n {
                let removed = instance.distance(tour[i - 1], tour[i])
                    + instance.distance(tour[j], tour[(j + 1) % n]);
                let added = instance.distance(tour[i - 1], tour[j])
                    + instance.distance(tour[i], tour[(j + 1) % n]);

                if added < removed {
                    tour[i..=j].reverse();
                    best_cost -= removed - added;
                    improved = true;
                }
            }
        }
    }

    (best_cost, tour)
}
