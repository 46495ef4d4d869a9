use crate::problem::Instance;
use crate::types::{Cost, Tour};
use crate::utils::Matrix2;

/// Tabu search over the 2-opt neighborhood.
///
/// Each iteration applies the best admissible segment reversal in the
/// whole neighborhood, even when it worsens the tour. The city pair whose
/// edge was just touched is tabu for `tenure` iterations, unless a tabu
/// move would beat the global best (aspiration).
pub fn tabu_search(
    instance: &Instance,
    initial: Tour,
    max_iter: usize,
    tenure: usize,
) -> (Cost, Tour) {
    let n = initial.len();
    let mut current_tour = initial;
    let mut current_cost = instance.tour_cost(&current_tour);

    let mut best_tour = current_tour.clone();
    let mut best_cost = current_cost;

    if n < 4 {
        return (best_cost, best_tour);
    }

    // expiration[a][b] holds the iteration until which reversing between
    // cities a and b stays forbidden.
    let mut expiration: Matrix2<usize> = Matrix2::new(n, n, 0);

    for iter in 1..=max_iter {
        let mut best_neighbor_cost = Cost::INFINITY;
        let mut best_move = None;

        for i in 1..(n - 1) {
            for j in (i + 1)..n {
                let removed = instance.distance(current_tour[i - 1], current_tour[i])
                    + instance.distance(current_tour[j], current_tour[(j + 1) % n]);
                let added = instance.distance(current_tour[i - 1], current_tour[j])
                    + instance.distance(current_tour[i], current_tour[(j + 1) % n]);
                let neighbor_cost = current_cost + (added - removed);

                let a = current_tour[i] as usize;
                let b = current_tour[j] as usize;
                let mut is_tabu = *expiration.get(a, b) > iter;

                // Aspiration: a tabu move that beats the global best is
                // admitted anyway.
                if is_tabu && neighbor_cost < best_cost {
                    is_tabu = false;
                }

                if !is_tabu && neighbor_cost < best_neighbor_cost {
                    best_neighbor_cost = neighbor_cost;
                    best_move = Some((i, j));
                }
            }
        }

        let Some((i, j)) = best_move else {
            // Entire neighborhood tabu; nothing admissible this iteration.
            continue;
        };

        let a = current_tour[i] as usize;
        let b = current_tour[j] as usize;

        current_tour[i..=j].reverse();
        current_cost = best_neighbor_cost;

        *expiration.get_mut(a, b) = iter + tenure;
        *expiration.get_mut(b, a) = iter + tenure;

        if current_cost < best_cost {
            best_tour = current_tour.clone();
            best_cost = current_cost;
        }
    }

    (best_cost, best_tour)
}
