use rand::Rng;

use crate::operators::construction::nearest_neighbor;
use crate::problem::Instance;
use crate::types::{City, Cost, Tour};
use crate::utils::Matrix2;

/// Ant colony system parameters.
pub struct ColonyParams {
    /// Ants constructing tours per iteration
    pub ants: usize,
    /// Weight of the 1/distance heuristic in the transition rule
    pub beta: f64,
    /// Local pheromone evaporation rate
    pub rho: f64,
    /// Global pheromone evaporation rate (also scales the deposit)
    pub alpha: f64,
    /// Probability of taking the greedy transition instead of sampling
    pub q0: f64,
}

impl Default for ColonyParams {
    fn default() -> Self {
        ColonyParams {
            ants: 40,
            beta: 2.0,
            rho: 0.1,
            alpha: 0.1,
            q0: 0.9,
        }
    }
}

/// Ant colony system: ants build tours edge by edge, biased by pheromone
/// trails and inverse distance. Each traversed edge is locally decayed
/// towards the initial trail level; after every iteration only the best
/// tour found so far deposits pheromone.
pub fn ant_colony<R: Rng>(
    instance: &Instance,
    params: &ColonyParams,
    max_iter: usize,
    rng: &mut R,
) -> (Cost, Tour) {
    let n = instance.n_cities;
    if n <= 1 {
        return (0.0, (0..n as City).collect());
    }

    // The nearest neighbor tour scales the initial trail level and
    // doubles as the starting incumbent.
    let nn_tour = nearest_neighbor(instance, 0);
    let nn_cost = instance.tour_cost(&nn_tour);
    let tau0 = 1.0 / (n as f64 * nn_cost.max(Cost::EPSILON));

    let mut pheromone = Matrix2::new(n, n, tau0);

    // (1/d)^beta, zero on the diagonal and on zero-length edges.
    let mut desirability = Matrix2::new(n, n, 0.0);
    for i in 0..n {
        for j in 0..n {
            let d = instance.distance(i as City, j as City);
            if i != j && d > 0.0 {
                *desirability.get_mut(i, j) = (1.0 / d).powf(params.beta);
            }
        }
    }

    let q0 = params.q0.clamp(0.0, 1.0);

    let mut best_cost = nn_cost;
    let mut best_tour = nn_tour;

    let mut tour: Tour = Vec::with_capacity(n);
    let mut visited = vec![false; n];

    for _ in 0..max_iter {
        for _ in 0..params.ants {
            tour.clear();
            visited.fill(false);

            let start = rng.random_range(0..n) as City;
            tour.push(start);
            visited[start as usize] = true;

            while tour.len() < n {
                let current = tour[tour.len() - 1];
                let next = if rng.random_bool(q0) {
                    exploit(&pheromone, &desirability, &visited, current)
                } else {
                    explore(&pheromone, &desirability, &visited, current, rng)
                };
                tour.push(next);
                visited[next as usize] = true;

                // Local update: the taken edge decays towards tau0 so
                // later ants in the same iteration spread out.
                let trail = (1.0 - params.rho)
                    * *pheromone.get(current as usize, next as usize)
                    + params.rho * tau0;
                *pheromone.get_mut(current as usize, next as usize) = trail;
                *pheromone.get_mut(next as usize, current as usize) = trail;
            }

            let cost = instance.tour_cost(&tour);
            if cost < best_cost {
                best_cost = cost;
                best_tour = tour.clone();
            }
        }

        // Global update: only the incumbent deposits.
        let deposit = params.alpha / best_cost;
        for k in 0..n {
            let a = best_tour[k] as usize;
            let b = best_tour[(k + 1) % n] as usize;
            let trail = (1.0 - params.alpha) * *pheromone.get(a, b) + deposit;
            *pheromone.get_mut(a, b) = trail;
            *pheromone.get_mut(b, a) = trail;
        }
    }

    (best_cost, best_tour)
}

/// Greedy transition: the unvisited city maximizing trail times
/// desirability.
fn exploit(
    pheromone: &Matrix2<f64>,
    desirability: &Matrix2<f64>,
    visited: &[bool],
    current: City,
) -> City {
    let mut best = 0;
    let mut best_value = -1.0;
    for j in 0..visited.len() {
        if visited[j] {
            continue;
        }
        let value = *pheromone.get(current as usize, j) * *desirability.get(current as usize, j);
        if value > best_value {
            best_value = value;
            best = j;
        }
    }
    best as City
}

/// Sampled transition: roulette wheel over trail times desirability.
fn explore<R: Rng>(
    pheromone: &Matrix2<f64>,
    desirability: &Matrix2<f64>,
    visited: &[bool],
    current: City,
    rng: &mut R,
) -> City {
    let mut weights: Vec<(City, f64)> = Vec::new();
    let mut total = 0.0;
    for j in 0..visited.len() {
        if visited[j] {
            continue;
        }
        let w = *pheromone.get(current as usize, j) * *desirability.get(current as usize, j);
        weights.push((j as City, w));
        total += w;
    }

    if total > 0.0 {
        let mut r = rng.random_range(0.0..total);
        for &(city, w) in &weights {
            r -= w;
            if r <= 0.0 {
                return city;
            }
        }
    }

    // All remaining edges have zero weight (duplicate coordinates).
    weights[weights.len() - 1].0
}
