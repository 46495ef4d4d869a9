use rand::Rng;

use crate::problem::Instance;
use crate::types::{City, Cost, Tour};

/// Builds a tour with the nearest neighbor heuristic from `start`.
pub fn nearest_neighbor(instance: &Instance, start: City) -> Tour {
    let n = instance.n_cities;
    let mut visited = vec![false; n];
    let mut tour = Vec::with_capacity(n);

    let mut current = start;
    visited[current as usize] = true;
    tour.push(current);

    for _ in 1..n {
        let mut nearest = None;
        let mut nearest_dist = Cost::INFINITY;
        for j in 0..n {
            if !visited[j] && instance.distance(current, j as City) < nearest_dist {
                nearest = Some(j as City);
                nearest_dist = instance.distance(current, j as City);
            }
        }
        // A full matrix always yields a neighbor while cities remain.
        let Some(next) = nearest else { break };
        visited[next as usize] = true;
        tour.push(next);
        current = next;
    }

    tour
}

/// Runs nearest neighbor from every start city and keeps the best tour.
pub fn best_nearest_neighbor(instance: &Instance) -> (Cost, Tour) {
    let mut best_cost = Cost::INFINITY;
    let mut best_tour = Tour::new();

    for start in 0..instance.n_cities {
        let tour = nearest_neighbor(instance, start as City);
        let cost = instance.tour_cost(&tour);
        if cost < best_cost {
            best_cost = cost;
            best_tour = tour;
        }
    }

    (best_cost, best_tour)
}

/// Builds a tour with the farthest insertion heuristic: repeatedly takes
/// the unvisited city farthest from the partial tour and splices it in
/// where it raises the cost the least.
pub fn farthest_insertion(instance: &Instance) -> Tour {
    let n = instance.n_cities;
    if n < 3 {
        return (0..n as City).collect();
    }

    // Seed with the two farthest cities plus the city farthest from both.
    let mut first = 0;
    let mut second = 1;
    let mut max_dist = -1.0;
    for i in 0..n {
        for j in (i + 1)..n {
            let d = instance.distance(i as City, j as City);
            if d > max_dist {
                max_dist = d;
                first = i;
                second = j;
            }
        }
    }

    let mut third = 0;
    let mut max_min = -1.0;
    for i in 0..n {
        if i == first || i == second {
            continue;
        }
        let d = instance
            .distance(first as City, i as City)
            .min(instance.distance(second as City, i as City));
        if d > max_min {
            max_min = d;
            third = i;
        }
    }

    let mut tour: Tour = vec![first as City, second as City, third as City];
    let mut in_tour = vec![false; n];
    in_tour[first] = true;
    in_tour[second] = true;
    in_tour[third] = true;

    while tour.len() < n {
        let mut candidate = 0;
        let mut candidate_dist = -1.0;
        for c in 0..n {
            if in_tour[c] {
                continue;
            }
            let nearest = tour
                .iter()
                .map(|&t| instance.distance(c as City, t))
                .fold(Cost::INFINITY, Cost::min);
            if nearest > candidate_dist {
                candidate_dist = nearest;
                candidate = c;
            }
        }

        let city = candidate as City;
        let mut best_pos = 0;
        let mut best_increase = Cost::INFINITY;
        for pos in 0..tour.len() {
            let a = tour[pos];
            let b = tour[(pos + 1) % tour.len()];
            let increase =
                instance.distance(a, city) + instance.distance(city, b) - instance.distance(a, b);
            if increase < best_increase {
                best_increase = increase;
                best_pos = pos;
            }
        }

        tour.insert(best_pos + 1, city);
        in_tour[candidate] = true;
    }

    tour
}

/// Greedy randomized construction for GRASP: at each step the next city
/// is drawn from the restricted candidate list of unvisited cities within
/// `alpha` of the cheapest extension, biased towards the cheaper ranks.
pub fn greedy_randomized<R: Rng>(instance: &Instance, alpha: f64, rng: &mut R) -> Tour {
    let n = instance.n_cities;
    if n == 0 {
        return Tour::new();
    }

    let start = rng.random_range(0..n) as City;
    let mut tour = vec![start];
    let mut unvisited: Vec<City> = (0..n as City).filter(|&c| c != start).collect();

    while !unvisited.is_empty() {
        let last = tour[tour.len() - 1];

        let mut candidates: Vec<(City, Cost)> = unvisited
            .iter()
            .map(|&c| (c, instance.distance(last, c)))
            .collect();
        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));

        let min_dist = candidates[0].1;
        let max_dist = candidates[candidates.len() - 1].1;
        let threshold = min_dist + alpha * (max_dist - min_dist);

        let rcl_len = candidates
            .iter()
            .take_while(|(_, d)| *d <= threshold)
            .count();

        let selected = rank_biased_choice(&candidates[..rcl_len], rng);

        tour.push(selected);
        unvisited.retain(|&c| c != selected);
    }

    tour
}

/// Picks from a distance-sorted candidate list with linearly decreasing
/// rank weights: the cheapest entry gets weight m, the dearest weight 1.
fn rank_biased_choice<R: Rng>(rcl: &[(City, Cost)], rng: &mut R) -> City {
    let m = rcl.len();
    if m == 1 {
        return rcl[0].0;
    }

    let sum_weights = m * (m + 1) / 2;
    let r = rng.random_range(1..=sum_weights);

    let mut current_sum = 0;
    for (i, &(city, _)) in rcl.iter().enumerate() {
        current_sum += m - i;
        if r <= current_sum {
            return city;
        }
    }
    rcl[0].0
}
