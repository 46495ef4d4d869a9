use crate::problem::Instance;
use crate::types::{City, Cost};

/// Admissible lower bound on the cost of any complete tour extending
/// `path`.
///
/// Every city still to visit will eventually be touched by exactly two
/// tour edges, so its two cheapest incident edges are an optimistic
/// stand-in for them. The partial tour additionally needs one edge from
/// its last city into the unvisited set and one edge from the unvisited
/// set back to the start city. Each edge in the optimistic sum is counted
/// from both endpoints' perspectives, hence the halving.
pub fn lower_bound(
    instance: &Instance,
    path: &[City],
    visited: &[bool],
    actual_cost: Cost,
) -> Cost {
    let n = instance.n_cities;
    let mut optimistic = 0.0;

    for city in 0..n {
        if visited[city] {
            continue;
        }
        let mut min1 = Cost::INFINITY;
        let mut min2 = Cost::INFINITY;
        for other in 0..n {
            if other == city {
                continue;
            }
            let d = *instance.distances.get(city, other);
            if d < min1 {
                min2 = min1;
                min1 = d;
            } else if d < min2 {
                min2 = d;
            }
        }
        // With fewer than two incident edges there is nothing to sum.
        if min2.is_finite() {
            optimistic += min1 + min2;
        }
    }

    if let Some(&last) = path.last() {
        let mut min_onward = Cost::INFINITY;
        let mut min_return = Cost::INFINITY;
        for city in 0..n {
            if visited[city] {
                continue;
            }
            let c = city as City;
            min_onward = min_onward.min(instance.distance(last, c));
            min_return = min_return.min(instance.distance(c, 0));
        }
        if min_onward.is_finite() {
            optimistic += min_onward;
        }
        if min_return.is_finite() {
            optimistic += min_return;
        }
    }

    actual_cost + optimistic / 2.0
}
