use crate::problem::Instance;
use crate::search::bound::lower_bound;
use crate::types::{City, Cost, Tour};

/// One partial solution in the branch-and-bound tree.
///
/// Immutable once created: expansion builds fresh child nodes, it never
/// touches a node already queued in the frontier.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Cities visited so far, always starting at city 0, no repeats.
    pub path: Tour,
    /// Fast-membership mirror of `path`.
    pub visited: Vec<bool>,
    /// Real accumulated cost of the edges along `path`, never an estimate.
    pub actual_cost: Cost,
    /// Admissible estimate of the cheapest completion of `path`.
    /// Invariant: `actual_cost <= lower_bound <= optimal completion cost`.
    pub lower_bound: Cost,
}

impl SearchNode {
    /// The root of the search tree: city 0 alone.
    pub fn root(instance: &Instance) -> Self {
        let path = vec![0];
        let mut visited = vec![false; instance.n_cities];
        visited[0] = true;
        let lower_bound = lower_bound(instance, &path, &visited, 0.0);
        SearchNode {
            path,
            visited,
            actual_cost: 0.0,
            lower_bound,
        }
    }

    /// Child node extending this one with `city`. `actual_cost` is the
    /// parent's cost plus the connecting edge, computed by the driver
    /// before it decides whether the child is worth creating at all.
    /// O(n) for the path and visited copies.
    pub fn extend(&self, instance: &Instance, city: City, actual_cost: Cost) -> Self {
        let mut path = self.path.clone();
        path.push(city);
        let mut visited = self.visited.clone();
        visited[city as usize] = true;
        let lower_bound = lower_bound(instance, &path, &visited, actual_cost);
        SearchNode {
            path,
            visited,
            actual_cost,
            lower_bound,
        }
    }

    /// The city the partial tour currently ends at. The path is never
    /// empty by construction.
    #[inline(always)]
    pub fn last_city(&self) -> City {
        self.path[self.path.len() - 1]
    }
}
