use std::time::Instant;

use crate::metrics::IterationRecord;
use crate::problem::Instance;
use crate::search::frontier::Frontier;
use crate::search::node::SearchNode;
use crate::types::{City, Cost, Tour};

/// Solves the instance exactly with best-first branch and bound.
///
/// Returns the optimal tour and its cost. The search is deterministic and
/// single-threaded; its only operational risk is combinatorial blow-up of
/// the frontier, which grows worst-case exponentially in the number of
/// cities when the bound prunes poorly (near-uniform matrices). Callers
/// needing bounded runtime must impose their own limit around this call.
///
/// When `iteration_data` is given, one record is appended per incumbent
/// improvement.
pub fn branch_and_bound(
    instance: &Instance,
    mut iteration_data: Option<&mut Vec<IterationRecord>>,
) -> (Cost, Tour) {
    let n = instance.n_cities;

    // Trivial tours never enter the search loop.
    if n == 0 {
        return (0.0, Vec::new());
    }
    if n == 1 {
        return (0.0, vec![0]);
    }

    let start_time = Instant::now();

    let mut best_path: Tour = Vec::new();
    let mut best_cost = Cost::INFINITY;

    let mut frontier = Frontier::new();
    frontier.push(SearchNode::root(instance));

    let mut explored = 0usize;
    let mut expanded = 0usize;
    let mut pruned = 0usize;

    while let Some(node) = frontier.pop_min() {
        explored += 1;

        // An admissible bound at or above the incumbent cannot beat it.
        if node.lower_bound >= best_cost {
            pruned += 1;
            continue;
        }

        let current = node.last_city();

        if node.path.len() == n {
            // All cities visited; close the cycle back to the start.
            let total_cost = node.actual_cost + instance.distance(current, 0);
            if total_cost < best_cost {
                best_path = node.path;
                best_cost = total_cost;

                if let Some(records) = iteration_data.as_deref_mut() {
                    records.push(IterationRecord {
                        iteration: explored,
                        candidate_cost: total_cost,
                        incumbent_cost: best_cost,
                        best_cost,
                        expanded,
                        pruned,
                        frontier: Some(frontier.len()),
                        time: start_time.elapsed().as_secs_f64(),
                        temperature: None,
                    });
                }
            }
            continue;
        }

        for next in 0..n {
            if node.visited[next] {
                continue;
            }
            let next_city = next as City;

            let new_actual_cost = node.actual_cost + instance.distance(current, next_city);

            // The real cost alone already disqualifies this child.
            if new_actual_cost >= best_cost {
                pruned += 1;
                continue;
            }

            let child = node.extend(instance, next_city, new_actual_cost);
            if child.lower_bound < best_cost {
                frontier.push(child);
                expanded += 1;
            } else {
                pruned += 1;
            }
        }
    }

    (best_cost, best_path)
}
