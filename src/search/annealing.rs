use rand::Rng;
use std::time::Instant;

use crate::metrics::IterationRecord;
use crate::operators::perturbation::propose_reversal;
use crate::problem::Instance;
use crate::types::{Cost, Tour};

pub fn simulated_annealing<R: Rng>(
    instance: &Instance,
    mut incumbent: Tour,
    max_iter: usize,
    warmup_iter: usize,
    final_temp: f32,
    rng: &mut R,
    mut iteration_data: Option<&mut Vec<IterationRecord>>,
) -> (Cost, Tour) {
    let mut incumbent_cost = instance.tour_cost(&incumbent);

    let mut best_tour = incumbent.clone();
    let mut best_cost = incumbent_cost;

    let mut delta_sum = 0.0;
    let mut delta_count = 0;

    // Warm-up: accept worsening moves with fixed probability 0.8 while
    // sampling the average uphill delta the instance produces.
    for i in 0..warmup_iter {
        let start_time = Instant::now();

        let Some((lo, hi, delta)) = propose_reversal(instance, &incumbent, rng) else {
            continue;
        };
        let candidate_cost = incumbent_cost + delta;
        let mut rejected = 0;

        if delta < 0.0 {
            incumbent[lo..=hi].reverse();
            incumbent_cost = candidate_cost;
            if incumbent_cost < best_cost {
                best_cost = incumbent_cost;
                best_tour = incumbent.clone();
            }
        } else {
            if delta > 0.0 {
                delta_sum += delta;
                delta_count += 1;
            }

            if rng.random_bool(0.8) {
                incumbent[lo..=hi].reverse();
                incumbent_cost = candidate_cost;
            } else {
                rejected = 1;
            }
        }

        if let Some(records) = iteration_data.as_deref_mut() {
            records.push(IterationRecord {
                iteration: i,
                candidate_cost,
                incumbent_cost,
                best_cost,
                expanded: 1,
                pruned: rejected,
                frontier: None,
                time: start_time.elapsed().as_secs_f64(),
                temperature: None,
            });
        }
    }

    let delta_avg = if delta_count > 0 {
        delta_sum / delta_count as Cost
    } else {
        1.0
    };

    // Initial temperature and cooling factor. The schedule needs a
    // strictly positive target: at temp 0 the acceptance probability
    // degenerates to 0/0.
    let final_temp = final_temp.max(f32::MIN_POSITIVE);
    let mut temp = (-delta_avg / f64::ln(0.8)) as f32;
    let alpha = (final_temp / temp).powf(1.0 / (max_iter.saturating_sub(warmup_iter) as f32));

    // Main annealing loop.
    for i in warmup_iter..max_iter {
        let start_time = Instant::now();

        let Some((lo, hi, delta)) = propose_reversal(instance, &incumbent, rng) else {
            temp *= alpha;
            continue;
        };
        let candidate_cost = incumbent_cost + delta;
        let mut rejected = 0;

        if delta < 0.0 {
            incumbent[lo..=hi].reverse();
            incumbent_cost = candidate_cost;
            if incumbent_cost < best_cost {
                best_cost = incumbent_cost;
                best_tour = incumbent.clone();
            }
        } else if rng.random_bool(f64::exp(-delta / temp as f64).min(1.0)) {
            incumbent[lo..=hi].reverse();
            incumbent_cost = candidate_cost;
        } else {
            rejected = 1;
        }
        temp *= alpha;

        if let Some(records) = iteration_data.as_deref_mut() {
            records.push(IterationRecord {
                iteration: i,
                candidate_cost,
                incumbent_cost,
                best_cost,
                expanded: 1,
                pruned: rejected,
                frontier: None,
                time: start_time.elapsed().as_secs_f64(),
                temperature: Some(temp),
            });
        }
    }

    // Incremental deltas drift over long runs; settle the final cost from
    // the tour itself.
    let best_cost = instance.tour_cost(&best_tour);
    (best_cost, best_tour)
}
