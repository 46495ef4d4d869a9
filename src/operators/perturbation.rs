use rand::Rng;

use crate::problem::Instance;
use crate::types::{City, Cost, Tour};

/// Double-bridge 4-opt move: cuts the tour into four segments A|B|C|D and
/// reconnects them as A|D|C|B. The classic ILS perturbation, strong
/// enough that 2-opt cannot simply undo it. Tours shorter than 8 cities
/// are returned unchanged.
pub fn double_bridge<R: Rng>(tour: &[City], rng: &mut R) -> Tour {
    let n = tour.len();
    if n < 8 {
        return tour.to_vec();
    }

    let p1 = rng.random_range(1..=n / 4);
    let p2 = p1 + rng.random_range(1..=n / 4);
    let mut p3 = p2 + rng.random_range(1..=n / 4);
    if p3 >= n {
        p3 = n - 1;
    }

    let mut out = Vec::with_capacity(n);
    out.extend_from_slice(&tour[..p1]);
    out.extend_from_slice(&tour[p3..]);
    out.extend_from_slice(&tour[p2..p3]);
    out.extend_from_slice(&tour[p1..p2]);
    out
}

/// Proposes a random 2-opt segment reversal and returns `(i, j, delta)`,
/// where `delta` is the cost change of reversing `tour[i..=j]`, computed
/// from the two replaced edges only. Returns None when the draw is
/// degenerate (empty segment or the whole cyclic tour).
pub fn propose_reversal<R: Rng>(
    instance: &Instance,
    tour: &[City],
    rng: &mut R,
) -> Option<(usize, usize, Cost)> {
    let n = tour.len();
    if n < 4 {
        return None;
    }

    let mut i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n);
    if i > j {
        std::mem::swap(&mut i, &mut j);
    }
    if i == j || (i == 0 && j == n - 1) {
        return None;
    }

    let prev_i = (i + n - 1) % n;
    let next_j = (j + 1) % n;

    let removed =
        instance.distance(tour[prev_i], tour[i]) + instance.distance(tour[j], tour[next_j]);
    let added =
        instance.distance(tour[prev_i], tour[j]) + instance.distance(tour[i], tour[next_j]);

    Some((i, j, added - removed))
}
