use crate::problem::bks;
use crate::types::{City, Cost};
use crate::utils::Matrix2;

/// A symmetric TSP instance: a distance matrix plus the metadata the
/// reporting layer needs. The matrix is immutable for the duration of a
/// solve; every solver holds it read-only.
pub struct Instance {
    pub name: String,
    pub n_cities: usize,
    /// City coordinates, empty when the instance was built from a raw matrix.
    pub coords: Vec<(f64, f64)>,
    /// Square, symmetric, zero-diagonal pairwise distances.
    pub distances: Matrix2<Cost>,
    /// Best known tour length, if this is a catalogued benchmark.
    pub optimal_cost: Option<Cost>,
}

impl Instance {
    /// Builds an instance from city coordinates using rounded Euclidean
    /// distances, the TSPLIB EUC_2D convention.
    pub fn from_coords(name: &str, coords: Vec<(f64, f64)>) -> Self {
        let n = coords.len();
        let mut distances = Matrix2::new(n, n, 0.0);
        for i in 0..n {
            for j in (i + 1)..n {
                let dx = coords[i].0 - coords[j].0;
                let dy = coords[i].1 - coords[j].1;
                let d = (dx * dx + dy * dy).sqrt().round();
                *distances.get_mut(i, j) = d;
                *distances.get_mut(j, i) = d;
            }
        }
        Instance {
            name: name.to_string(),
            n_cities: n,
            coords,
            distances,
            optimal_cost: bks::optimal_tour_length(name),
        }
    }

    /// Wraps a precomputed distance matrix. The caller is responsible for
    /// symmetry and the zero diagonal.
    pub fn from_matrix(name: &str, distances: Matrix2<Cost>) -> Self {
        Instance {
            name: name.to_string(),
            n_cities: distances.rows,
            coords: Vec::new(),
            distances,
            optimal_cost: None,
        }
    }

    #[inline(always)]
    pub fn distance(&self, from: City, to: City) -> Cost {
        *self.distances.get(from as usize, to as usize)
    }

    /// Total length of a tour, including the closing edge back to its
    /// first city.
    pub fn tour_cost(&self, tour: &[City]) -> Cost {
        let n = tour.len();
        let mut total = 0.0;
        for i in 0..n {
            total += self.distance(tour[i], tour[(i + 1) % n]);
        }
        total
    }
}
