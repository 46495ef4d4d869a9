use super::*;
use crate::operators::construction::{
    best_nearest_neighbor, farthest_insertion, greedy_randomized, nearest_neighbor,
};
use crate::operators::perturbation::double_bridge;
use crate::problem::Instance;
use crate::search::annealing::simulated_annealing;
use crate::search::colony::{ColonyParams, ant_colony};
use crate::search::genetic::{GeneticParams, genetic};
use crate::search::grasp::grasp;
use crate::search::ils::iterated_local_search;
use crate::search::local::two_opt;
use crate::search::tabu::tabu_search;
use crate::types::{City, Cost, Tour};
use crate::utils::Matrix2;

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use rand_xoshiro::rand_core::RngCore;
use rand_xoshiro::SplitMix64;

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: Cost = 1e-6;

    /// Instance with every off-diagonal distance equal to `k`.
    fn uniform_instance(n: usize, k: Cost) -> Instance {
        let mut distances = Matrix2::new(n, n, k);
        for i in 0..n {
            *distances.get_mut(i, i) = 0.0;
        }
        Instance::from_matrix("uniform", distances)
    }

    /// Instance from coordinates with exact (unrounded) Euclidean
    /// distances.
    fn euclidean_instance(coords: &[(f64, f64)]) -> Instance {
        let n = coords.len();
        let mut distances = Matrix2::new(n, n, 0.0);
        for i in 0..n {
            for j in 0..n {
                let dx = coords[i].0 - coords[j].0;
                let dy = coords[i].1 - coords[j].1;
                *distances.get_mut(i, j) = (dx * dx + dy * dy).sqrt();
            }
        }
        Instance::from_matrix("euclidean", distances)
    }

    /// Deterministic pseudo-random coordinates for brute-forceable sizes.
    fn random_instance(n: usize, seed: u64) -> Instance {
        let mut rng = SplitMix64::seed_from_u64(seed);
        let coords: Vec<(f64, f64)> = (0..n)
            .map(|_| {
                (
                    (rng.next_u64() % 1000) as f64 / 10.0,
                    (rng.next_u64() % 1000) as f64 / 10.0,
                )
            })
            .collect();
        euclidean_instance(&coords)
    }

    fn unit_square() -> Instance {
        euclidean_instance(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    /// Minimum tour cost by exhaustive enumeration with city 0 fixed.
    fn brute_force(instance: &Instance) -> Cost {
        fn recurse(instance: &Instance, path: &mut Tour, remaining: &mut Vec<City>, best: &mut Cost) {
            if remaining.is_empty() {
                let cost = instance.tour_cost(path);
                if cost < *best {
                    *best = cost;
                }
                return;
            }
            for idx in 0..remaining.len() {
                let city = remaining.remove(idx);
                path.push(city);
                recurse(instance, path, remaining, best);
                path.pop();
                remaining.insert(idx, city);
            }
        }

        if instance.n_cities <= 1 {
            return 0.0;
        }
        let mut path = vec![0];
        let mut remaining: Vec<City> = (1..instance.n_cities as City).collect();
        let mut best = Cost::INFINITY;
        recurse(instance, &mut path, &mut remaining, &mut best);
        best
    }

    fn assert_permutation(tour: &[City], n: usize) {
        let mut sorted: Tour = tour.to_vec();
        sorted.sort_unstable();
        let expected: Tour = (0..n as City).collect();
        assert_eq!(sorted, expected, "not a permutation of all cities: {:?}", tour);
    }

    fn make_node(lower_bound: Cost, marker: Cost) -> SearchNode {
        SearchNode {
            path: vec![0],
            visited: vec![true],
            actual_cost: marker,
            lower_bound,
        }
    }

    #[test]
    fn solves_empty_instance_without_searching() {
        let instance = uniform_instance(0, 0.0);
        let (cost, tour) = branch_and_bound(&instance, None);
        assert_eq!(cost, 0.0);
        assert!(tour.is_empty());
    }

    #[test]
    fn solves_single_city_without_searching() {
        let instance = uniform_instance(1, 0.0);
        let (cost, tour) = branch_and_bound(&instance, None);
        assert_eq!(cost, 0.0);
        assert_eq!(tour, vec![0]);
    }

    #[test]
    fn three_cities_cost_is_sum_of_all_edges() {
        let mut distances = Matrix2::new(3, 3, 0.0);
        let edges = [(0, 1, 3.0), (0, 2, 4.0), (1, 2, 5.0)];
        for (i, j, d) in edges {
            *distances.get_mut(i, j) = d;
            *distances.get_mut(j, i) = d;
        }
        let instance = Instance::from_matrix("triangle", distances);

        let (cost, tour) = branch_and_bound(&instance, None);
        assert!((cost - 12.0).abs() < EPS);
        assert_permutation(&tour, 3);
    }

    #[test]
    fn unit_square_optimum_is_perimeter() {
        let instance = unit_square();
        let (cost, tour) = branch_and_bound(&instance, None);
        assert!((cost - 4.0).abs() < EPS);
        assert_permutation(&tour, 4);
    }

    #[test]
    fn uniform_distances_cost_n_times_k() {
        let k = 2.5;
        for n in 2..=7 {
            let instance = uniform_instance(n, k);
            let (cost, tour) = branch_and_bound(&instance, None);
            assert!(
                (cost - n as Cost * k).abs() < EPS,
                "n = {}: expected {}, got {}",
                n,
                n as Cost * k,
                cost
            );
            assert_permutation(&tour, n);
        }
    }

    #[test]
    fn matches_exhaustive_enumeration_up_to_eight_cities() {
        for n in 5..=8 {
            for seed in 1..=4 {
                let instance = random_instance(n, seed);
                let (cost, tour) = branch_and_bound(&instance, None);
                let optimal = brute_force(&instance);
                assert!(
                    (cost - optimal).abs() < EPS,
                    "n = {}, seed = {}: branch and bound {} vs exhaustive {}",
                    n,
                    seed,
                    cost,
                    optimal
                );
                assert_permutation(&tour, n);
                assert!((instance.tour_cost(&tour) - cost).abs() < EPS);
            }
        }
    }

    #[test]
    fn incumbent_improves_monotonically() {
        let instance = random_instance(8, 7);
        let mut records = Vec::new();
        let (cost, _) = branch_and_bound(&instance, Some(&mut records));

        assert!(!records.is_empty());
        for pair in records.windows(2) {
            assert!(
                pair[1].best_cost < pair[0].best_cost,
                "incumbent went from {} to {}",
                pair[0].best_cost,
                pair[1].best_cost
            );
        }
        assert_eq!(records[records.len() - 1].best_cost, cost);
    }

    #[test]
    fn repeated_solves_return_the_same_cost() {
        let instance = random_instance(7, 11);
        let (first, _) = branch_and_bound(&instance, None);
        let (second, _) = branch_and_bound(&instance, None);
        assert_eq!(first, second);
    }

    #[test]
    fn relabeling_cities_preserves_the_optimal_cost() {
        let instance = random_instance(7, 3);
        let n = instance.n_cities;

        // Rotate labels: city i becomes (i + 2) % n.
        let relabel = |c: usize| (c + 2) % n;
        let mut permuted = Matrix2::new(n, n, 0.0);
        for i in 0..n {
            for j in 0..n {
                *permuted.get_mut(relabel(i), relabel(j)) = *instance.distances.get(i, j);
            }
        }
        let relabeled = Instance::from_matrix("relabeled", permuted);

        let (original_cost, _) = branch_and_bound(&instance, None);
        let (relabeled_cost, _) = branch_and_bound(&relabeled, None);
        assert!((original_cost - relabeled_cost).abs() < EPS);
    }

    #[test]
    fn root_bound_never_exceeds_the_optimum() {
        for seed in 1..=6 {
            let instance = random_instance(7, seed);
            let root = SearchNode::root(&instance);
            let optimal = brute_force(&instance);
            assert!(
                root.lower_bound <= optimal + EPS,
                "seed {}: bound {} exceeds optimum {}",
                seed,
                root.lower_bound,
                optimal
            );
        }
    }

    #[test]
    fn node_bound_never_falls_below_its_real_cost() {
        let instance = random_instance(7, 13);
        let root = SearchNode::root(&instance);
        let mut node = root;
        for city in 1..instance.n_cities as City {
            let cost = node.actual_cost + instance.distance(node.last_city(), city);
            node = node.extend(&instance, city, cost);
            assert!(node.lower_bound >= node.actual_cost - EPS);
        }
    }

    #[test]
    fn frontier_pops_in_ascending_bound_order() {
        let mut frontier = Frontier::new();
        for &lb in &[5.0, 1.0, 3.0, 2.0, 4.0] {
            frontier.push(make_node(lb, 0.0));
        }

        let mut popped = Vec::new();
        while let Some(node) = frontier.pop_min() {
            popped.push(node.lower_bound);
        }
        assert_eq!(popped, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!(frontier.is_empty());
    }

    #[test]
    fn frontier_breaks_ties_by_insertion_order() {
        let mut frontier = Frontier::new();
        frontier.push(make_node(1.0, 10.0));
        frontier.push(make_node(1.0, 20.0));
        frontier.push(make_node(0.5, 30.0));
        frontier.push(make_node(1.0, 40.0));

        let markers: Vec<Cost> = std::iter::from_fn(|| frontier.pop_min())
            .map(|node| node.actual_cost)
            .collect();
        assert_eq!(markers, vec![30.0, 10.0, 20.0, 40.0]);
    }

    #[test]
    fn two_opt_untangles_a_crossed_tour() {
        let instance = unit_square();
        // Visiting the square corner-to-corner crosses both diagonals.
        let (cost, tour) = two_opt(&instance, vec![0, 2, 1, 3]);
        assert!((cost - 4.0).abs() < EPS);
        assert_permutation(&tour, 4);
    }

    #[test]
    fn two_opt_never_worsens_its_input() {
        let instance = random_instance(10, 21);
        let initial: Tour = (0..10).collect();
        let initial_cost = instance.tour_cost(&initial);
        let (cost, tour) = two_opt(&instance, initial);
        assert!(cost <= initial_cost + EPS);
        assert!((instance.tour_cost(&tour) - cost).abs() < EPS);
    }

    #[test]
    fn double_bridge_keeps_the_city_set() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        let tour: Tour = (0..12).collect();
        for _ in 0..20 {
            let kicked = double_bridge(&tour, &mut rng);
            assert_permutation(&kicked, 12);
        }
    }

    #[test]
    fn double_bridge_leaves_short_tours_untouched() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(5);
        let tour: Tour = (0..7).collect();
        assert_eq!(double_bridge(&tour, &mut rng), tour);
    }

    #[test]
    fn nearest_neighbor_visits_every_city_once() {
        let instance = random_instance(9, 17);
        for start in 0..9 {
            let tour = nearest_neighbor(&instance, start);
            assert_permutation(&tour, 9);
        }

        let (cost, tour) = best_nearest_neighbor(&instance);
        assert_permutation(&tour, 9);
        assert!(cost >= brute_force(&instance) - EPS);
    }

    #[test]
    fn greedy_randomized_builds_permutations() {
        let instance = random_instance(9, 19);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(2);
        for alpha in [0.0, 0.2, 1.0] {
            let tour = greedy_randomized(&instance, alpha, &mut rng);
            assert_permutation(&tour, 9);
        }
    }

    #[test]
    fn metaheuristics_stay_between_optimum_and_start() {
        let instance = random_instance(8, 29);
        let optimal = brute_force(&instance);
        let initial = nearest_neighbor(&instance, 0);
        let initial_cost = instance.tour_cost(&initial);

        let mut rng = Xoshiro256PlusPlus::seed_from_u64(99);

        let (sa_cost, sa_tour) =
            simulated_annealing(&instance, initial.clone(), 2_000, 100, 0.1, &mut rng, None);
        assert_permutation(&sa_tour, 8);
        assert!(sa_cost >= optimal - EPS && sa_cost <= initial_cost + EPS);

        let (ils_cost, ils_tour) = iterated_local_search(&instance, initial.clone(), 50, &mut rng);
        assert_permutation(&ils_tour, 8);
        assert!(ils_cost >= optimal - EPS && ils_cost <= initial_cost + EPS);

        let (grasp_cost, grasp_tour) = grasp(&instance, 30, &mut rng);
        assert_permutation(&grasp_tour, 8);
        assert!(grasp_cost >= optimal - EPS);

        let (tabu_cost, tabu_tour) = tabu_search(&instance, initial.clone(), 200, 10);
        assert_permutation(&tabu_tour, 8);
        assert!(tabu_cost >= optimal - EPS && tabu_cost <= initial_cost + EPS);

        let params = ColonyParams {
            ants: 8,
            ..ColonyParams::default()
        };
        let (aco_cost, aco_tour) = ant_colony(&instance, &params, 30, &mut rng);
        assert_permutation(&aco_tour, 8);
        assert!(aco_cost >= optimal - EPS && aco_cost <= initial_cost + EPS);

        let params = GeneticParams {
            population: 30,
            ..GeneticParams::default()
        };
        let (ga_cost, ga_tour) = genetic(&instance, &params, 40, &mut rng);
        assert_permutation(&ga_tour, 8);
        assert!(ga_cost >= optimal - EPS);
    }

    #[test]
    fn ant_colony_finds_the_unit_square_perimeter() {
        let instance = unit_square();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let params = ColonyParams {
            ants: 10,
            ..ColonyParams::default()
        };
        let (cost, tour) = ant_colony(&instance, &params, 40, &mut rng);
        assert!((cost - 4.0).abs() < EPS);
        assert_permutation(&tour, 4);
    }

    #[test]
    fn ant_colony_handles_trivial_instances() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let params = ColonyParams::default();

        let (cost, tour) = ant_colony(&uniform_instance(0, 0.0), &params, 10, &mut rng);
        assert_eq!(cost, 0.0);
        assert!(tour.is_empty());

        let (cost, tour) = ant_colony(&uniform_instance(1, 0.0), &params, 10, &mut rng);
        assert_eq!(cost, 0.0);
        assert_eq!(tour, vec![0]);
    }

    #[test]
    fn genetic_finds_the_unit_square_perimeter() {
        let instance = unit_square();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(13);
        let params = GeneticParams {
            population: 20,
            ..GeneticParams::default()
        };
        let (cost, tour) = genetic(&instance, &params, 25, &mut rng);
        assert!((cost - 4.0).abs() < EPS);
        assert_permutation(&tour, 4);
    }

    #[test]
    fn genetic_never_loses_its_seeded_best() {
        let instance = random_instance(9, 37);
        let seed_cost = instance.tour_cost(&farthest_insertion(&instance));
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(37);
        let params = GeneticParams {
            population: 25,
            ..GeneticParams::default()
        };
        let (cost, tour) = genetic(&instance, &params, 30, &mut rng);
        assert_permutation(&tour, 9);
        assert!(cost <= seed_cost + EPS);
        assert!(cost >= brute_force(&instance) - EPS);
    }

    #[test]
    fn farthest_insertion_visits_every_city_once() {
        let instance = random_instance(9, 23);
        let tour = farthest_insertion(&instance);
        assert_permutation(&tour, 9);

        let square = unit_square();
        let tour = farthest_insertion(&square);
        assert!((square.tour_cost(&tour) - 4.0).abs() < EPS);
    }

    #[test]
    fn annealing_accepts_a_zero_final_temperature() {
        // Every move on a uniform instance has delta zero, which forces
        // the acceptance draw at whatever temperature remains.
        let instance = uniform_instance(6, 1.0);
        let initial: Tour = (0..6).collect();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(41);
        let (cost, tour) = simulated_annealing(&instance, initial, 400, 50, 0.0, &mut rng, None);
        assert_permutation(&tour, 6);
        assert!((cost - 6.0).abs() < EPS);
    }

    #[test]
    fn annealing_records_carry_the_temperature() {
        let instance = random_instance(10, 31);
        let initial: Tour = (0..10).collect();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
        let mut records = Vec::new();

        let (_, _) = simulated_annealing(
            &instance,
            initial,
            300,
            50,
            0.1,
            &mut rng,
            Some(&mut records),
        );

        // Degenerate move draws are skipped, so match on the recorded
        // iteration rather than the record position.
        for record in &records {
            assert_eq!(record.iteration < 50, record.temperature.is_none());
        }
        for record in &records {
            assert!(record.best_cost <= record.incumbent_cost + 1e-9);
        }
    }
}
