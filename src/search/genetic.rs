use rand::Rng;
use rand::seq::SliceRandom;

use crate::operators::construction::farthest_insertion;
use crate::problem::Instance;
use crate::types::{City, Cost, Tour};

/// Genetic algorithm parameters.
pub struct GeneticParams {
    /// Population size (offspring count per generation matches it)
    pub population: usize,
    /// Per-child probability of an inversion mutation
    pub mutation_rate: f64,
    /// Contestants per tournament selection draw
    pub tournament: usize,
    /// Generations without improvement before stopping; 0 disables
    pub stagnation_limit: usize,
}

impl Default for GeneticParams {
    fn default() -> Self {
        GeneticParams {
            population: 600,
            mutation_rate: 0.3,
            tournament: 3,
            stagnation_limit: 200,
        }
    }
}

struct Individual {
    tour: Tour,
    cost: Cost,
}

/// Generational genetic algorithm with tournament selection, cut-and-fill
/// crossover, inversion mutation and (mu + lambda) survivor selection.
/// The population is seeded from a farthest insertion tour plus perturbed
/// and random variants; equal costs are treated as duplicates.
pub fn genetic<R: Rng>(
    instance: &Instance,
    params: &GeneticParams,
    max_generations: usize,
    rng: &mut R,
) -> (Cost, Tour) {
    let n = instance.n_cities;
    if n < 2 {
        return (0.0, (0..n as City).collect());
    }

    let size = params.population.max(2);
    let mutation_rate = params.mutation_rate.clamp(0.0, 1.0);

    let mut population = seed_population(instance, size, rng);

    let mut best_cost = Cost::INFINITY;
    let mut best_tour = Tour::new();
    for individual in &population {
        if individual.cost < best_cost {
            best_cost = individual.cost;
            best_tour = individual.tour.clone();
        }
    }

    let mut stagnation = 0;

    for _ in 0..max_generations {
        let mut offspring: Vec<Individual> = Vec::with_capacity(size);

        while offspring.len() < size {
            let parent1 = tournament(&population, params.tournament, rng);
            let parent2 = tournament(&population, params.tournament, rng);

            // Cut point leaves at least one city on each side.
            let cut = rng.random_range(1..n);
            let mut first = cut_and_fill(&parent1.tour, &parent2.tour, cut);
            let mut second = cut_and_fill(&parent2.tour, &parent1.tour, cut);

            if rng.random_bool(mutation_rate) {
                invert_segment(&mut first, rng);
            }
            if rng.random_bool(mutation_rate) {
                invert_segment(&mut second, rng);
            }

            let cost = instance.tour_cost(&first);
            offspring.push(Individual { tour: first, cost });
            if offspring.len() < size {
                let cost = instance.tour_cost(&second);
                offspring.push(Individual { tour: second, cost });
            }
        }

        // (mu + lambda): parents and offspring compete for survival.
        population.extend(offspring);
        population.sort_by(|a, b| a.cost.total_cmp(&b.cost));
        population.truncate(size);

        if population[0].cost < best_cost {
            best_cost = population[0].cost;
            best_tour = population[0].tour.clone();
            stagnation = 0;
        } else {
            stagnation += 1;
            if params.stagnation_limit > 0 && stagnation >= params.stagnation_limit {
                break;
            }
        }
    }

    (best_cost, best_tour)
}

fn seed_population<R: Rng>(instance: &Instance, size: usize, rng: &mut R) -> Vec<Individual> {
    let n = instance.n_cities;
    let mut population: Vec<Individual> = Vec::with_capacity(size);

    let seed_tour = farthest_insertion(instance);
    let seed_cost = instance.tour_cost(&seed_tour);
    population.push(Individual {
        tour: seed_tour.clone(),
        cost: seed_cost,
    });

    // A slice of the population perturbs the constructive seed.
    let swaps = (n / 5).max(2);
    for _ in 0..size * 15 / 100 {
        let mut tour = seed_tour.clone();
        for _ in 0..swaps {
            let i = rng.random_range(0..n);
            let j = rng.random_range(0..n);
            tour.swap(i, j);
        }
        let cost = instance.tour_cost(&tour);
        if !is_duplicate(&population, cost) {
            population.push(Individual { tour, cost });
        }
    }

    // Random permutations fill the rest; give up on diversity after a
    // bounded number of attempts so tiny instances still fill up.
    let mut attempts = 0;
    while population.len() < size && attempts < size * 3 {
        let tour = random_permutation(n, rng);
        let cost = instance.tour_cost(&tour);
        if !is_duplicate(&population, cost) {
            population.push(Individual { tour, cost });
        }
        attempts += 1;
    }
    while population.len() < size {
        let tour = random_permutation(n, rng);
        let cost = instance.tour_cost(&tour);
        population.push(Individual { tour, cost });
    }

    population
}

fn random_permutation<R: Rng>(n: usize, rng: &mut R) -> Tour {
    let mut tour: Tour = (0..n as City).collect();
    tour.shuffle(rng);
    tour
}

fn is_duplicate(population: &[Individual], cost: Cost) -> bool {
    population.iter().any(|individual| individual.cost == cost)
}

fn tournament<'a, R: Rng>(
    population: &'a [Individual],
    contestants: usize,
    rng: &mut R,
) -> &'a Individual {
    let mut best = &population[rng.random_range(0..population.len())];
    for _ in 1..contestants {
        let challenger = &population[rng.random_range(0..population.len())];
        if challenger.cost < best.cost {
            best = challenger;
        }
    }
    best
}

/// Builds one child: the donor's prefix up to `cut`, then the filler's
/// cities in their original order, skipping those already placed.
fn cut_and_fill(donor: &[City], filler: &[City], cut: usize) -> Tour {
    let n = donor.len();
    let mut child = Tour::with_capacity(n);
    let mut taken = vec![false; n];

    for &city in &donor[..cut] {
        child.push(city);
        taken[city as usize] = true;
    }
    for &city in filler {
        if !taken[city as usize] {
            child.push(city);
            taken[city as usize] = true;
        }
    }

    child
}

/// Reverses the segment between two random positions in place.
fn invert_segment<R: Rng>(tour: &mut [City], rng: &mut R) {
    let i = rng.random_range(0..tour.len());
    let j = rng.random_range(0..tour.len());
    let (lo, hi) = if i <= j { (i, j) } else { (j, i) };
    tour[lo..=hi].reverse();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    #[test]
    fn cut_and_fill_children_keep_the_city_set() {
        let parent1: Tour = vec![0, 1, 2, 3, 4, 5];
        let parent2: Tour = vec![5, 3, 1, 0, 2, 4];
        for cut in 1..6 {
            let child = cut_and_fill(&parent1, &parent2, cut);
            assert_eq!(child[..cut], parent1[..cut]);
            let mut sorted = child;
            sorted.sort_unstable();
            assert_eq!(sorted, parent1);
        }
    }

    #[test]
    fn inversion_keeps_the_city_set() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
        let mut tour: Tour = (0..9).collect();
        for _ in 0..20 {
            invert_segment(&mut tour, &mut rng);
        }
        let mut sorted = tour.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..9).collect::<Tour>());
    }
}
