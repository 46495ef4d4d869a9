use std::time::Instant;

use clap::ValueEnum;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use viajante::metrics;
use viajante::metrics::IterationRecord;
use viajante::operators::construction::nearest_neighbor;
use viajante::problem::tsplib;
use viajante::search::annealing::simulated_annealing;
use viajante::search::colony::{ColonyParams, ant_colony};
use viajante::search::genetic::{GeneticParams, genetic};
use viajante::search::grasp::grasp;
use viajante::search::ils::iterated_local_search;
use viajante::search::tabu::tabu_search;
use viajante::types::{Cost, Tour};
use viajante::utils::{Args, Parser, enumerate_input_files};

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Algorithm {
    Sa,
    Ils,
    Grasp,
    Tabu,
    Aco,
    Ga,
}

impl Algorithm {
    /// Short name used in metrics file names.
    fn tag(self) -> &'static str {
        match self {
            Algorithm::Sa => "annealing",
            Algorithm::Ils => "ils",
            Algorithm::Grasp => "grasp",
            Algorithm::Tabu => "tabu",
            Algorithm::Aco => "colony",
            Algorithm::Ga => "genetic",
        }
    }
}

#[derive(Parser)]
struct HeuristicArgs {
    #[command(flatten)]
    common: Args,

    /// Metaheuristic to run
    #[arg(short, long, value_enum, default_value_t = Algorithm::Sa)]
    algorithm: Algorithm,

    /// Number of runs with equal parameters
    #[arg(short, long, default_value_t = 1)]
    runs: usize,

    /// Iteration budget per run
    #[arg(short, long, default_value_t = 10_000)]
    iterations: usize,

    /// Annealing warm-up iterations
    #[arg(long, default_value_t = 100)]
    warmup: usize,

    /// Annealing final temperature
    #[arg(long, default_value_t = 0.1)]
    final_temp: f32,

    /// Tabu tenure in iterations
    #[arg(long, default_value_t = 20)]
    tenure: usize,

    /// Colony size in ants
    #[arg(long, default_value_t = 40)]
    ants: usize,

    /// Genetic population size
    #[arg(long, default_value_t = 600)]
    population: usize,

    /// RNG seed; a random seed is drawn when absent
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> std::io::Result<()> {
    let args = HeuristicArgs::parse();
    let instance_files = enumerate_input_files(&args.common)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);

    for path in instance_files {
        let instance = match tsplib::load(&path) {
            Ok(instance) => instance,
            Err(e) => {
                eprintln!("Failed to load instance {:?}: {}", path, e);
                continue;
            }
        };

        let initial = nearest_neighbor(&instance, 0);
        let initial_cost = instance.tour_cost(&initial);

        println!("------");
        println!("Instance: {} ({} cities)", instance.name, instance.n_cities);
        println!(
            "Algorithm: {:?}, seed: {}, iterations: {}",
            args.algorithm, seed, args.iterations
        );
        println!("Initial (nearest neighbor) cost: {:.0}", initial_cost);

        let mut results: Vec<(Cost, Tour)> = Vec::with_capacity(args.runs);

        let start_time = Instant::now();

        for run in 1..=args.runs {
            let mut records: Vec<IterationRecord> = Vec::new();

            let (cost, tour) = match args.algorithm {
                Algorithm::Sa => simulated_annealing(
                    &instance,
                    initial.clone(),
                    args.iterations,
                    args.warmup,
                    args.final_temp,
                    &mut rng,
                    args.common.metrics.as_ref().map(|_| &mut records),
                ),
                Algorithm::Ils => {
                    iterated_local_search(&instance, initial.clone(), args.iterations, &mut rng)
                }
                Algorithm::Grasp => grasp(&instance, args.iterations, &mut rng),
                Algorithm::Tabu => {
                    tabu_search(&instance, initial.clone(), args.iterations, args.tenure)
                }
                Algorithm::Aco => ant_colony(
                    &instance,
                    &ColonyParams {
                        ants: args.ants,
                        ..ColonyParams::default()
                    },
                    args.iterations,
                    &mut rng,
                ),
                Algorithm::Ga => genetic(
                    &instance,
                    &GeneticParams {
                        population: args.population,
                        ..GeneticParams::default()
                    },
                    args.iterations,
                    &mut rng,
                ),
            };

            if let Some(dir) = &args.common.metrics {
                if !records.is_empty() {
                    metrics::serialize_to_parquet(
                        &records,
                        format!(
                            "{}/{}_{}_{:03}.parquet",
                            dir,
                            args.algorithm.tag(),
                            instance.name,
                            run
                        )
                        .as_str(),
                    )
                    .unwrap();
                }
            }

            results.push((cost, tour));
        }

        let duration = start_time.elapsed();

        results.sort_by(|(a, _), (b, _)| a.total_cmp(b));

        println!("Time computing: {:?} over {} runs", duration, args.runs);

        if !results.is_empty() {
            let average: Cost =
                results.iter().map(|(cost, _)| cost).sum::<Cost>() / results.len() as Cost;
            println!("Average cost: {:.0}", average);

            let (best_cost, best_tour) = &results[0];
            println!("Best cost: {:.0}", best_cost);
            if let Some(optimal) = instance.optimal_cost {
                println!("Gap: {:.2}%", (best_cost - optimal) / optimal * 100.0);
            }
            println!(
                "Improvement over initial: {:.2}%",
                (initial_cost - best_cost) / initial_cost * 100.0
            );
            println!("Best tour: {:?}", best_tour);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Algorithm;

    #[test]
    fn metrics_files_are_tagged_by_algorithm() {
        let tags: Vec<&str> = [
            Algorithm::Sa,
            Algorithm::Ils,
            Algorithm::Grasp,
            Algorithm::Tabu,
            Algorithm::Aco,
            Algorithm::Ga,
        ]
        .iter()
        .map(|algorithm| algorithm.tag())
        .collect();
        assert_eq!(
            tags,
            vec!["annealing", "ils", "grasp", "tabu", "colony", "genetic"]
        );
    }
}
