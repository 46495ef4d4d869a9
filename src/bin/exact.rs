use std::time::Instant;

use viajante::metrics;
use viajante::problem::tsplib;
use viajante::search::branch_and_bound;
use viajante::utils::{Args, Parser, enumerate_input_files};

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    let instance_files = enumerate_input_files(&args)?;

    for path in instance_files {
        let instance = match tsplib::load(&path) {
            Ok(instance) => instance,
            Err(e) => {
                eprintln!("Failed to load instance {:?}: {}", path, e);
                continue;
            }
        };

        println!("------");
        println!("Instance: {} ({} cities)", instance.name, instance.n_cities);
        match instance.optimal_cost {
            Some(optimal) => println!("Optimal cost: {:.0}", optimal),
            None => println!("Optimal cost: unknown"),
        }

        let mut records = Vec::new();
        let start_time = Instant::now();

        let (best_cost, best_tour) = branch_and_bound(&instance, Some(&mut records));

        let elapsed = start_time.elapsed();

        println!("Results:");
        println!("  Best tour length: {:.0}", best_cost);
        if let Some(optimal) = instance.optimal_cost {
            let gap = (best_cost - optimal) / optimal * 100.0;
            println!("  Optimal length: {:.0}", optimal);
            println!("  Gap: {:.2}%", gap);
        }
        println!("  Time: {:?}", elapsed);
        if let Some(last) = records.last() {
            println!(
                "  Last improvement at node {} ({} pushed, {} pruned so far)",
                last.iteration, last.expanded, last.pruned
            );
        }
        println!("  Tour: {:?}", best_tour);

        if let Some(dir) = &args.metrics {
            metrics::serialize_to_parquet(
                &records,
                format!("{}/exact_{}.parquet", dir, instance.name).as_str(),
            )
            .unwrap();
        }
    }

    Ok(())
}
