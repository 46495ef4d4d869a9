use arrow::array::{Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_writer::ArrowWriter;
use std::fs::File;
use std::sync::Arc;

use crate::types::Cost;

/// One instrumentation sample. The annealing search records one per
/// iteration; the exact solver records one per incumbent improvement.
#[derive(Debug)]
pub struct IterationRecord {
    pub iteration: usize,
    pub candidate_cost: Cost,
    pub incumbent_cost: Cost,
    pub best_cost: Cost,
    /// Child nodes pushed (exact) or moves evaluated (annealing).
    pub expanded: usize,
    /// Nodes pruned (exact) or moves rejected (annealing).
    pub pruned: usize,
    /// Frontier size, absent for the metaheuristics.
    pub frontier: Option<usize>,
    pub time: f64,
    pub temperature: Option<f32>,
}

pub fn serialize_to_parquet(
    iteration_data: &[IterationRecord],
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let iterations: Int64Array = iteration_data.iter().map(|d| d.iteration as i64).collect();
    let candidate_costs: Float64Array = iteration_data.iter().map(|d| d.candidate_cost).collect();
    let incumbent_costs: Float64Array = iteration_data.iter().map(|d| d.incumbent_cost).collect();
    let best_costs: Float64Array = iteration_data.iter().map(|d| d.best_cost).collect();
    let expanded: Int64Array = iteration_data.iter().map(|d| d.expanded as i64).collect();
    let pruned: Int64Array = iteration_data.iter().map(|d| d.pruned as i64).collect();
    let frontiers: Int64Array = iteration_data
        .iter()
        .map(|d| d.frontier.map(|f| f as i64).unwrap_or(-1))
        .collect();
    let times: Float64Array = iteration_data.iter().map(|d| d.time).collect();
    let temperatures: Float64Array = iteration_data
        .iter()
        .map(|d| d.temperature.unwrap_or(f32::NAN) as f64)
        .collect();

    // Arrow schema
    let schema = Schema::new(vec![
        Field::new("iteration", DataType::Int64, false),
        Field::new("candidate_cost", DataType::Float64, false),
        Field::new("incumbent_cost", DataType::Float64, false),
        Field::new("best_cost", DataType::Float64, false),
        Field::new("expanded", DataType::Int64, false),
        Field::new("pruned", DataType::Int64, false),
        Field::new("frontier", DataType::Int64, false),
        Field::new("time", DataType::Float64, false),
        Field::new("temperature", DataType::Float64, false),
    ]);

    let batch = RecordBatch::try_new(
        Arc::new(schema),
        vec![
            Arc::new(iterations),
            Arc::new(candidate_costs),
            Arc::new(incumbent_costs),
            Arc::new(best_costs),
            Arc::new(expanded),
            Arc::new(pruned),
            Arc::new(frontiers),
            Arc::new(times),
            Arc::new(temperatures),
        ],
    )?;

    let file = File::create(filename)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}
