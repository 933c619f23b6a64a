//! Original vs optimized comparison

use crate::physics_engine::predict;
use crate::types::{FlightParameters, MetricDelta, OptimizationComparison};

use super::optimizer::optimize;

/// Optimize `params`, predict both sets, and report per-metric deltas.
pub fn compare_with_optimized(params: &FlightParameters) -> OptimizationComparison {
    let optimized = optimize(params);
    let original_result = predict(params);
    let optimized_result = predict(&optimized);

    OptimizationComparison {
        original_parameters: *params,
        optimized_parameters: optimized,
        battery_consumption: MetricDelta::new(
            original_result.battery_consumption,
            optimized_result.battery_consumption,
        ),
        flight_time: MetricDelta::new(original_result.flight_time, optimized_result.flight_time),
        efficiency: MetricDelta::new(original_result.efficiency, optimized_result.efficiency),
        range: MetricDelta::new(original_result.range, optimized_result.range),
        original_result,
        optimized_result,
    }
}
