//! Mapping raw solver output back onto the caller's variable and constraint order

use lpbridge_model::{DecodedResult, Problem, RawSolution};
use tracing::debug;

/// Status token the solver reports for a proven optimum
pub const OPTIMAL_STATUS: &str = "Optimal";

/// Canonical form of a status: lowercase words joined by underscores
pub fn normalize_status(status: &str) -> String {
    status
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// Decode a raw solver result against the problem it was produced for
pub fn decode(raw: &RawSolution, problem: &Problem) -> DecodedResult {
    if raw.status != OPTIMAL_STATUS {
        return DecodedResult::NonOptimal {
            status: normalize_status(&raw.status),
            message: format!("Problem status: {}", raw.status),
            objective_value: raw.objective_value,
        };
    }

    let variables = problem.resolved_variables();
    let mut solution = Vec::with_capacity(variables.len());
    let mut variable_duals = Vec::with_capacity(variables.len());
    for variable in &variables {
        match raw.columns.get(&variable.name) {
            Some(column) => {
                solution.push(column.primal.unwrap_or(0.0));
                variable_duals.push(column.dual.unwrap_or(0.0));
            }
            None => {
                debug!(variable = %variable.name, "column missing from solver output, using 0");
                solution.push(0.0);
                variable_duals.push(0.0);
            }
        }
    }

    let dual_solution = (0..problem.num_constraints())
        .map(|k| raw.rows.get(k).and_then(|row| row.dual).unwrap_or(0.0))
        .collect();

    DecodedResult::Optimal {
        objective_value: raw.objective_value,
        solution,
        dual_solution,
        variable_duals,
    }
}
