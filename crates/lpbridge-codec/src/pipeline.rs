//! Encode, one solver call, decode

use lpbridge_model::{DecodedResult, Problem, RawSolution, SolverOptions};
use thiserror::Error;
use tracing::debug;

use crate::decoder::decode;
use crate::encoder::encode_validated;
use crate::options::collect_option_diagnostics;
use crate::validate::{collect_diagnostics, ValidationError};

/// The external solver: consumes LP text plus options, returns its raw result
pub trait Solver {
    type Error: std::error::Error + Send + Sync + 'static;

    fn solve(&self, model: &str, options: &SolverOptions) -> Result<RawSolution, Self::Error>;
}

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),
    #[error("Solver failed: {0}")]
    Solver(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validate the problem and options, then encode, solve once, and decode.
///
/// Problem and option diagnostics are reported together; nothing reaches the
/// solver unless both are clean.
pub fn solve<S: Solver>(
    solver: &S,
    problem: &Problem,
    options: &SolverOptions,
) -> Result<DecodedResult, CodecError> {
    let mut diagnostics = collect_diagnostics(problem);
    diagnostics.extend(collect_option_diagnostics(options));
    ValidationError::check(diagnostics)?;

    let model = encode_validated(problem);
    let raw = solver
        .solve(&model, options)
        .map_err(|e| CodecError::Solver(Box::new(e)))?;
    debug!(status = %raw.status, "solver returned");

    Ok(decode(&raw, problem))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lpbridge_model::{
        ConstraintSense, Constraints, Matrix, Objective, Sense, Variable, VariableType,
    };
    use std::cell::RefCell;

    /// Reports each variable's value back by name, remembering the text it was given
    struct EchoSolver {
        values: Vec<(&'static str, f64)>,
        received: RefCell<Vec<String>>,
    }

    impl Solver for EchoSolver {
        type Error = std::io::Error;

        fn solve(&self, model: &str, _options: &SolverOptions) -> Result<RawSolution, Self::Error> {
            self.received.borrow_mut().push(model.to_string());
            let mut raw = RawSolution::new("Optimal", 0.0).with_row(Some(1.0));
            for (name, value) in &self.values {
                raw = raw.with_column(*name, *value, None);
            }
            Ok(raw)
        }
    }

    struct FailingSolver;

    impl Solver for FailingSolver {
        type Error = std::io::Error;

        fn solve(
            &self,
            _model: &str,
            _options: &SolverOptions,
        ) -> Result<RawSolution, Self::Error> {
            Err(std::io::Error::other("solver crashed"))
        }
    }

    fn two_variable_problem() -> Problem {
        Problem {
            sense: Sense::Maximize,
            objective: Objective {
                linear: Some(vec![3.0, 2.0]),
                quadratic: None,
            },
            constraints: Constraints {
                matrix: Matrix::Dense(vec![vec![1.0, 1.0]]),
                sense: vec![ConstraintSense::Le],
                rhs: vec![4.0],
            },
            variables: vec![
                Variable::named("b"),
                Variable::named("a").with_type(VariableType::Integer),
            ],
        }
    }

    #[test]
    fn test_solve_round_trip_preserves_positions() {
        let solver = EchoSolver {
            values: vec![("a", 1.0), ("b", 3.0)],
            received: RefCell::new(Vec::new()),
        };
        let result = solve(&solver, &two_variable_problem(), &SolverOptions::new()).unwrap();

        match result {
            DecodedResult::Optimal {
                solution,
                dual_solution,
                ..
            } => {
                assert_eq!(solution, vec![3.0, 1.0]);
                assert_eq!(dual_solution, vec![1.0]);
            }
            other => panic!("expected optimal, got {:?}", other),
        }

        let received = solver.received.borrow();
        assert_eq!(received.len(), 1);
        assert!(received[0].contains(" obj: 3 b + 2 a"));
        assert!(received[0].contains("General\n a\n"));
    }

    #[test]
    fn test_invalid_problem_and_options_never_reach_solver() {
        let mut problem = two_variable_problem();
        problem.variables.pop();
        let options = SolverOptions::new().with("presolve", "maybe");
        let solver = EchoSolver {
            values: Vec::new(),
            received: RefCell::new(Vec::new()),
        };

        match solve(&solver, &problem, &options) {
            Err(CodecError::Validation(err)) => {
                let paths: Vec<&str> = err.diagnostics.iter().map(|d| d.path()).collect();
                assert_eq!(paths, vec!["variables", "options.presolve"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(solver.received.borrow().is_empty());
    }

    #[test]
    fn test_solver_failure_is_wrapped() {
        let err =
            solve(&FailingSolver, &two_variable_problem(), &SolverOptions::new()).unwrap_err();
        assert!(matches!(err, CodecError::Solver(_)));
        assert_eq!(err.to_string(), "Solver failed: solver crashed");
    }
}
