//! Structural validation of problems before encoding.
//!
//! Every rule runs independently and pushes into a shared diagnostics list, so a
//! single call reports every defect rather than the first one found.

use std::collections::HashMap;

use lpbridge_model::{Matrix, Problem, SparseMatrix, VariableType};
use thiserror::Error;

/// One structural defect, naming the offending field path
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Diagnostic {
    #[error("objective: at least one of `linear` or `quadratic` must be present")]
    MissingObjective,
    #[error(
        "variables: quadratic objectives incompatible with integer/binary variables ({})",
        .variables.join(", ")
    )]
    IncompatibleVariableType { variables: Vec<String> },
    #[error("{path}: length is {actual}, expected {expected}")]
    LengthMismatch {
        path: String,
        actual: usize,
        expected: usize,
    },
    #[error("{path}: index {index} is out of range, expected < {bound}")]
    IndexOutOfRange {
        path: String,
        index: usize,
        bound: usize,
    },
    #[error("{path}: bounds [{lb}, {ub}] admit no finite value for variable '{name}'")]
    InvalidBounds {
        path: String,
        name: String,
        lb: f64,
        ub: f64,
    },
    #[error("{path}: variable name {name:?} must be non-empty and contain no whitespace")]
    InvalidName { path: String, name: String },
    #[error("{path}: variable name '{name}' is already used by variables[{first}]")]
    DuplicateName {
        path: String,
        name: String,
        first: usize,
    },
    #[error("{path}: {reason}")]
    InvalidOption { path: String, reason: String },
}

impl Diagnostic {
    /// Field path the diagnostic refers to
    pub fn path(&self) -> &str {
        match self {
            Diagnostic::MissingObjective => "objective",
            Diagnostic::IncompatibleVariableType { .. } => "variables",
            Diagnostic::LengthMismatch { path, .. }
            | Diagnostic::IndexOutOfRange { path, .. }
            | Diagnostic::InvalidBounds { path, .. }
            | Diagnostic::InvalidName { path, .. }
            | Diagnostic::DuplicateName { path, .. }
            | Diagnostic::InvalidOption { path, .. } => path,
        }
    }

    fn length(path: impl Into<String>, actual: usize, expected: usize) -> Self {
        Diagnostic::LengthMismatch {
            path: path.into(),
            actual,
            expected,
        }
    }
}

/// A non-empty list of diagnostics
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{} structural defect(s) found:{}", .diagnostics.len(), render_list(.diagnostics))]
pub struct ValidationError {
    pub diagnostics: Vec<Diagnostic>,
}

fn render_list(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| format!("\n  - {}", d))
        .collect()
}

impl ValidationError {
    /// `Ok` when nothing was collected
    pub fn check(diagnostics: Vec<Diagnostic>) -> Result<(), ValidationError> {
        if diagnostics.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { diagnostics })
        }
    }
}

/// Validate a problem, returning every structural defect at once
pub fn validate(problem: &Problem) -> Result<(), ValidationError> {
    ValidationError::check(collect_diagnostics(problem))
}

/// Run every rule against the problem and gather what they report
pub fn collect_diagnostics(problem: &Problem) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let num_vars = problem.num_variables();

    if num_vars.is_none() {
        diagnostics.push(Diagnostic::MissingObjective);
    }

    check_objective(problem, &mut diagnostics);
    check_constraints(problem, num_vars, &mut diagnostics);
    check_variables(problem, num_vars, &mut diagnostics);

    diagnostics
}

fn check_objective(problem: &Problem, diagnostics: &mut Vec<Diagnostic>) {
    let Some(quadratic) = &problem.objective.quadratic else {
        return;
    };

    let discrete: Vec<String> = problem
        .resolved_variables()
        .into_iter()
        .filter(|v| v.var_type != VariableType::Continuous)
        .map(|v| v.name)
        .collect();
    if !discrete.is_empty() {
        diagnostics.push(Diagnostic::IncompatibleVariableType { variables: discrete });
    }

    match quadratic {
        Matrix::Dense(rows) => {
            let n = rows.len();
            for (i, row) in rows.iter().enumerate() {
                if row.len() != n {
                    diagnostics.push(Diagnostic::length(
                        format!("objective.quadratic.dense[{}]", i),
                        row.len(),
                        n,
                    ));
                }
            }
        }
        Matrix::Sparse(sparse) => {
            if sparse.shape[1] != sparse.shape[0] {
                diagnostics.push(Diagnostic::length(
                    "objective.quadratic.sparse.shape[1]",
                    sparse.shape[1],
                    sparse.shape[0],
                ));
            }
            check_sparse("objective.quadratic.sparse", sparse, diagnostics);
        }
    }

    if let Some(linear) = &problem.objective.linear {
        let path = match quadratic {
            Matrix::Dense(_) => "objective.quadratic.dense",
            Matrix::Sparse(_) => "objective.quadratic.sparse.shape[0]",
        };
        if quadratic.num_rows() != linear.len() {
            diagnostics.push(Diagnostic::length(path, quadratic.num_rows(), linear.len()));
        }
    }
}

fn check_constraints(
    problem: &Problem,
    num_vars: Option<usize>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let constraints = &problem.constraints;

    match &constraints.matrix {
        Matrix::Dense(rows) => {
            if let Some(n) = num_vars {
                for (i, row) in rows.iter().enumerate() {
                    if row.len() != n {
                        diagnostics.push(Diagnostic::length(
                            format!("constraints.dense[{}]", i),
                            row.len(),
                            n,
                        ));
                    }
                }
            }
        }
        Matrix::Sparse(sparse) => {
            if let Some(n) = num_vars {
                if sparse.shape[1] != n {
                    diagnostics.push(Diagnostic::length(
                        "constraints.sparse.shape[1]",
                        sparse.shape[1],
                        n,
                    ));
                }
            }
            check_sparse("constraints.sparse", sparse, diagnostics);
        }
    }

    let num_constraints = problem.num_constraints();
    if constraints.sense.len() != num_constraints {
        diagnostics.push(Diagnostic::length(
            "constraints.sense",
            constraints.sense.len(),
            num_constraints,
        ));
    }
    if constraints.rhs.len() != num_constraints {
        diagnostics.push(Diagnostic::length(
            "constraints.rhs",
            constraints.rhs.len(),
            num_constraints,
        ));
    }
}

/// Parallel-array lengths and index ranges of a coordinate list
fn check_sparse(path: &str, sparse: &SparseMatrix, diagnostics: &mut Vec<Diagnostic>) {
    let entries = sparse.rows.len();
    if sparse.cols.len() != entries {
        diagnostics.push(Diagnostic::length(
            format!("{}.cols", path),
            sparse.cols.len(),
            entries,
        ));
    }
    if sparse.values.len() != entries {
        diagnostics.push(Diagnostic::length(
            format!("{}.values", path),
            sparse.values.len(),
            entries,
        ));
    }

    let [num_rows, num_cols] = sparse.shape;
    for (k, &row) in sparse.rows.iter().enumerate() {
        if row >= num_rows {
            diagnostics.push(Diagnostic::IndexOutOfRange {
                path: format!("{}.rows[{}]", path, k),
                index: row,
                bound: num_rows,
            });
        }
    }
    for (k, &col) in sparse.cols.iter().enumerate() {
        if col >= num_cols {
            diagnostics.push(Diagnostic::IndexOutOfRange {
                path: format!("{}.cols[{}]", path, k),
                index: col,
                bound: num_cols,
            });
        }
    }
}

fn check_variables(
    problem: &Problem,
    num_vars: Option<usize>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    if let Some(n) = num_vars {
        if problem.variables.len() != n {
            diagnostics.push(Diagnostic::length("variables", problem.variables.len(), n));
        }
    }

    for (i, variable) in problem.variables.iter().enumerate() {
        if let Some(name) = &variable.name {
            if name.is_empty() || name.chars().any(char::is_whitespace) {
                diagnostics.push(Diagnostic::InvalidName {
                    path: format!("variables[{}].name", i),
                    name: name.clone(),
                });
            }
        }
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    for (i, variable) in problem.resolved_variables().into_iter().enumerate() {
        if !admits_finite_value(variable.lb, variable.ub) {
            diagnostics.push(Diagnostic::InvalidBounds {
                path: format!("variables[{}]", i),
                name: variable.name.clone(),
                lb: variable.lb,
                ub: variable.ub,
            });
        }
        if let Some(&first) = seen.get(&variable.name) {
            diagnostics.push(Diagnostic::DuplicateName {
                path: format!("variables[{}]", i),
                name: variable.name,
                first,
            });
        } else {
            seen.insert(variable.name, i);
        }
    }
}

/// NaN on either side, `lb = +inf`, `ub = -inf`, and `lb > ub` all leave nothing to encode
fn admits_finite_value(lb: f64, ub: f64) -> bool {
    lb <= ub && lb != f64::INFINITY && ub != f64::NEG_INFINITY
}
