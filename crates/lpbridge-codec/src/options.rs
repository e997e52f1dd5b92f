//! Type and range checks for solver options.
//!
//! Options are otherwise opaque: they are forwarded to the solver untouched.

use lpbridge_model::{OptionValue, SolverOptions};
use tracing::warn;

use crate::validate::{Diagnostic, ValidationError};

#[derive(Debug, Clone, Copy)]
enum OptionKind {
    Bool,
    Integer { min: i64, max: i64 },
    Float { min: f64, max: f64 },
    Choice(&'static [&'static str]),
}

const OFF_CHOOSE_ON: &[&str] = &["off", "choose", "on"];

const KNOWN_OPTIONS: &[(&str, OptionKind)] = &[
    ("time_limit", OptionKind::Float { min: 0.0, max: f64::INFINITY }),
    ("presolve", OptionKind::Choice(OFF_CHOOSE_ON)),
    ("parallel", OptionKind::Choice(OFF_CHOOSE_ON)),
    ("run_crossover", OptionKind::Choice(OFF_CHOOSE_ON)),
    ("solver", OptionKind::Choice(&["simplex", "choose", "ipm", "pdlp"])),
    ("threads", OptionKind::Integer { min: 0, max: i64::MAX }),
    ("random_seed", OptionKind::Integer { min: 0, max: 2_147_483_647 }),
    ("simplex_strategy", OptionKind::Integer { min: 0, max: 4 }),
    ("simplex_iteration_limit", OptionKind::Integer { min: 0, max: i64::MAX }),
    ("ipm_iteration_limit", OptionKind::Integer { min: 0, max: i64::MAX }),
    ("mip_max_nodes", OptionKind::Integer { min: 0, max: i64::MAX }),
    ("primal_feasibility_tolerance", OptionKind::Float { min: 1e-10, max: f64::INFINITY }),
    ("dual_feasibility_tolerance", OptionKind::Float { min: 1e-10, max: f64::INFINITY }),
    ("ipm_optimality_tolerance", OptionKind::Float { min: 1e-10, max: f64::INFINITY }),
    ("mip_feasibility_tolerance", OptionKind::Float { min: 1e-10, max: f64::INFINITY }),
    ("mip_rel_gap", OptionKind::Float { min: 0.0, max: f64::INFINITY }),
    ("mip_abs_gap", OptionKind::Float { min: 0.0, max: f64::INFINITY }),
    ("objective_bound", OptionKind::Float { min: f64::NEG_INFINITY, max: f64::INFINITY }),
    ("objective_target", OptionKind::Float { min: f64::NEG_INFINITY, max: f64::INFINITY }),
    ("infinite_cost", OptionKind::Float { min: 1e15, max: f64::INFINITY }),
    ("infinite_bound", OptionKind::Float { min: 1e15, max: f64::INFINITY }),
    ("small_matrix_value", OptionKind::Float { min: 1e-12, max: f64::INFINITY }),
    ("large_matrix_value", OptionKind::Float { min: 1.0, max: f64::INFINITY }),
    ("output_flag", OptionKind::Bool),
    ("log_to_console", OptionKind::Bool),
];

fn lookup(name: &str) -> Option<OptionKind> {
    KNOWN_OPTIONS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, kind)| *kind)
}

/// Validate every known option, reporting all defects together
pub fn validate_options(options: &SolverOptions) -> Result<(), ValidationError> {
    ValidationError::check(collect_option_diagnostics(options))
}

pub fn collect_option_diagnostics(options: &SolverOptions) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    for (name, value) in options.iter() {
        match lookup(name) {
            Some(kind) => {
                if let Some(reason) = check_value(kind, value) {
                    diagnostics.push(Diagnostic::InvalidOption {
                        path: format!("options.{}", name),
                        reason,
                    });
                }
            }
            None => warn!(option = %name, "unknown solver option passed through unvalidated"),
        }
    }
    diagnostics
}

fn check_value(kind: OptionKind, value: &OptionValue) -> Option<String> {
    match (kind, value) {
        (OptionKind::Bool, OptionValue::Bool(_)) => None,
        (OptionKind::Integer { min, max }, OptionValue::Integer(i)) => {
            if *i < min || *i > max {
                Some(format!("value {} is out of range [{}, {}]", i, min, max))
            } else {
                None
            }
        }
        (OptionKind::Float { min, max }, OptionValue::Integer(_) | OptionValue::Float(_)) => {
            let x = value.as_f64().unwrap_or(f64::NAN);
            if x.is_nan() || x < min || x > max {
                Some(format!("value {} is out of range [{}, {}]", x, min, max))
            } else {
                None
            }
        }
        (OptionKind::Choice(choices), OptionValue::Text(text)) => {
            if choices.contains(&text.as_str()) {
                None
            } else {
                Some(format!("value {:?} is not one of {}", text, choices.join(", ")))
            }
        }
        (kind, value) => Some(format!(
            "expected {}, found {} {}",
            expected_kind(kind),
            value.kind(),
            value
        )),
    }
}

fn expected_kind(kind: OptionKind) -> &'static str {
    match kind {
        OptionKind::Bool => "bool",
        OptionKind::Integer { .. } => "integer",
        OptionKind::Float { .. } => "number",
        OptionKind::Choice(_) => "string",
    }
}
