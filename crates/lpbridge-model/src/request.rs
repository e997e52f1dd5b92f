use serde::{Deserialize, Serialize};

use crate::options::SolverOptions;
use crate::problem::Problem;

/// A problem together with the options to hand to the solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    pub problem: Problem,
    #[serde(default, skip_serializing_if = "SolverOptions::is_empty")]
    pub options: SolverOptions,
}
