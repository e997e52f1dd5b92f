mod number;
mod options;
mod problem;
mod request;
mod solution;

pub use number::{from_sentinel, parse_infinity, InvalidNumber, INFINITY_SENTINEL};
pub use options::{OptionValue, SolverOptions};
pub use problem::{
    default_name, ConstraintSense, Constraints, Matrix, Objective, Problem, ResolvedVariable, Sense,
    SparseMatrix, Variable, VariableType,
};
pub use request::SolveRequest;
pub use solution::{DecodedResult, RawColumn, RawRow, RawSolution};
