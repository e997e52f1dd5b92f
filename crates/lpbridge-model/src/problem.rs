use std::fmt;

use serde::{Deserialize, Serialize};

use crate::number::{deserialize_optional_number, from_sentinel};

/// Represents a linear or quadratic optimization problem as received from a caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    /// Whether to minimize or maximize
    pub sense: Sense,
    /// Linear and/or quadratic objective terms
    pub objective: Objective,
    /// Constraint matrix with per-row sense and right-hand side
    pub constraints: Constraints,
    /// Per-variable name, bounds, and type, in column order
    #[serde(default)]
    pub variables: Vec<Variable>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sense {
    #[serde(alias = "min")]
    Minimize,
    #[serde(alias = "max")]
    Maximize,
}

impl Sense {
    /// Keyword that opens the objective section of the LP text
    pub fn keyword(self) -> &'static str {
        match self {
            Sense::Minimize => "Minimize",
            Sense::Maximize => "Maximize",
        }
    }
}

/// Objective contribution is `cᵗx + 0.5 xᵗQx`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    /// Coefficient for each variable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linear: Option<Vec<f64>>,
    /// Quadratic matrix `Q`; entries are taken as already doubled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quadratic: Option<Matrix>,
}

/// A matrix given either densely (row-major) or as a coordinate list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Matrix {
    Dense(Vec<Vec<f64>>),
    Sparse(SparseMatrix),
}

impl Matrix {
    /// Number of rows the matrix declares
    pub fn num_rows(&self) -> usize {
        match self {
            Matrix::Dense(rows) => rows.len(),
            Matrix::Sparse(sparse) => sparse.shape[0],
        }
    }
}

/// COO representation: parallel row index, column index, and value arrays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseMatrix {
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
    pub values: Vec<f64>,
    /// `[rows, cols]`
    pub shape: [usize; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    /// `dense` or `sparse`, flattened beside `sense` and `rhs`
    #[serde(flatten)]
    pub matrix: Matrix,
    /// Comparison operator per row
    #[serde(default)]
    pub sense: Vec<ConstraintSense>,
    /// Right-hand side per row
    #[serde(default)]
    pub rhs: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstraintSense {
    /// Less than or equal (<=)
    #[serde(rename = "<=", alias = "le")]
    Le,
    /// Greater than or equal (>=)
    #[serde(rename = ">=", alias = "ge")]
    Ge,
    /// Equal (=)
    #[serde(rename = "=", alias = "eq", alias = "==")]
    Eq,
}

impl fmt::Display for ConstraintSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintSense::Le => write!(f, "<="),
            ConstraintSense::Ge => write!(f, ">="),
            ConstraintSense::Eq => write!(f, "="),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableType {
    #[default]
    #[serde(rename = "cont", alias = "continuous")]
    Continuous,
    #[serde(rename = "int", alias = "integer")]
    Integer,
    #[serde(rename = "bin", alias = "binary")]
    Binary,
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableType::Continuous => write!(f, "continuous"),
            VariableType::Integer => write!(f, "integer"),
            VariableType::Binary => write!(f, "binary"),
        }
    }
}

/// A variable as supplied; every field is optional and resolved by [`Variable::resolve`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub lb: Option<f64>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub ub: Option<f64>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub var_type: Option<VariableType>,
}

/// A variable with its name, bounds, and type defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedVariable {
    pub name: String,
    pub lb: f64,
    pub ub: f64,
    pub var_type: VariableType,
}

/// Positional name used when a variable has none: `x1`, `x2`, ...
pub fn default_name(index: usize) -> String {
    format!("x{}", index + 1)
}

impl Variable {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_bounds(mut self, lb: f64, ub: f64) -> Self {
        self.lb = Some(lb);
        self.ub = Some(ub);
        self
    }

    pub fn with_type(mut self, var_type: VariableType) -> Self {
        self.var_type = Some(var_type);
        self
    }

    /// Name of the variable at `index`, falling back to the positional default
    pub fn resolved_name(&self, index: usize) -> String {
        self.name.clone().unwrap_or_else(|| default_name(index))
    }

    /// Apply the defaults shared by encoding, decoding, and diagnostics.
    ///
    /// `lb` defaults to 0. `ub` defaults to 1 for binaries and +∞ otherwise.
    /// Sentinel magnitudes become real infinities.
    pub fn resolve(&self, index: usize) -> ResolvedVariable {
        let var_type = self.var_type.unwrap_or_default();
        let default_ub = match var_type {
            VariableType::Binary => 1.0,
            VariableType::Continuous | VariableType::Integer => f64::INFINITY,
        };
        ResolvedVariable {
            name: self.resolved_name(index),
            lb: from_sentinel(self.lb.unwrap_or(0.0)),
            ub: from_sentinel(self.ub.unwrap_or(default_ub)),
            var_type,
        }
    }
}

impl Problem {
    /// Number of variables implied by the objective: the length of `linear`,
    /// or the quadratic dimension when `linear` is absent
    pub fn num_variables(&self) -> Option<usize> {
        self.objective
            .linear
            .as_ref()
            .map(Vec::len)
            .or_else(|| self.objective.quadratic.as_ref().map(Matrix::num_rows))
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.matrix.num_rows()
    }

    /// Resolve every variable in column order
    pub fn resolved_variables(&self) -> Vec<ResolvedVariable> {
        self.variables
            .iter()
            .enumerate()
            .map(|(i, v)| v.resolve(i))
            .collect()
    }

    pub fn has_quadratic_objective(&self) -> bool {
        self.objective.quadratic.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_dense_problem() {
        let problem: Problem = serde_json::from_value(json!({
            "sense": "minimize",
            "objective": { "linear": [1, 2] },
            "constraints": { "dense": [[1, 1]], "sense": [">="], "rhs": [1] },
            "variables": [{}, { "name": "y", "ub": 10, "type": "int" }]
        }))
        .unwrap();

        assert_eq!(problem.sense, Sense::Minimize);
        assert_eq!(problem.num_variables(), Some(2));
        assert_eq!(problem.num_constraints(), 1);
        assert_eq!(problem.constraints.sense, vec![ConstraintSense::Ge]);
        assert!(matches!(problem.constraints.matrix, Matrix::Dense(ref rows) if rows.len() == 1));
        assert_eq!(problem.variables[1].var_type, Some(VariableType::Integer));
    }

    #[test]
    fn test_deserialize_sparse_constraints_and_quadratic() {
        let problem: Problem = serde_json::from_value(json!({
            "sense": "max",
            "objective": {
                "quadratic": { "sparse": { "rows": [0, 1], "cols": [0, 1], "values": [2, 4], "shape": [2, 2] } }
            },
            "constraints": {
                "sparse": { "rows": [0], "cols": [1], "values": [3.5], "shape": [1, 2] },
                "sense": ["<="],
                "rhs": [7]
            },
            "variables": [{}, {}]
        }))
        .unwrap();

        assert_eq!(problem.sense, Sense::Maximize);
        assert_eq!(problem.num_variables(), Some(2));
        assert_eq!(problem.num_constraints(), 1);
        match &problem.constraints.matrix {
            Matrix::Sparse(s) => assert_eq!(s.values, vec![3.5]),
            Matrix::Dense(_) => panic!("expected sparse constraints"),
        }
    }

    #[test]
    fn test_constraints_without_matrix_is_rejected() {
        let result = serde_json::from_value::<Problem>(json!({
            "sense": "minimize",
            "objective": { "linear": [1] },
            "constraints": { "sense": [], "rhs": [] },
            "variables": [{}]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_defaults() {
        let cont = Variable::default().resolve(0);
        assert_eq!(cont.name, "x1");
        assert_eq!(cont.lb, 0.0);
        assert_eq!(cont.ub, f64::INFINITY);
        assert_eq!(cont.var_type, VariableType::Continuous);

        let bin = Variable::default().with_type(VariableType::Binary).resolve(4);
        assert_eq!(bin.name, "x5");
        assert_eq!(bin.ub, 1.0);

        let overridden = Variable::named("b")
            .with_type(VariableType::Binary)
            .with_bounds(0.0, 3.0)
            .resolve(0);
        assert_eq!(overridden.name, "b");
        assert_eq!(overridden.ub, 3.0);
    }

    #[test]
    fn test_resolve_infinite_bounds() {
        let variable: Variable =
            serde_json::from_value(json!({ "lb": "-inf", "ub": 1e30 })).unwrap();
        let resolved = variable.resolve(0);
        assert_eq!(resolved.lb, f64::NEG_INFINITY);
        assert_eq!(resolved.ub, f64::INFINITY);

        let variable: Variable =
            serde_json::from_value(json!({ "lb": -1e30, "ub": null })).unwrap();
        assert_eq!(variable.resolve(0).lb, f64::NEG_INFINITY);
        assert_eq!(variable.resolve(0).ub, f64::INFINITY);
    }

    #[test]
    fn test_num_variables_falls_back_to_quadratic() {
        let problem = Problem {
            sense: Sense::Minimize,
            objective: Objective {
                linear: None,
                quadratic: Some(Matrix::Dense(vec![vec![1.0, 0.0, 0.0]; 3])),
            },
            constraints: Constraints {
                matrix: Matrix::Dense(Vec::new()),
                sense: Vec::new(),
                rhs: Vec::new(),
            },
            variables: Vec::new(),
        };
        assert_eq!(problem.num_variables(), Some(3));
        assert_eq!(problem.num_constraints(), 0);
    }
}
