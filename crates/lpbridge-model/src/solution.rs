use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::number::{deserialize_number, deserialize_optional_number};

/// Raw result returned by the external solver, keyed by column name and row position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawSolution {
    /// Terminal status text, e.g. `Optimal` or `Time limit reached`
    #[serde(alias = "status")]
    pub status: String,
    /// Objective value; may be infinite for unbounded problems
    #[serde(alias = "objective_value", deserialize_with = "deserialize_number")]
    pub objective_value: f64,
    /// Primal/dual values per column name
    #[serde(alias = "columns", default)]
    pub columns: HashMap<String, RawColumn>,
    /// Dual values per constraint row
    #[serde(alias = "rows", default)]
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawColumn {
    #[serde(alias = "primal", default, deserialize_with = "deserialize_optional_number")]
    pub primal: Option<f64>,
    #[serde(alias = "dual", default, deserialize_with = "deserialize_optional_number")]
    pub dual: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawRow {
    #[serde(alias = "dual", default, deserialize_with = "deserialize_optional_number")]
    pub dual: Option<f64>,
}

impl RawSolution {
    pub fn new(status: impl Into<String>, objective_value: f64) -> Self {
        Self {
            status: status.into(),
            objective_value,
            columns: HashMap::new(),
            rows: Vec::new(),
        }
    }

    pub fn with_column(mut self, name: impl Into<String>, primal: f64, dual: Option<f64>) -> Self {
        self.columns.insert(
            name.into(),
            RawColumn {
                primal: Some(primal),
                dual,
            },
        );
        self
    }

    pub fn with_row(mut self, dual: Option<f64>) -> Self {
        self.rows.push(RawRow { dual });
        self
    }
}

/// The result of one solve, ordered by original variable and constraint position
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DecodedResult {
    Optimal {
        objective_value: f64,
        /// Primal value per variable
        solution: Vec<f64>,
        /// Dual value per constraint
        dual_solution: Vec<f64>,
        /// Reduced cost per variable
        variable_duals: Vec<f64>,
    },
    NonOptimal {
        /// Canonical lowercase_with_underscores status
        status: String,
        /// Human-readable message carrying the solver's original status text
        message: String,
        objective_value: f64,
    },
}

impl DecodedResult {
    pub fn is_optimal(&self) -> bool {
        matches!(self, DecodedResult::Optimal { .. })
    }

    pub fn objective_value(&self) -> f64 {
        match self {
            DecodedResult::Optimal { objective_value, .. }
            | DecodedResult::NonOptimal { objective_value, .. } => *objective_value,
        }
    }

    /// Status as reported to callers: `optimal` or the normalized solver status
    pub fn status(&self) -> &str {
        match self {
            DecodedResult::Optimal { .. } => "optimal",
            DecodedResult::NonOptimal { status, .. } => status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_highs_shape() {
        let raw: RawSolution = serde_json::from_value(json!({
            "Status": "Optimal",
            "ObjectiveValue": 6.5,
            "Columns": {
                "x": { "Index": 0, "Primal": 1.5, "Dual": 0.2, "Name": "x" },
                "y": { "Primal": 2.0 }
            },
            "Rows": [{ "Dual": 0.5, "Primal": 3.5 }, {}]
        }))
        .unwrap();

        assert_eq!(raw.status, "Optimal");
        assert_eq!(raw.objective_value, 6.5);
        assert_eq!(raw.columns["x"].dual, Some(0.2));
        assert_eq!(raw.columns["y"].dual, None);
        assert_eq!(raw.rows.len(), 2);
        assert_eq!(raw.rows[1].dual, None);
    }

    #[test]
    fn test_deserialize_lowercase_and_infinite_objective() {
        let raw: RawSolution = serde_json::from_value(json!({
            "status": "Unbounded",
            "objective_value": "-inf"
        }))
        .unwrap();
        assert_eq!(raw.objective_value, f64::NEG_INFINITY);
        assert!(raw.columns.is_empty());
        assert!(raw.rows.is_empty());
    }

    #[test]
    fn test_serialize_outcome_tag() {
        let result = DecodedResult::NonOptimal {
            status: "infeasible".to_string(),
            message: "Problem status: Infeasible".to_string(),
            objective_value: 0.0,
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["outcome"], "non_optimal");
        assert_eq!(value["status"], "infeasible");
        assert_eq!(result.status(), "infeasible");
        assert!(!result.is_optimal());
    }
}
