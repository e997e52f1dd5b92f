//! Reading problems, requests, and raw solver results from JSON text

use lpbridge_model::{Problem, RawSolution, SolveRequest, SolverOptions};
use serde_json::Value;

use crate::pipeline::CodecError;

pub fn parse_problem(text: &str) -> Result<Problem, CodecError> {
    Ok(serde_json::from_str(text)?)
}

/// Parse either a `{ "problem": ..., "options": ... }` request or a bare problem
pub fn parse_request(text: &str) -> Result<SolveRequest, CodecError> {
    let value: Value = serde_json::from_str(text)?;
    if value.get("problem").is_some() {
        Ok(serde_json::from_value(value)?)
    } else {
        Ok(SolveRequest {
            problem: serde_json::from_value(value)?,
            options: SolverOptions::new(),
        })
    }
}

pub fn parse_raw_solution(text: &str) -> Result<RawSolution, CodecError> {
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROBLEM: &str = r#"{
        "sense": "minimize",
        "objective": { "linear": [1] },
        "constraints": { "dense": [[1]], "sense": [">="], "rhs": [2] },
        "variables": [{ "name": "x" }]
    }"#;

    #[test]
    fn test_parse_bare_problem_as_request() {
        let request = parse_request(PROBLEM).unwrap();
        assert_eq!(request.problem.num_variables(), Some(1));
        assert!(request.options.is_empty());
    }

    #[test]
    fn test_parse_request_with_options() {
        let text = format!(r#"{{ "problem": {}, "options": {{ "time_limit": 5 }} }}"#, PROBLEM);
        let request = parse_request(&text).unwrap();
        assert_eq!(request.options.len(), 1);
        assert_eq!(request.problem, parse_problem(PROBLEM).unwrap());
    }

    #[test]
    fn test_malformed_constraints_is_a_json_error() {
        let err = parse_problem(
            r#"{ "sense": "minimize", "objective": { "linear": [1] },
                 "constraints": { "triangular": [[1]], "sense": [">="], "rhs": [1] } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }

    #[test]
    fn test_parse_raw_solution() {
        let raw = parse_raw_solution(r#"{ "Status": "Infeasible", "ObjectiveValue": 0 }"#).unwrap();
        assert_eq!(raw.status, "Infeasible");
    }
}
