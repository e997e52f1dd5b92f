//! Rendering of validated problems into CPLEX LP text.
//!
//! Sections are emitted in the order `Minimize`/`Maximize`, `Subject To`,
//! `Bounds`, `General`, `Binary`, `End`.

use lpbridge_model::{from_sentinel, Matrix, Problem, ResolvedVariable, VariableType};
use tracing::debug;

use crate::matrix::dense_rows;
use crate::validate::{validate, ValidationError};

/// Token written for an unbounded side
pub const INFINITY_TOKEN: &str = "inf";

/// Format a number the way the LP reader expects it
pub fn format_number(value: f64) -> String {
    if value == f64::INFINITY {
        INFINITY_TOKEN.to_string()
    } else if value == f64::NEG_INFINITY {
        format!("-{}", INFINITY_TOKEN)
    } else if value == 0.0 {
        // Avoids "-0"
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

/// A sum of terms, with signs folded into the joining operators
#[derive(Debug, Default)]
struct Expression {
    text: String,
}

impl Expression {
    fn add(&mut self, coefficient: f64, symbol: &str) {
        if coefficient == 0.0 {
            return;
        }
        let negative = coefficient < 0.0;
        if self.text.is_empty() {
            if negative {
                self.text.push('-');
            }
        } else {
            self.text.push_str(if negative { " - " } else { " + " });
        }
        let magnitude = coefficient.abs();
        if magnitude != 1.0 {
            self.text.push_str(&format_number(magnitude));
            self.text.push(' ');
        }
        self.text.push_str(symbol);
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Validate and encode a problem
pub fn encode(problem: &Problem) -> Result<String, ValidationError> {
    validate(problem)?;
    Ok(encode_validated(problem))
}

/// Encode a problem that has already passed validation.
///
/// # Panics
///
/// May panic on a problem whose dimensions are inconsistent.
pub fn encode_validated(problem: &Problem) -> String {
    let variables = problem.resolved_variables();
    let names: Vec<&str> = variables.iter().map(|v| v.name.as_str()).collect();

    let mut lines = Vec::new();
    lines.push(problem.sense.keyword().to_string());
    lines.push(labeled("obj", &objective_expression(problem, &names)));

    lines.push("Subject To".to_string());
    let constraints = &problem.constraints;
    let rows = dense_rows(&constraints.matrix);
    for (k, row) in rows.iter().enumerate() {
        let mut expression = Expression::default();
        for (coefficient, name) in row.iter().zip(&names) {
            expression.add(*coefficient, name);
        }
        let body = format!(
            "{} {}",
            constraints.sense[k],
            format_number(from_sentinel(constraints.rhs[k]))
        );
        let terms = if expression.is_empty() {
            body
        } else {
            format!("{} {}", expression.text, body)
        };
        lines.push(labeled(&format!("c{}", k + 1), &terms));
    }

    lines.push("Bounds".to_string());
    lines.extend(variables.iter().map(bound_line));

    push_integrality(&mut lines, "General", &variables, VariableType::Integer);
    push_integrality(&mut lines, "Binary", &variables, VariableType::Binary);
    lines.push("End".to_string());

    debug!(
        variables = variables.len(),
        constraints = rows.len(),
        quadratic = problem.has_quadratic_objective(),
        "encoded problem"
    );

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn labeled(label: &str, body: &str) -> String {
    if body.is_empty() {
        format!(" {}:", label)
    } else {
        format!(" {}: {}", label, body)
    }
}

fn objective_expression(problem: &Problem, names: &[&str]) -> String {
    let mut linear = Expression::default();
    if let Some(coefficients) = &problem.objective.linear {
        for (coefficient, name) in coefficients.iter().zip(names) {
            linear.add(*coefficient, name);
        }
    }

    let quadratic = problem
        .objective
        .quadratic
        .as_ref()
        .map(|q| quadratic_expression(q, names))
        .filter(|q| !q.is_empty());

    match quadratic {
        None => linear.text,
        Some(q) if linear.is_empty() => format!("[ {} ] / 2", q.text),
        Some(q) => format!("{} + [ {} ] / 2", linear.text, q.text),
    }
}

/// Terms of `xᵗQx`; the enclosing `/ 2` supplies the one-half factor
fn quadratic_expression(matrix: &Matrix, names: &[&str]) -> Expression {
    let mut expression = Expression::default();
    match matrix {
        Matrix::Dense(q) => {
            // Each unordered pair is visited once, so Q and Qᵗ render identically
            for i in 0..q.len() {
                expression.add(q[i][i], &square(names[i]));
                for j in (i + 1)..q.len() {
                    expression.add(q[i][j] + q[j][i], &product(names[i], names[j]));
                }
            }
        }
        Matrix::Sparse(sparse) => {
            for ((&row, &col), &value) in sparse.rows.iter().zip(&sparse.cols).zip(&sparse.values) {
                let symbol = if row == col {
                    square(names[row])
                } else {
                    product(names[row], names[col])
                };
                expression.add(value, &symbol);
            }
        }
    }
    expression
}

fn square(name: &str) -> String {
    format!("{}^2", name)
}

fn product(a: &str, b: &str) -> String {
    format!("{} * {}", a, b)
}

fn bound_line(variable: &ResolvedVariable) -> String {
    let (lb, ub, name) = (variable.lb, variable.ub, &variable.name);
    match (lb == f64::NEG_INFINITY, ub == f64::INFINITY) {
        (true, true) => format!(" {} free", name),
        (false, true) => format!(" {} >= {}", name, format_number(lb)),
        (_, false) => format!(" {} <= {} <= {}", format_number(lb), name, format_number(ub)),
    }
}

fn push_integrality(
    lines: &mut Vec<String>,
    heading: &str,
    variables: &[ResolvedVariable],
    var_type: VariableType,
) {
    let names: Vec<&str> = variables
        .iter()
        .filter(|v| v.var_type == var_type)
        .map(|v| v.name.as_str())
        .collect();
    if !names.is_empty() {
        lines.push(heading.to_string());
        lines.push(format!(" {}", names.join(" ")));
    }
}
