mod config;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use lpbridge_codec::{collect_diagnostics, collect_option_diagnostics, Diagnostic};
use lpbridge_model::{DecodedResult, Problem, SolveRequest, SolverOptions};
use tracing::debug;

use crate::config::Config;

#[derive(Parser)]
#[command(name = "lpbridge")]
#[command(about = "Translate optimization problems to LP text and solver results back", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Log level, overriding the configuration (RUST_LOG still wins)
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a problem (or request) file for structural errors
    Check {
        /// The problem or request JSON file
        file: PathBuf,
    },
    /// Encode a problem into LP text
    Encode {
        /// The problem or request JSON file
        file: PathBuf,
        /// Write the LP text here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decode a raw solver result against its problem
    Decode {
        /// The problem or request JSON file
        problem: PathBuf,
        /// The raw solver result JSON file
        result: PathBuf,
        /// Output format (json, pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },
    /// Print the validated option set that would be passed to the solver
    Options {
        /// The request JSON file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path).unwrap_or_else(|e| fail(&e.to_string())),
        None => Config::default(),
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.init();
    debug!(default_options = config.options.len(), "configuration loaded");

    match cli.command {
        Commands::Check { file } => {
            let request = read_request(&file);
            let options = request.options.merged_over(&config.options);
            let mut diagnostics = collect_diagnostics(&request.problem);
            diagnostics.extend(collect_option_diagnostics(&options));

            if diagnostics.is_empty() {
                let problem = &request.problem;
                println!("✓ {} is valid", file.display());
                println!("  {} variables", problem.variables.len());
                println!("  {} constraints", problem.num_constraints());
                if problem.has_quadratic_objective() {
                    println!("  quadratic objective");
                }
                println!("  {} solver options", options.len());
            } else {
                eprintln!("✗ {} has errors:", file.display());
                report(&diagnostics);
                std::process::exit(1);
            }
        }
        Commands::Encode { file, output } => {
            let request = read_request(&file);
            let lp = match lpbridge_codec::encode(&request.problem) {
                Ok(lp) => lp,
                Err(e) => {
                    eprintln!("✗ {} has errors:", file.display());
                    report(&e.diagnostics);
                    std::process::exit(1);
                }
            };
            match output {
                Some(path) => {
                    if let Err(e) = std::fs::write(&path, lp) {
                        fail(&format!("Error writing {}: {}", path.display(), e));
                    }
                }
                None => print!("{}", lp),
            }
        }
        Commands::Decode {
            problem,
            result,
            format,
        } => {
            let request = read_request(&problem);
            let raw = lpbridge_codec::parse_raw_solution(&read_file(&result))
                .unwrap_or_else(|e| fail(&format!("Error parsing {}: {}", result.display(), e)));
            let decoded = lpbridge_codec::decode(&raw, &request.problem);

            if format == "json" {
                match serde_json::to_string_pretty(&decoded) {
                    Ok(json) => println!("{}", json),
                    Err(e) => fail(&format!("Error serializing result: {}", e)),
                }
            } else {
                print_result(&request.problem, &decoded);
            }
        }
        Commands::Options { file } => {
            let request = read_request(&file);
            let options = request.options.merged_over(&config.options);
            let diagnostics = collect_option_diagnostics(&options);
            if !diagnostics.is_empty() {
                eprintln!("✗ {} has invalid options:", file.display());
                report(&diagnostics);
                std::process::exit(1);
            }
            print_options(&options);
        }
    }
}

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    std::process::exit(1);
}

fn read_file(path: &Path) -> String {
    std::fs::read_to_string(path)
        .unwrap_or_else(|e| fail(&format!("Error reading file {}: {}", path.display(), e)))
}

fn read_request(path: &Path) -> SolveRequest {
    lpbridge_codec::parse_request(&read_file(path))
        .unwrap_or_else(|e| fail(&format!("Error parsing {}: {}", path.display(), e)))
}

fn report(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        eprintln!("  {}", diagnostic);
    }
}

fn print_options(options: &SolverOptions) {
    match serde_json::to_string_pretty(options) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(&format!("Error serializing options: {}", e)),
    }
}

fn print_result(problem: &Problem, decoded: &DecodedResult) {
    match decoded {
        DecodedResult::Optimal {
            objective_value,
            solution,
            dual_solution,
            variable_duals,
        } => {
            println!("Status: OPTIMAL");
            println!("Objective: {}", objective_value);
            println!();
            println!("Variables:");
            for ((variable, value), dual) in problem
                .resolved_variables()
                .iter()
                .zip(solution)
                .zip(variable_duals)
            {
                println!("  {:20} {:14.6} (reduced cost {:.6})", variable.name, value, dual);
            }
            if !dual_solution.is_empty() {
                println!();
                println!("Constraint duals:");
                for (k, dual) in dual_solution.iter().enumerate() {
                    println!("  c{:<19} {:14.6}", k + 1, dual);
                }
            }
        }
        DecodedResult::NonOptimal {
            status,
            message,
            objective_value,
        } => {
            println!("Status: {}", status.to_uppercase());
            println!("{}", message);
            println!("Objective: {}", objective_value);
        }
    }
}
