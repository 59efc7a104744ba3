//! Transfer planner CLI.
//!
//! Reads one JSON solve request (stdin, or `--input FILE`) and writes the
//! chosen transfer paths as JSON to stdout.
//!
//! Usage:
//!   transfer-planner [OPTIONS] < request.json
//!
//! Options:
//!   --input FILE      Read the request from FILE instead of stdin
//!   --depth D         quick, standard or deep (overrides the request)
//!   --ft-value X      Value of a banked free transfer (overrides the request)
//!   --sequential      Expand the beam on one thread
//!   --pretty          Pretty-print the output

use std::env;
use std::fs::File;
use std::io::{self, Write};
use std::process;

use env_logger::Env;
use transfer_planner::config::Depth;
use transfer_planner::{solve, SearchConfig, SolveRequest};

/// Parsed command-line options.
#[derive(Default)]
struct Options {
    input: Option<String>,
    depth: Option<Depth>,
    ft_value: Option<f64>,
    sequential: bool,
    pretty: bool,
}

fn print_usage() {
    eprintln!("Usage: transfer-planner [--input FILE] [--depth quick|standard|deep]");
    eprintln!("                        [--ft-value X] [--sequential] [--pretty]");
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", message);
    process::exit(1);
}

fn value_of(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i) {
        Some(v) => v.clone(),
        None => fail(format!("{} needs a value", flag)),
    }
}

fn parse_args(args: &[String]) -> Options {
    let mut opts = Options::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                opts.input = Some(value_of(args, i, "--input"));
            }
            "--depth" => {
                i += 1;
                let v = value_of(args, i, "--depth");
                opts.depth = Some(v.parse().unwrap_or_else(|e| fail(e)));
            }
            "--ft-value" => {
                i += 1;
                let v = value_of(args, i, "--ft-value");
                match v.parse::<f64>() {
                    Ok(x) if x.is_finite() && x >= 0.0 => opts.ft_value = Some(x),
                    _ => fail(format!("invalid --ft-value '{}'", v)),
                }
            }
            "--sequential" => opts.sequential = true,
            "--pretty" => opts.pretty = true,
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }
    opts
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let opts = parse_args(&args);

    let request = match &opts.input {
        Some(path) => File::open(path)
            .map_err(Into::into)
            .and_then(SolveRequest::from_reader),
        None => SolveRequest::from_reader(io::stdin().lock()),
    };
    let mut problem = match request.and_then(SolveRequest::into_problem) {
        Ok(p) => p,
        Err(e) => fail(e),
    };

    if let Some(depth) = opts.depth {
        problem.config = SearchConfig::for_depth(depth).with_ft_value(problem.config.ft_value);
    }
    if let Some(ft_value) = opts.ft_value {
        problem.config.ft_value = ft_value;
    }
    if opts.sequential {
        problem.config.parallel = false;
    }

    let paths = solve(&problem);
    let json = if opts.pretty {
        serde_json::to_string_pretty(&paths)
    } else {
        serde_json::to_string(&paths)
    };
    let json = json.unwrap_or_else(|e| fail(e));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = writeln!(out, "{}", json).and_then(|_| out.flush()) {
        fail(e);
    }
}
