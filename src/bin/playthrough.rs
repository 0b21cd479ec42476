//! Scripted playthrough runner CLI
//!
//! Usage:
//!   cargo run --bin playthrough                  # Run all scenarios
//!   cargo run --bin playthrough -- challenge/    # Run one folder
//!   cargo run --bin playthrough -- full_story    # Run matching scenarios
//!   cargo run --bin playthrough -- --verbose     # Show details on failure
//!   cargo run --bin playthrough -- --threads 4   # Limit parallelism

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use earthdiver::headless::{init_parallel, run_parallel};
use earthdiver::testing::{SCENARIOS_DIR, ScenarioResult, parse_scenario_file, run_scenario};

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut verbose = false;
    let mut threads = 0;
    let mut filter: Option<String> = None;

    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        if arg == "--verbose" || arg == "-v" {
            verbose = true;
        } else if arg == "--threads" {
            threads = rest.next().and_then(|n| n.parse().ok()).unwrap_or(0);
        } else if !arg.starts_with('-') {
            filter = Some(arg.clone());
        }
    }

    println!("Playthrough Scenarios");
    println!("=====================\n");

    let scenarios_path = Path::new(SCENARIOS_DIR);
    if !scenarios_path.exists() {
        println!("No scenarios directory found at {}", SCENARIOS_DIR);
        println!("Create scenario files in tests/scenarios/");
        std::process::exit(1);
    }

    let files = discover_scenarios(scenarios_path, filter.as_deref());
    if files.is_empty() {
        println!("No scenario files found.");
        if let Some(f) = filter {
            println!("Filter: {}", f);
        }
        std::process::exit(1);
    }

    if let Err(e) = init_parallel(threads) {
        eprintln!("{}", e);
    }

    let start = Instant::now();
    let results = run_parallel(&files, |path| {
        let result = match parse_scenario_file(path) {
            Ok(scenario) => run_scenario(&scenario),
            Err(message) => ScenarioResult::Error { message },
        };
        (path.clone(), result)
    });

    let mut passed = 0;
    let mut failed = 0;
    let mut errors = 0;
    for (path, result) in &results {
        match result {
            ScenarioResult::Pass { .. } => passed += 1,
            ScenarioResult::Fail { .. } => failed += 1,
            ScenarioResult::Error { .. } => errors += 1,
        }
        let rel_path = path.strip_prefix(scenarios_path).unwrap_or(path);
        let name = rel_path.with_extension("").to_string_lossy().to_string();
        print_result(&name, result, verbose);
    }

    println!("\n=====================");
    println!(
        "Results: {} passed, {} failed, {} errors ({:.1}s)",
        passed,
        failed,
        errors,
        start.elapsed().as_secs_f32()
    );

    if failed > 0 || errors > 0 {
        std::process::exit(1);
    }
}

fn discover_scenarios(base: &Path, filter: Option<&str>) -> Vec<PathBuf> {
    let mut files = Vec::new();
    discover_recursive(base, base, filter, &mut files);
    files.sort();
    files
}

fn discover_recursive(base: &Path, current: &Path, filter: Option<&str>, files: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(current) {
        Ok(e) => e,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path.is_dir() {
            discover_recursive(base, &path, filter, files);
        } else if path.extension().map(|e| e == "toml").unwrap_or(false) {
            if let Some(f) = filter {
                let rel = path.strip_prefix(base).unwrap_or(&path).to_string_lossy();
                if !rel.contains(f) {
                    continue;
                }
            }
            files.push(path);
        }
    }
}

fn print_result(name: &str, result: &ScenarioResult, verbose: bool) {
    let dots = ".".repeat(40 - name.len().min(39));

    match result {
        ScenarioResult::Pass { frames } => {
            println!("  {} {} PASS ({} frames)", name, dots, frames);
        }
        ScenarioResult::Fail { step, error } => {
            println!("  {} {} FAIL at step {}", name, dots, step);
            if verbose {
                println!("    {}", error);
            } else {
                println!("    {}", error.message);
            }
        }
        ScenarioResult::Error { message } => {
            println!("  {} {} ERROR", name, dots);
            println!("    {}", message);
        }
    }
}
