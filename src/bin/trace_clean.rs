//! CLI for cleaning HTML from a file or stdin.
//!
//! Usage:
//!   trace_clean [--analyze] [FILE]
//!
//! Cleans the input and writes the cleaned HTML to stdout, with a change
//! summary on stderr. With `--analyze`, no cleaning happens: a JSON report
//! of what a clean would remove is written to stdout instead.

use std::env;
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;

use llm_trace_cleaner::{analyze, clean_bytes};

fn read_input(path: Option<&str>) -> io::Result<Vec<u8>> {
    match path {
        Some(path) => fs::read(path),
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut analyze_only = false;
    let mut path: Option<&str> = None;

    for arg in &args {
        match arg.as_str() {
            "--analyze" => analyze_only = true,
            "--help" | "-h" => {
                eprintln!("Usage: trace_clean [--analyze] [FILE]");
                eprintln!("Reads FILE (or stdin) and writes cleaned HTML to stdout.");
                eprintln!("With --analyze, writes a JSON report instead of cleaning.");
                return ExitCode::SUCCESS;
            }
            _ if path.is_none() => path = Some(arg.as_str()),
            _ => {
                eprintln!("Unexpected argument: {arg}");
                return ExitCode::FAILURE;
            }
        }
    }

    let input = match read_input(path) {
        Ok(input) => input,
        Err(err) => {
            eprintln!("Failed to read input: {err}");
            return ExitCode::FAILURE;
        }
    };

    if analyze_only {
        let html = String::from_utf8_lossy(&input);
        let report = analyze(&html);
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("Failed to serialize report: {err}");
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    let result = clean_bytes(&input);
    print!("{}", result.html);
    eprintln!("{}", result.format_stats());
    ExitCode::SUCCESS
}
