//! CLI entrypoint for the inkview scenario harness.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use inkview_harness::report::{CaseResult, RunReport};
use inkview_harness::runner::ResultSink;
use inkview_harness::structured_log::{LogEmitter, LogEntry, LogLevel};
use inkview_harness::suites;

/// Scenario harness for the inkview document viewer.
#[derive(Debug, Parser)]
#[command(name = "inkview")]
#[command(about = "Simulate/settle/assert harness for the inkview document viewer")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run scenario suites and report aggregate pass/fail.
    Run {
        /// Suite to run (all registered suites when omitted).
        #[arg(long)]
        suite: Option<String>,
        /// Write a JSONL run log to this path.
        #[arg(long)]
        log: Option<PathBuf>,
        /// Write a report to this path.
        #[arg(long)]
        report: Option<PathBuf>,
        /// Emit the report as JSON instead of markdown.
        #[arg(long)]
        json: bool,
    },
    /// List registered suites and their cases.
    List,
}

/// Prints per-case lines and mirrors them into the JSONL log when one is
/// requested.
struct ConsoleSink {
    run_id: String,
    suite: String,
    emitter: Option<LogEmitter>,
}

impl ResultSink for ConsoleSink {
    fn case_finished(&mut self, result: &CaseResult) {
        let marker = if result.is_passed() { "ok" } else { "FAILED" };
        match &result.detail {
            Some(detail) => println!("{}::{} ... {marker}: {detail}", self.suite, result.name),
            None => println!("{}::{} ... {marker}", self.suite, result.name),
        }
        if let Some(emitter) = &mut self.emitter {
            let entry = LogEntry::for_case(self.run_id.clone(), &self.suite, result);
            if let Err(err) = emitter.emit(&entry) {
                eprintln!("warning: failed to write log entry: {err}");
            }
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Run {
            suite,
            log,
            report,
            json,
        } => run(suite.as_deref(), log.as_deref(), report.as_deref(), json),
        Command::List => {
            for suite in suites::all() {
                println!("{}", suite.name);
                for case in suite.cases() {
                    println!("  {}", case.name());
                }
            }
            ExitCode::SUCCESS
        }
    }
}

fn run(
    suite: Option<&str>,
    log: Option<&std::path::Path>,
    report_path: Option<&std::path::Path>,
    json: bool,
) -> ExitCode {
    let selected = match suite {
        Some(name) => match suites::by_name(name) {
            Some(found) => vec![found],
            None => {
                eprintln!("error: no suite named `{name}`");
                return ExitCode::FAILURE;
            }
        },
        None => suites::all(),
    };

    let run_id = format!("run-{}", std::process::id());
    let mut emitter = match log {
        Some(path) => match LogEmitter::to_file(path) {
            Ok(emitter) => Some(emitter),
            Err(err) => {
                eprintln!("error: cannot open log {}: {err}", path.display());
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    if let Some(emitter) = &mut emitter {
        let start = LogEntry::new(run_id.clone(), LogLevel::Info, "run_start");
        if let Err(err) = emitter.emit(&start) {
            eprintln!("warning: failed to write log entry: {err}");
        }
    }

    let mut merged = Vec::new();
    for suite in &selected {
        let mut sink = ConsoleSink {
            run_id: run_id.clone(),
            suite: suite.name.to_owned(),
            emitter: emitter.take(),
        };
        let suite_report = suite.run(&mut sink);
        emitter = sink.emitter.take();
        merged.extend(suite_report.results);
    }
    let aggregate = RunReport::from_results(merged);
    println!("{}", aggregate.summary());

    if let Some(path) = report_path {
        let rendered = if json {
            match aggregate.to_json() {
                Ok(text) => text,
                Err(err) => {
                    eprintln!("error: cannot serialize report: {err}");
                    return ExitCode::FAILURE;
                }
            }
        } else {
            aggregate.render_markdown("inkview scenario run")
        };
        if let Err(err) = std::fs::write(path, rendered) {
            eprintln!("error: cannot write report {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    }

    if aggregate.all_passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
