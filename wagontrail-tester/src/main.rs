mod logic;
mod play;
mod util;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use wagontrail_game::{GameSimulation, SimConfig};

use logic::{LogicTester, ScenarioResult, expand_scenarios, get_scenario, list_scenarios};
use play::{PlayOptions, run_session, spawn_stdin_reader};
use util::split_csv;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Play in the terminal
    Play,
    /// Run scripted scenarios against the simulation
    Logic,
}

#[derive(Debug, Parser)]
#[command(name = "wagontrail-tester", version = "0.1.0")]
#[command(about = "Play Wagontrail in the terminal or run scripted scenarios against it")]
struct Args {
    /// Play interactively or run scripted scenarios
    #[arg(long, value_enum, default_value_t = RunMode::Play)]
    mode: RunMode,

    /// Scenarios to run (comma-separated, `all` for every scenario)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated numbers or `a..b` ranges)
    #[arg(long, default_value = "1848")]
    seeds: String,

    /// Number of iterations per scenario and seed
    #[arg(long, default_value_t = 1)]
    iterations: usize,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Simulation settings as a JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds between frames in play mode
    #[arg(long, default_value_t = 100)]
    frame_ms: u64,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    let config = load_config(args.config.as_deref())?;
    match args.mode {
        RunMode::Play => play(&args, config),
        RunMode::Logic => {
            announce_banner();
            let start_time = Instant::now();
            let results = run_logic_scenarios(&args, config)?;
            write_reports(&args, &results, start_time)?;
            if results.iter().any(|r| !r.passed) {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    SimConfig::from_json(&json).with_context(|| format!("invalid config in {}", path.display()))
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:25} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🎮 Wagontrail Automated Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn play(args: &Args, config: SimConfig) -> Result<()> {
    info!("session started {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    let mut game = GameSimulation::new(config).context("building simulation")?;
    game.on_screen_changed(|screen| {
        println!("{}", "-".repeat(60).dimmed());
        print!("{screen}");
        let _ = stdout().flush();
    });
    let input = spawn_stdin_reader();
    let summary = run_session(
        &mut game,
        &input,
        PlayOptions {
            frame: Duration::from_millis(args.frame_ms),
            max_frames: None,
        },
    )?;
    game.destroy();
    println!();
    println!(
        "{} after {} frames ({} lines, {} ignored)",
        "👋 Session over".bright_cyan(),
        summary.frames,
        summary.lines_sent,
        summary.lines_refused
    );
    Ok(())
}

fn run_logic_scenarios(args: &Args, config: SimConfig) -> Result<Vec<ScenarioResult>> {
    let seeds = logic::resolve_seed_inputs(&split_csv(&args.seeds))?;
    let tester = LogicTester::new(config, args.verbose);
    let mut results = Vec::new();

    println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    for scenario_name in expand_scenarios(split_csv(&args.scenarios)) {
        if let Some(scenario) = get_scenario(&scenario_name) {
            results.extend(tester.run_scenario(scenario, &seeds, args.iterations));
        } else {
            eprintln!("⚠️  Unknown scenario: {}", scenario_name.yellow());
        }
    }
    Ok(results)
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => logic::reports::generate_json_report(&mut output_target, results)?,
        "markdown" => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Wagontrail Logic Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        _ => {
            if results.is_empty() {
                writeln!(&mut output_target, "No logic scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
