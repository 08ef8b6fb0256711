//! PostureGuard CLI
//!
//! Usage:
//!   postureguard --ticks "uu ru rf rf"        # Evaluate a fixed tick sequence
//!   postureguard --interactive                # Read ticks from stdin
//!   postureguard --serve                      # HTTP API server
//!   postureguard --ticks "rf rf" --json       # JSON output
//!
//! A tick is two label codes, back then neck: u = upright, r = reclined,
//! f = forward-leaning, - = no sample.

use clap::Parser;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

use postureguard::core::{parse_ticks, run_server, EvaluationPolicy, MonitorConfig, PostureMonitor, StabilityWindow};
use postureguard::types::{PostureLabel, TickOutput};
use postureguard::{PostureError, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "postureguard",
    version = VERSION,
    about = "PostureGuard - flag incorrect posture held for a whole time window",
    long_about = "PostureGuard watches a stream of per-frame posture labels for the back\n\
                  and the neck. Each region keeps a rolling window of recent samples.\n\n\
                  Tick format: <back><neck>, e.g. 'rf' (reclined back, forward neck),\n\
                  'u-' (upright back, no neck sample).\n\n\
                  Verdicts:\n  \
                  ACCUMULATING - Window still filling\n  \
                  STABLE       - Nothing to report\n  \
                  MOVING       - Correct and incorrect samples mixed, window reset\n  \
                  FLAGGED      - Incorrect posture held for the whole window, alert"
)]
struct Args {
    /// Tick sequence to evaluate (single mode)
    #[arg(short, long)]
    ticks: Option<String>,

    /// Interactive mode - read ticks from stdin
    #[arg(short, long)]
    interactive: bool,

    /// Run as HTTP API server
    #[arg(short, long)]
    serve: bool,

    /// Server address (default: 127.0.0.1:3000)
    #[arg(long, default_value = "127.0.0.1:3000")]
    addr: String,

    /// TOML config file
    #[arg(short, long)]
    config: Option<String>,

    /// Write the effective config to this path and exit
    #[arg(long)]
    write_config: Option<String>,

    /// Frames per second of the pose pipeline
    #[arg(long)]
    fps: Option<u32>,

    /// Seconds an incorrect posture must be held
    #[arg(long)]
    duration: Option<u32>,

    /// Back window size (overrides fps/duration)
    #[arg(long)]
    back_capacity: Option<usize>,

    /// Neck window size (overrides fps/duration)
    #[arg(long)]
    neck_capacity: Option<usize>,

    /// Evaluate windows before they are full
    #[arg(long)]
    literal: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show window contents after every tick
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    if let Some(ref path) = args.write_config {
        if let Err(e) = config.save(path) {
            exit_with(&e);
        }
        println!("Config written to {}", path);
        return;
    }

    if args.serve {
        run_serve(&args, config).await;
    } else if args.interactive {
        run_interactive(&config, &args);
    } else if let Some(ref ticks) = args.ticks {
        run_single(ticks, &config, &args);
    } else {
        // Default to interactive if no mode specified
        run_interactive(&config, &args);
    }
}

/// File config (if any) overridden by command-line flags
fn build_config(args: &Args) -> Result<MonitorConfig, PostureError> {
    let mut config = match args.config {
        Some(ref path) => MonitorConfig::load(path)?,
        None => MonitorConfig::default(),
    };
    if let Some(fps) = args.fps {
        config.fps = fps;
    }
    if let Some(duration) = args.duration {
        config.duration_secs = duration;
    }
    if args.back_capacity.is_some() {
        config.back_capacity = args.back_capacity;
    }
    if args.neck_capacity.is_some() {
        config.neck_capacity = args.neck_capacity;
    }
    if args.literal {
        config.policy = EvaluationPolicy::Literal;
    }
    Ok(config)
}

fn exit_with(e: &PostureError) -> ! {
    eprintln!("{} {}", "error:".red().bold(), e);
    std::process::exit(1);
}

/// Run a fixed tick sequence
fn run_single(ticks: &str, config: &MonitorConfig, args: &Args) {
    let mut monitor = new_monitor(config);
    let samples = match parse_ticks(ticks) {
        Ok(samples) => samples,
        Err(e) => exit_with(&e),
    };

    for (back, neck) in samples {
        let output = monitor.tick(back, neck);
        print_output(&output, &monitor, args);
    }

    print_summary(&monitor, args);
}

/// Run interactive mode
fn run_interactive(config: &MonitorConfig, args: &Args) {
    let mut monitor = new_monitor(config);

    print_header(&monitor, args.no_color);
    println!("Type ticks (e.g. 'uu rf -f') and press Enter.");
    println!("Commands: 'summary', 'reset', 'quit'.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}", format_prompt(&monitor, args.no_color));
        if stdout.flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }
        if line.eq_ignore_ascii_case("summary") {
            print_summary(&monitor, args);
            continue;
        }
        if line.eq_ignore_ascii_case("reset") {
            monitor.reset();
            println!("Session reset.");
            continue;
        }
        if line.is_empty() {
            continue;
        }

        match parse_ticks(line) {
            Ok(samples) => {
                for (back, neck) in samples {
                    let output = monitor.tick(back, neck);
                    print_output(&output, &monitor, args);
                }
            }
            Err(e) => println!("{} {}", "⚠".yellow(), e.to_string().yellow()),
        }
    }

    println!();
    print_summary(&monitor, args);
}

fn new_monitor(config: &MonitorConfig) -> PostureMonitor {
    match PostureMonitor::new(config) {
        Ok(monitor) => monitor,
        Err(e) => exit_with(&e),
    }
}

/// Print header
fn print_header(monitor: &PostureMonitor, no_color: bool) {
    let title = format!("PostureGuard v{} - back window {} / neck window {}",
        VERSION, monitor.back().capacity(), monitor.neck().capacity());
    if no_color {
        println!("========================================");
        println!("  {}", title);
        println!("========================================");
    } else {
        println!("{}", title.bold());
    }
    println!();
}

/// Format prompt with both windows' fill
fn format_prompt(monitor: &PostureMonitor, no_color: bool) -> String {
    let prompt = format!("[back {}/{} | neck {}/{}] > ",
        monitor.back().len(), monitor.back().capacity(),
        monitor.neck().len(), monitor.neck().capacity());
    if no_color {
        prompt
    } else {
        prompt.dimmed().to_string()
    }
}

/// Print one tick
fn print_output(output: &TickOutput, monitor: &PostureMonitor, args: &Args) {
    if args.json {
        match serde_json::to_string(output) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
        }
        return;
    }

    if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
    }

    if args.verbose {
        print_window("back", monitor.back());
        print_window("neck", monitor.neck());
    }

    for alert in &output.alerts {
        println!("  {} {}", "⚠ ALERT:".red().bold(), format!("{} held for the whole window", alert.description).red());
    }
}

/// Print raw slot contents, oldest physical slot first
fn print_window(name: &str, window: &StabilityWindow) {
    let slots: String = window
        .slots()
        .iter()
        .map(|slot| slot.map(|l: PostureLabel| l.code()).unwrap_or('.'))
        .collect();
    println!("  {} [{}] last_flagged={}", name, slots,
        window.last_flagged_label().map(|l| l.to_string()).unwrap_or_else(|| "-".to_string()));
}

/// Print session totals
fn print_summary(monitor: &PostureMonitor, args: &Args) {
    let summary = monitor.summary();
    if args.json {
        match serde_json::to_string(&summary.report()) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("{} {}", "error:".red().bold(), e),
        }
        return;
    }
    println!("Session: {} ticks, {} alerts", summary.ticks, summary.total_alerts);
    for posture in summary.reported_postures() {
        println!("  - {}", posture);
    }
}

/// Run HTTP API server
async fn run_serve(args: &Args, config: MonitorConfig) {
    println!();
    println!("{}", format!("PostureGuard API Server v{}", VERSION).bold());
    println!();

    if let Err(e) = run_server(&args.addr, config).await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}
