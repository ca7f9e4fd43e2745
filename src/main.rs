//! Study Sentinel CLI
//!
//! Desk-side study session monitor. Without the physical desk unit the
//! sensor port is simulated and driven from the console.

use clap::{Parser, Subcommand};
use crossbeam_channel::{unbounded, Sender};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use study_sentinel::{
    auth::PromptFaceAuth,
    config::Config,
    core::{SessionController, SystemClock},
    notify::{AdminChannel, NotificationDispatcher, UserChannel},
    sensor::{Button, SimulatedHandle, SimulatedPort},
    VERSION,
};

#[derive(Parser)]
#[command(name = "study-sentinel")]
#[command(version = VERSION)]
#[command(about = "Desk-side study session monitor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the session monitor until interrupted
    Run {
        /// Admin alert endpoint URL (overrides config)
        #[arg(long)]
        admin_endpoint: Option<String>,

        /// Local user channel address (overrides config; empty = console)
        #[arg(long)]
        user_addr: Option<String>,

        /// Report log path (overrides config)
        #[arg(long)]
        report_log: Option<PathBuf>,
    },

    /// Show configuration
    Config,

    /// Print the tail of the session report log
    Log {
        /// Number of trailing lines to print
        #[arg(long, short, default_value = "40")]
        lines: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            admin_endpoint,
            user_addr,
            report_log,
        } => cmd_run(admin_endpoint, user_addr, report_log),
        Commands::Config => cmd_config(),
        Commands::Log { lines } => cmd_log(lines),
    }
}

fn cmd_run(
    admin_endpoint: Option<String>,
    user_addr: Option<String>,
    report_log: Option<PathBuf>,
) {
    println!("Study Sentinel v{VERSION}");
    println!();

    let mut config = Config::load().unwrap_or_default();
    if let Some(endpoint) = admin_endpoint {
        config.admin_endpoint = endpoint;
    }
    if let Some(addr) = user_addr {
        config.user_channel_addr = addr;
    }
    if let Some(path) = report_log {
        config.report_log_path = path;
    }
    if let Err(e) = config.ensure_directories() {
        eprintln!("Warning: Could not create directories: {e}");
    }

    // Channel setup failures are fatal at process start; later delivery
    // failures are best-effort no-ops.
    let user = if config.user_channel_addr.is_empty() {
        UserChannel::console()
    } else {
        match UserChannel::connect(&config.user_channel_addr) {
            Ok(channel) => channel,
            Err(e) => {
                eprintln!("Error: could not connect user channel: {e}");
                std::process::exit(1);
            }
        }
    };
    let admin = if config.admin_endpoint.is_empty() {
        println!("Admin alerts: disabled (no endpoint configured)");
        AdminChannel::disabled()
    } else {
        println!("Admin alerts: {}", config.admin_endpoint);
        match AdminChannel::new(config.admin_endpoint.clone()) {
            Ok(channel) => channel,
            Err(e) => {
                eprintln!("Error: could not set up admin channel: {e}");
                std::process::exit(1);
            }
        }
    };
    let dispatcher = NotificationDispatcher::new(user, admin);

    println!("Report log: {:?}", config.report_log_path);
    println!("Tick interval: {}s", config.tick_interval.as_secs());
    println!();
    println!("Simulated desk unit. Console commands:");
    println!("  auth <id>        present a face id (registered: {})", config.registered_face_id);
    println!("  start | stop     press the session buttons");
    println!("  dist <cm>        set the proximity reading");
    println!("  timeout          make the next proximity read time out");
    println!("  env <t> <h> <n>  set temperature/humidity/noise");
    println!();
    println!("Press Ctrl+C to exit");
    println!();

    let (port, handle) = SimulatedPort::new();
    let (face_tx, face_rx) = unbounded();
    spawn_console_bridge(handle, face_tx);

    let auth = PromptFaceAuth::new(face_rx, config.registered_face_id);
    let clock = SystemClock::new(config.tick_interval);

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let mut controller = SessionController::new(config, port, auth, dispatcher, clock);
    controller.run(running);

    println!();
    println!("Monitor stopped.");
}

/// Parse console lines into simulated sensor inputs.
fn spawn_console_bridge(handle: SimulatedHandle, face_tx: Sender<u32>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut line = String::new();
        loop {
            line.clear();
            match std::io::BufRead::read_line(&mut stdin.lock(), &mut line) {
                // EOF or a console error: stop the bridge, keep the monitor running
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            let mut parts = line.split_whitespace();
            match parts.next() {
                Some("auth") => {
                    if let Some(Ok(id)) = parts.next().map(str::parse) {
                        let _ = face_tx.send(id);
                    } else {
                        eprintln!("usage: auth <id>");
                    }
                }
                Some("start") => handle.press(Button::Start),
                Some("stop") => handle.press(Button::Stop),
                Some("dist") => {
                    if let Some(Ok(cm)) = parts.next().map(str::parse) {
                        handle.set_distance(cm);
                    } else {
                        eprintln!("usage: dist <cm>");
                    }
                }
                Some("timeout") => handle.distance_timeout(),
                Some("env") => {
                    let values: Option<(i32, i32, i32)> = (|| {
                        let t = parts.next()?.parse().ok()?;
                        let h = parts.next()?.parse().ok()?;
                        let n = parts.next()?.parse().ok()?;
                        Some((t, h, n))
                    })();
                    match values {
                        Some((t, h, n)) => handle.set_environment(t, h, n),
                        None => eprintln!("usage: env <temp> <humid> <noise>"),
                    }
                }
                Some(other) => eprintln!("unknown command: {other}"),
                None => {}
            }
        }
    });
}

fn cmd_config() {
    let config = Config::load().unwrap_or_default();

    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {:?}", Config::config_path());
    println!();
    println!(
        "{}",
        serde_json::to_string_pretty(&config).unwrap_or_else(|_| "Error".to_string())
    );
}

fn cmd_log(lines: usize) {
    let config = Config::load().unwrap_or_default();

    match std::fs::read_to_string(&config.report_log_path) {
        Ok(content) => {
            let all: Vec<&str> = content.lines().collect();
            let start = all.len().saturating_sub(lines);
            for line in &all[start..] {
                println!("{line}");
            }
        }
        Err(_) => {
            println!("No report log found at {:?}", config.report_log_path);
            println!("Run 'study-sentinel run' to record a session.");
        }
    }
}
