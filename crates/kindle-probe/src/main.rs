//! Kindle Probe - Input binding inspector
//!
//! Opens a small window and logs every action press and release from a TOML
//! binding file. Useful for checking keyboard layouts and gamepad mappings.
//!
//! Usage:
//!   kindle-probe [--config <bindings.toml>] [--deadzone <0-32767>] [-v]

mod app;
mod probe;

use anyhow::{Context, Result};
use app::ProbeApp;
use clap::Parser;
use kindle_input::{DesktopBackend, InputConfig, InputManager};
use kindle_runtime::MonotonicClock;
use probe::{Probe, DEFAULT_BINDINGS};
use std::path::PathBuf;
use winit::event_loop::EventLoop;

#[derive(Parser)]
#[command(name = "kindle-probe")]
#[command(about = "Log Kindle input actions as they fire")]
struct Args {
    /// Binding file (built-in bindings when omitted)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the stick/trigger deadzone
    #[arg(long)]
    deadzone: Option<u16>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    use env_logger::{Builder, Env};
    let default_level = if args.verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_level)).init();

    let config = match &args.config {
        Some(path) => InputConfig::load(path)
            .with_context(|| format!("Failed to load bindings from {}", path.display()))?,
        None => InputConfig::from_toml_str(DEFAULT_BINDINGS)
            .context("Built-in bindings are invalid")?,
    };

    let mut input = InputManager::from_config(&config).context("Failed to set up input")?;
    if let Some(deadzone) = args.deadzone {
        input.set_deadzone(deadzone);
    }

    log::info!("Actions:");
    for (name, id) in input.actions().names() {
        log::info!("  {id:>2}  {name}");
    }

    let backend = DesktopBackend::new();
    let probe = Probe::new(input, MonotonicClock::new());

    let event_loop = EventLoop::new()?;
    let mut app = ProbeApp::new(probe, backend, "Kindle Probe".to_string());
    event_loop.run_app(&mut app)?;
    app.finish();

    Ok(())
}
