#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that hosts Star Miner without a window.

mod headless;
mod session;

use std::{cell::RefCell, fs, path::Path, path::PathBuf, rc::Rc, time::Duration};

use anyhow::{Context, Result};
use clap::Parser;
use starminer_core::Command;
use starminer_rendering::{Color, FrameRate, Presentation, RenderingBackend};
use starminer_simulation::{Simulation, SimulationConfig};
use starminer_storage::{FileStore, SaveStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use self::{headless::HeadlessBackend, session::Session};

/// Command-line arguments accepted by the `starminer` binary.
#[derive(Debug, Parser)]
#[command(name = "starminer", about = "Headless host for the Star Miner idle game", version)]
struct CliArgs {
    /// TOML file overriding simulation defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON save file to load on start and write on autosave and exit.
    #[arg(long, default_value = "starminer-save.json")]
    save: PathBuf,
    /// Simulated seconds to run before exiting.
    #[arg(long, default_value_t = 60.0)]
    seconds: f64,
    /// Frames simulated per second.
    #[arg(long, default_value_t = 60)]
    fps: u32,
    /// Pace frames against the wall clock and use measured deltas.
    #[arg(long)]
    realtime: bool,
    /// Buy every affordable upgrade after each frame.
    #[arg(long)]
    auto_upgrade: bool,
    /// Credit resources before the first frame.
    #[arg(long)]
    grant: Option<f64>,
    /// Discard saved progress instead of loading it.
    #[arg(long)]
    reset: bool,
    /// Override the configured random seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Stop early once the balance reaches this amount.
    #[arg(long)]
    target: Option<f64>,
}

/// Entry point for the Star Miner command-line interface.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = CliArgs::parse();
    run(args)
}

fn run(args: CliArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    let frame_rate = FrameRate::new(args.fps)?;
    let run_for = Duration::try_from_secs_f64(args.seconds)
        .context("--seconds must be a finite, non-negative number")?;

    let store = FileStore::new(&args.save);
    let mut simulation = Simulation::new(&config);
    info!("{}", simulation.welcome_banner());

    if args.reset {
        simulation.reset();
        info!("progress reset");
    } else {
        match store.load() {
            Ok(Some(save)) => simulation.restore(save),
            Ok(None) => info!("starting new game"),
            Err(error) => warn!(%error, "could not read save, starting new game"),
        }
    }
    if let Some(amount) = args.grant {
        simulation.enqueue(Command::GrantResources { amount });
    }

    let presentation = Presentation::new(
        "Star Miner",
        Color::from_rgb_u8(0x05, 0x05, 0x10),
        simulation.scene(),
    );
    let session = Rc::new(RefCell::new(
        Session::new(simulation, store)
            .with_auto_upgrade(args.auto_upgrade)
            .with_target(args.target),
    ));

    let frame_session = Rc::clone(&session);
    HeadlessBackend::new(frame_rate, run_for)
        .with_realtime(args.realtime)
        .run(presentation, move |dt, scene| {
            frame_session.borrow_mut().frame(dt, scene)
        })?;

    let mut session = session.borrow_mut();
    session.persist();
    let economy = session.simulation().economy();
    info!(
        resources = economy.resources.floor(),
        miner_level = economy.miner_level,
        engine_level = economy.engine_level,
        saves = session.saves(),
        "run complete"
    );
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<SimulationConfig> {
    let Some(path) = path else {
        return Ok(SimulationConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let args = CliArgs::try_parse_from([
            "starminer",
            "--seconds",
            "5",
            "--fps",
            "30",
            "--auto-upgrade",
            "--grant",
            "100",
            "--seed",
            "7",
        ])
        .expect("valid arguments");

        assert_eq!(args.seconds, 5.0);
        assert_eq!(args.fps, 30);
        assert!(args.auto_upgrade);
        assert!(!args.realtime);
        assert_eq!(args.grant, Some(100.0));
        assert_eq!(args.seed, Some(7));
        assert_eq!(args.save, PathBuf::from("starminer-save.json"));
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        assert_eq!(
            load_config(None).expect("defaults"),
            SimulationConfig::default()
        );
    }

    #[test]
    fn unreadable_config_reports_path() {
        let error = load_config(Some(Path::new("/definitely/not/here.toml")))
            .expect_err("missing file");
        assert!(error.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn short_run_writes_save_on_exit() {
        let dir = tempfile::tempdir().expect("temp dir");
        let save = dir.path().join("save.json");
        let args = CliArgs::try_parse_from([
            "starminer",
            "--seconds",
            "1",
            "--grant",
            "60",
            "--auto-upgrade",
            "--save",
            save.to_str().expect("utf-8 temp path"),
        ])
        .expect("valid arguments");

        run(args).expect("run succeeds");

        let restored = FileStore::new(&save)
            .load()
            .expect("readable")
            .expect("saved on exit");
        assert!(restored.miner_level >= 1);
    }
}
