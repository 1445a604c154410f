//! Butterfly Effect entry point
//!
//! Runs a scene headless on a fixed timestep and reports what happened.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use butterfly_effect::sim::TickReport;
use butterfly_effect::{Director, SceneId, Settings};

/// Dev tooling to choose the scene to start.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Starting scene (splash, title, kinematic); unknown names start at the splash
    #[arg(short = 's', long = "start-scene")]
    start_scene: Option<String>,

    /// Settings file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated seconds to run
    #[arg(long)]
    seconds: Option<f32>,

    /// Print the final world as JSON
    #[arg(long)]
    dump: bool,
}

/// Fixed-timestep driver holding the director and the accumulator
struct Runner {
    director: Director,
    settings: Settings,
    accumulator: f32,
    totals: TickReport,
    ticks: u64,
}

impl Runner {
    fn new(director: Director, settings: Settings) -> Self {
        Self {
            director,
            settings,
            accumulator: 0.0,
            totals: TickReport::default(),
            ticks: 0,
        }
    }

    /// Feed one frame's worth of time into the simulation
    fn update(&mut self, frame_dt: f32) -> anyhow::Result<()> {
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= self.settings.sim_dt && substeps < self.settings.max_substeps {
            let report = self.director.advance(self.settings.sim_dt)?;
            self.totals.contacts += report.contacts;
            self.totals.impulses += report.impulses;
            self.totals.splits += report.splits;
            self.accumulator -= self.settings.sim_dt;
            self.ticks += 1;
            substeps += 1;
        }

        if substeps == self.settings.max_substeps && self.accumulator >= self.settings.sim_dt {
            log::warn!("Simulation falling behind, dropping {:.3}s", self.accumulator);
            self.accumulator = 0.0;
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let settings = match &args.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let start = SceneId::resolve(args.start_scene.as_deref());
    let director = Director::new(start).context("building starting scene")?;
    let seconds = args.seconds.unwrap_or(settings.default_seconds).max(0.0);
    let frame_dt = settings.effective_frame_dt();

    log::info!("Butterfly Effect starting...");
    let mut runner = Runner::new(director, settings);

    let frames = (seconds / frame_dt).ceil() as u64;
    for _ in 0..frames {
        runner.update(frame_dt)?;
    }

    let scene = runner.director.scene();
    log::info!(
        "Ran {} ticks; scene {} has {} bodies; {} contacts, {} impulses, {} splits",
        runner.ticks,
        scene.id.as_str(),
        scene.world.len(),
        runner.totals.contacts,
        runner.totals.impulses,
        runner.totals.splits,
    );
    log::info!(
        "Momentum {}, kinetic energy {:.4}",
        scene.world.total_momentum(),
        scene.world.kinetic_energy()
    );

    if args.dump {
        let json = serde_json::to_string_pretty(&scene.world).context("serializing world")?;
        println!("{}", json);
    }

    Ok(())
}
