//! Paper Dash entry point
//!
//! Native builds run a headless frame driver: the autopilot plays a handful
//! of runs at a fixed cadence and the results are logged. The browser build
//! is driven from JavaScript through `platform::web`.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result, bail};
    use clap::Parser;
    use serde::Serialize;

    use paper_dash::sim::{GameState, RunPhase, TickInput, Viewport, tick};
    use paper_dash::{QualityPreset, Settings, Tuning};

    #[derive(Parser, Debug)]
    #[command(name = "paper-dash", about = "Headless Paper Dash runs driven by the autopilot")]
    struct Args {
        /// RNG seed (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Number of runs to play
        #[arg(long, default_value_t = 3)]
        runs: u32,
        /// Time limit per run, in simulated seconds
        #[arg(long, default_value_t = 120.0)]
        seconds: f32,
        /// Frame rate of the simulated display
        #[arg(long, default_value_t = 60.0)]
        fps: f32,
        #[arg(long, default_value_t = 1280.0)]
        width: f32,
        #[arg(long, default_value_t = 720.0)]
        height: f32,
        /// JSON tuning file
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// low | medium | high
        #[arg(long, default_value = "medium")]
        quality: String,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
        /// Print the default tuning table and exit
        #[arg(long)]
        dump_tuning: bool,
    }

    #[derive(Debug, Serialize)]
    struct RunSummary {
        run: u32,
        score: u64,
        dodged: u32,
        seconds: f32,
        top_speed: f32,
        caught: bool,
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading tuning file {}", path.display()))?;
        let tuning = Tuning::from_json(&json)
            .with_context(|| format!("loading tuning from {}", path.display()))?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn run() -> Result<()> {
        env_logger::init();
        let args = Args::parse();

        if args.dump_tuning {
            println!("{}", Tuning::default().to_json()?);
            return Ok(());
        }
        if !(args.fps.is_finite() && args.fps > 0.0) {
            bail!("--fps must be a positive number, got {}", args.fps);
        }
        let quality = QualityPreset::parse(&args.quality)
            .with_context(|| format!("unknown quality preset `{}`", args.quality))?;

        let tuning = load_tuning(args.tuning.as_ref())?;
        let seed = args.seed.unwrap_or_else(rand::random);
        log::info!("Paper Dash (native) starting with seed {}", seed);

        let viewport = Viewport::new(args.width, args.height);
        let settings = Settings::from_preset(quality);

        let dt = 1.0 / args.fps;
        let frames_per_run = (args.seconds.max(0.0) * args.fps).ceil() as u64;
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };

        let mut summaries = Vec::with_capacity(args.runs as usize);
        for run in 1..=args.runs {
            // Fresh state per run; a run that hit the time limit is still Running
            let mut state = GameState::new(seed.wrapping_add(run as u64), viewport, tuning.clone());
            settings.apply(&mut state);
            state.start();
            let mut top_speed = state.world.speed;
            for _ in 0..frames_per_run {
                tick(&mut state, &input, dt);
                top_speed = top_speed.max(state.world.speed);
                if state.phase != RunPhase::Running {
                    break;
                }
            }

            let summary = RunSummary {
                run,
                score: state.world.score(),
                dodged: state.world.dodged_count,
                seconds: state.run_time,
                top_speed,
                caught: state.phase == RunPhase::GameOver,
            };
            if !args.json {
                println!(
                    "run {:>3}: score {:>6}  dodged {:>4}  {:>6.1}s  top speed {:>4.0}  {}",
                    summary.run,
                    summary.score,
                    summary.dodged,
                    summary.seconds,
                    summary.top_speed,
                    if summary.caught { "CAUGHT" } else { "time up" }
                );
            }
            summaries.push(summary);
        }

        if args.json {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_main, this is just to satisfy the compiler
}
