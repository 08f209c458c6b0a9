//! Snake Levels entry point
//!
//! Native builds run a headless autopilot session on the virtual clock and
//! print where it ended. The browser shell lives in the library's `web`
//! module.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;

    use snake_levels::Session;
    use snake_levels::frontend::LogFrontend;
    use snake_levels::persistence::JsonFileStore;
    use snake_levels::platform;
    use snake_levels::settings::Settings;
    use snake_levels::sim::GamePhase;

    /// Virtual time advanced per progress report (ms)
    const REPORT_STEP_MS: u64 = 1_000;

    #[derive(Debug, Parser)]
    #[command(name = "snake-levels")]
    #[command(about = "Headless autopilot run on the virtual clock")]
    pub struct Cli {
        /// Level to start on (clamped to the unlocked levels)
        #[arg(long, default_value_t = 1)]
        level: u32,
        /// RNG seed (random by default)
        #[arg(long)]
        seed: Option<u64>,
        /// Virtual seconds to simulate
        #[arg(long, default_value_t = 60)]
        seconds: u64,
        /// Settings JSON file
        #[arg(long)]
        settings: Option<PathBuf>,
        /// Unlock watermark file
        #[arg(long, default_value = "snake-levels-unlock.json")]
        store: PathBuf,
    }

    pub fn run(cli: Cli) {
        platform::init_logging();

        let mut settings = cli
            .settings
            .as_deref()
            .map(Settings::load)
            .unwrap_or_default();
        if cli.seed.is_some() {
            settings.seed = cli.seed;
        }

        let frontend = LogFrontend::new(settings.sound);
        let store = JsonFileStore::new(&cli.store);
        let mut session = Session::new(&settings, Box::new(frontend), Box::new(store));
        session.set_autopilot(true);
        session.start(cli.level);

        let total_ms = cli.seconds.saturating_mul(1_000);
        let mut elapsed = 0;
        while elapsed < total_ms && session.phase() == GamePhase::Running {
            let step = REPORT_STEP_MS.min(total_ms - elapsed);
            session.advance(step);
            elapsed += step;
            let state = session.state();
            log::debug!(
                "t={}ms level {} score {} length {}",
                elapsed,
                state.level,
                state.score,
                state.snake.len()
            );
        }

        let state = session.state();
        let outcome = match state.phase {
            GamePhase::GameOver => "game over",
            _ => "time up",
        };
        println!(
            "{outcome} after {:.1}s: level {}, score {}, length {}, levels unlocked {}",
            elapsed as f64 / 1_000.0,
            state.level,
            state.score,
            state.snake.len(),
            state.highest_unlocked
        );
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    headless::run(headless::Cli::parse());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is snake_levels::web::wasm_main
}
