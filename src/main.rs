//! Dugout entry point
//!
//! The browser build is driven from `web.rs`. Natively this runs headless
//! seeded games with a simple autoplayer and logs every play.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use clap::Parser;

    use dugout::Tuning;
    use dugout::rules;
    use dugout::sim::{BattingSession, FieldingSession, PlayEvent, Roll, RngState};

    /// Frame interval for the fielding loop (60 Hz)
    const FRAME_MS: u64 = 16;
    /// Safety cap so a stuck autoplayer cannot spin forever
    const MAX_STEPS: u64 = 200_000;

    #[derive(Parser, Debug)]
    #[command(name = "dugout", about = "Autoplay seeded batting and fielding games")]
    pub struct Args {
        /// Seed for both games
        #[arg(long, default_value_t = 12345)]
        pub seed: u64,

        /// Tuning JSON file overriding the defaults
        #[arg(long)]
        pub tuning: Option<std::path::PathBuf>,

        /// Print the rule card after each play
        #[arg(long)]
        pub rules: bool,
    }

    fn report(event: &PlayEvent, show_rules: bool) {
        log::info!("{:<16} {} (runs: {})", event.outcome.id(), event.message, event.runs);
        if show_rules {
            if let Some(rule) = rules::for_outcome(event.outcome) {
                println!("  [{}] {}", rule.name, rule.short_description);
            }
        }
    }

    fn load_tuning(args: &Args) -> Tuning {
        let Some(path) = &args.tuning else {
            return Tuning::default();
        };
        let loaded = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
        match loaded {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path.display(), e);
                Tuning::default()
            }
        }
    }

    /// Swings at roughly two pitches in three, bunting now and then
    fn play_batting(args: &Args, tuning: Tuning) {
        let mut session = BattingSession::with_tuning(args.seed, tuning);
        let mut batter = RngState::new(args.seed ^ 0xBA77).to_rng();
        let mut now = 0;
        let mut steps = 0;

        while !session.state().game_over && steps < MAX_STEPS {
            steps += 1;
            let Ok(pitch) = session.start_pitch(now) else {
                break;
            };
            let flight = pitch.kind.flight_ms(&session.tuning().batting);
            for event in session.advance(now + flight / 2) {
                report(&event, args.rules);
            }
            if batter.roll() < 0.65 {
                let bunt = batter.roll() < 0.1;
                match session.swing(now + flight / 2, bunt) {
                    Ok(event) => report(&event, args.rules),
                    Err(e) => log::debug!("Swing ignored: {e}"),
                }
            }
            now += flight + 1000;
            for event in session.advance(now) {
                report(&event, args.rules);
            }
        }

        let score = session.state().score;
        println!("Batting final: away {} - home {}", score.away, score.home);
    }

    /// Glove chases the ball with limited speed
    fn play_fielding(args: &Args, tuning: Tuning) {
        let mut session = FieldingSession::with_tuning(args.seed, tuning);
        session.start();
        let mut now = 0;

        while !session.state().game_over && now / FRAME_MS < MAX_STEPS {
            now += FRAME_MS;
            let glove = session.glove();
            let aim = match session.ball() {
                Some(ball) => glove + (ball.target - glove).clamp_length_max(0.9),
                None => {
                    if let Err(e) = session.hit() {
                        log::debug!("Hit ignored: {e}");
                    }
                    glove
                }
            };
            if let Err(e) = session.move_glove(aim.x, aim.y) {
                log::debug!("Glove ignored: {e}");
            }
            for event in session.frame(now) {
                report(&event, args.rules);
            }
        }

        let score = session.state().score;
        println!(
            "Fielding final: away {} - home {} ({} catches, {} misses)",
            score.away,
            score.home,
            session.catches(),
            session.misses()
        );
    }

    pub fn run() {
        env_logger::init();
        let args = Args::parse();
        log::info!("Dugout (native) starting with seed: {}", args.seed);
        let tuning = load_tuning(&args);
        play_batting(&args, tuning.clone());
        play_fielding(&args, tuning);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is dugout::web::wasm_start, this is just to satisfy the compiler
}
