//! Shoot UFO entry point
//!
//! Headless native runner: plays a session with a synthetic tilt signal and a
//! steady stream of taps, logging every presentation event as JSON.
//!
//! Environment:
//! - `SHOOT_UFO_TUNING`: path to a tuning JSON file
//! - `SHOOT_UFO_SEED`, `SHOOT_UFO_SECONDS`, `SHOOT_UFO_WIDTH`, `SHOOT_UFO_HEIGHT`

use std::env;

use shoot_ufo::Tuning;
use shoot_ufo::consts::*;
use shoot_ufo::sim::{
    AccelerationSample, EffectError, EffectsSink, GameEvent, GameState, Playfield, TickInput, tick,
};

/// Accelerometer sample period (10 Hz)
const SAMPLE_INTERVAL: f32 = 0.1;
/// Seconds between synthetic taps
const FIRE_INTERVAL: f32 = 0.25;
/// Wall-clock frame length fed to the accumulator
const FRAME_DT: f32 = 1.0 / 30.0;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn load_tuning() -> Tuning {
    match env::var("SHOOT_UFO_TUNING") {
        Ok(path) => Tuning::load(&path).unwrap_or_else(|err| {
            log::warn!("{}; using default tuning", err);
            Tuning::default()
        }),
        Err(_) => Tuning::default(),
    }
}

/// Logs each event as a JSON line
#[derive(Default)]
struct LogSink {
    emitted: u64,
}

impl EffectsSink for LogSink {
    fn emit(&mut self, event: &GameEvent) -> Result<(), EffectError> {
        let json =
            serde_json::to_string(event).map_err(|err| EffectError::Rejected(err.to_string()))?;
        log::debug!("{}", json);
        self.emitted += 1;
        Ok(())
    }
}

/// Game instance holding all state
struct Game {
    state: GameState,
    sink: LogSink,
    accumulator: f32,
    input: TickInput,
    clock: f32,
    next_sample: f32,
    next_fire: f32,
}

impl Game {
    fn new(playfield: Playfield, tuning: Tuning, seed: u64) -> Self {
        Self {
            state: GameState::new(playfield, tuning, seed),
            sink: LogSink::default(),
            accumulator: 0.0,
            input: TickInput::default(),
            clock: 0.0,
            next_sample: 0.0,
            next_fire: FIRE_INTERVAL,
        }
    }

    /// Feed external events that arrived during this frame
    fn poll_devices(&mut self) {
        while self.clock >= self.next_sample {
            // Slow side-to-side sweep, overshooting the clamp at the extremes
            let ax = (self.next_sample * 0.8).sin() * 0.8;
            self.input.acceleration = Some(AccelerationSample::new(ax, 0.0, -1.0));
            self.next_sample += SAMPLE_INTERVAL;
        }
        while self.clock >= self.next_fire {
            self.input.fire += 1;
            self.next_fire += FIRE_INTERVAL;
        }
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.clock += dt;
        self.poll_devices();
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.input.clone();
            tick(&mut self.state, &input, SIM_DT, &mut self.sink);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.acceleration = None;
            self.input.fire = 0;
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Shoot UFO (headless) starting...");

    let tuning = load_tuning();
    let seed: u64 = env_or("SHOOT_UFO_SEED", 12345);
    let seconds: f32 = env_or("SHOOT_UFO_SECONDS", 30.0);
    let playfield = Playfield::new(
        env_or("SHOOT_UFO_WIDTH", 750.0),
        env_or("SHOOT_UFO_HEIGHT", 1334.0),
    );

    let mut game = Game::new(playfield, tuning, seed);
    game.state.start(&mut game.sink);

    let frames = (seconds / FRAME_DT).ceil() as u32;
    for _ in 0..frames {
        game.update(FRAME_DT);
    }

    log::info!(
        "Session ended after {:.1}s: {} events, {} enemies on screen",
        game.state.elapsed,
        game.sink.emitted,
        game.state.enemies().count()
    );
    println!("Score: {}", game.state.score());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> Game {
        let mut game = Game::new(Playfield::new(750.0, 1334.0), Tuning::default(), 3);
        game.state.start(&mut game.sink);
        game
    }

    #[test]
    fn test_headless_session_advances() {
        let mut game = started();
        for _ in 0..30 {
            game.update(FRAME_DT);
        }
        assert!((58..=60).contains(&game.state.time_ticks));
        assert!(game.sink.emitted > 0);
    }

    #[test]
    fn test_long_frame_caps_substeps() {
        let mut game = started();
        game.update(5.0);
        assert!(game.state.time_ticks <= u64::from(MAX_SUBSTEPS));
    }
}
