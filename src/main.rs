//! Greenlight demo entry point
//!
//! Runs a scripted race headlessly at a fixed 60 Hz tick: player 1 obeys the
//! light, player 2 keeps creeping on red and pays the reverse penalty. Useful
//! for eyeballing the simulation without a renderer attached.
//!
//! Usage: greenlight [--seed N] [tuning.json]

use greenlight::Tuning;
use greenlight::sim::{LightState, RaceSession, TickInput, tick};

const DT_MS: f32 = 1000.0 / 60.0;
const MAX_RACE_MS: f32 = 120_000.0;

fn parse_args() -> (u64, Option<String>) {
    let mut seed = 0xC0FFEE;
    let mut tuning_path = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                if let Some(value) = args.next().and_then(|v| v.parse().ok()) {
                    seed = value;
                } else {
                    log::warn!("--seed expects an integer; keeping {seed}");
                }
            }
            path => tuning_path = Some(path.to_string()),
        }
    }
    (seed, tuning_path)
}

fn load_tuning(path: Option<&str>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };
    match std::fs::read_to_string(path).map_err(|e| e.to_string()) {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(tuning) => {
                log::info!("loaded tuning from {path}");
                tuning
            }
            Err(e) => {
                log::error!("bad tuning file {path}: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            log::error!("cannot read {path}: {e}");
            std::process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();
    let (seed, tuning_path) = parse_args();
    let tuning = load_tuning(tuning_path.as_deref());

    let mut session = match RaceSession::new(tuning, seed) {
        Ok(session) => session,
        Err(e) => {
            log::error!("invalid tuning: {e}");
            std::process::exit(1);
        }
    };

    let mut input = TickInput::default();
    let mut last_light = session.snapshot().light;

    while !session.is_terminal() {
        let snap = session.snapshot();
        if snap.elapsed_ms > MAX_RACE_MS {
            log::warn!("race still running after {MAX_RACE_MS} ms, stopping");
            break;
        }

        // player 1 lifts off on red; player 2 keeps rolling and reverses
        input.players[0].speed_multiplier = match snap.light {
            LightState::Red => 0.0,
            _ => 1.1,
        };
        input.players[1].speed_multiplier = 0.85;
        // gentle weave so the side bump and road confinement get exercised
        let phase = (snap.tick / 90) % 2 == 0;
        input.players[1].steer_left = phase;
        input.players[1].steer_right = !phase;

        tick(&mut session, &input, DT_MS);

        let snap = session.snapshot();
        if snap.light != last_light {
            log::info!(
                "[{:6.0} ms] light -> {:?}  p1 {:8.1}  p2 {:8.1}",
                snap.elapsed_ms,
                snap.light,
                snap.players[0].progress,
                snap.players[1].progress,
            );
            last_light = snap.light;
        }
    }

    let outcome = session.outcome();
    match (outcome.winner, outcome.reason) {
        (Some(winner), Some(reason)) => {
            println!(
                "player {} wins after {:.1} s ({:?})",
                winner + 1,
                session.snapshot().elapsed_ms / 1000.0,
                reason
            );
        }
        _ => println!("no winner"),
    }
}
