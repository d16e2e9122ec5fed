//! Bank Shot entry point
//!
//! Headless host: plays seeded autoplay shots on a built-in course and logs
//! each episode.
//!
//! Usage: `bank-shot [settings.json] [seed]`

use std::path::Path;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use bank_shot::Settings;
use bank_shot::consts::*;
use bank_shot::sim::{Arena, Game, LogNotifier, Outcome, SurfaceTag, TickInput};

/// Autoplay episodes per run
const EPISODES: u32 = 10;
/// Give up on an episode after this much simulated time
const EPISODE_TIMEOUT_SECS: f32 = 30.0;
/// Simulated frame length fed to the fixed-step accumulator
const FRAME_DT: f32 = 1.0 / 60.0;

#[derive(Debug, Serialize)]
struct EpisodeSummary {
    episode: u32,
    drag: (f32, f32),
    outcome: Option<Outcome>,
    ticks: u64,
    bounces_left: u32,
    final_pos: (f32, f32),
}

/// Portrait course: walled box, an invisible divider and a goal near the top
fn demo_course() -> (Arena, Vec2) {
    let half = Vec2::new(2.8, 5.0);
    let arena = Arena::boxed(half, AVATAR_RADIUS, SurfaceTag::Wall).with_segment(
        Vec2::new(-half.x, 1.5),
        Vec2::new(0.0, 1.5),
        SurfaceTag::InvisibleWall,
    );
    (arena, Vec2::new(1.4, 3.8))
}

/// Run fixed-step ticks until the game finishes or times out
fn play_episode(game: &mut Game<LogNotifier, Arena>, drag: Vec2) -> Option<Outcome> {
    let start = game.settings().start_position;
    let launch = TickInput {
        pointer_down: Some(start),
        pointer_up: Some(start + drag),
        ..Default::default()
    };
    game.tick(&launch, SIM_DT);

    let mut accumulator = 0.0;
    let mut elapsed = 0.0;
    let idle = TickInput::default();
    while game.avatar().is_moving() && elapsed < EPISODE_TIMEOUT_SECS {
        accumulator += FRAME_DT;
        elapsed += FRAME_DT;

        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            game.tick(&idle, SIM_DT);
            accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    if game.avatar().is_moving() {
        log::warn!("Episode timed out after {:.0}s", elapsed);
    }
    game.outcome()
}

fn main() {
    env_logger::init();
    log::info!("Bank Shot (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(7);
    log::info!("Seed {}, settings {:?}", seed, settings);

    let (arena, goal) = demo_course();
    let mut game = Game::new(settings, LogNotifier, arena, Some(goal));
    let mut rng = Pcg32::seed_from_u64(seed);

    let mut wins = 0;
    for episode in 0..EPISODES {
        // Pull back and down-ish so the shot heads up the course
        let angle = rng.random_range(-2.6f32..-0.5);
        let length = rng.random_range(1.0f32..6.0);
        let drag = Vec2::from_angle(angle) * length;

        let ticks_before = game.time_ticks();
        let outcome = play_episode(&mut game, drag);
        if outcome == Some(Outcome::Won) {
            wins += 1;
        }

        let avatar = game.avatar();
        let summary = EpisodeSummary {
            episode,
            drag: (drag.x, drag.y),
            outcome,
            ticks: game.time_ticks() - ticks_before,
            bounces_left: avatar.bounces_left,
            final_pos: (avatar.pos.x, avatar.pos.y),
        };
        match serde_json::to_string(&summary) {
            Ok(json) => log::info!("{}", json),
            Err(e) => log::warn!("Cannot encode summary: {}", e),
        }

        game.tick(
            &TickInput {
                reset: true,
                ..Default::default()
            },
            SIM_DT,
        );
    }

    log::info!("Won {} of {} episodes", wins, EPISODES);
}
