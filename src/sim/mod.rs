//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed external tick only
//! - Seeded RNG only, owned by the session
//! - Fixed update order
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod light;
pub mod obstacle;
pub mod player;
pub mod road;
pub mod session;
pub mod tick;

pub use camera::{Camera, Parallax};
pub use collision::{WorldBox, obstacle_strike, resolve_player_pair};
pub use light::{LightState, TrafficLight};
pub use obstacle::{Obstacle, ObstacleLane};
pub use player::{Player, PlayerInput};
pub use road::RoadProjection;
pub use session::{
    CameraSnapshot, ObstacleSnapshot, PLAYER_COUNT, PlayerSnapshot, RaceOutcome, RaceSession,
    RaceSnapshot, WinReason,
};
pub use tick::{TickInput, tick};
