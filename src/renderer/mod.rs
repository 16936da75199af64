//! Render boundary
//!
//! `Scene` is a plain snapshot of what to draw this frame. Painting it is up
//! to the platform (`canvas` on web).

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;
use std::f32::consts::{FRAC_PI_2, PI};

use crate::consts::*;
use crate::sim::{GameState, ProjectileKind, SECONDARY_COLOR};

/// Kind-specific extras drawn around a projectile
#[derive(Debug, Clone, PartialEq)]
pub enum Decoration {
    None,
    /// Orbit satellites (absolute positions)
    Satellites(Vec<Vec2>),
    /// Boost charge-up ring, progress in [0, 1]
    Charge(f32),
}

/// One projectile to draw
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub radius: f32,
    /// RGB
    pub color: u32,
    pub decoration: Decoration,
}

/// The player's dot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub pos: Vec2,
    pub radius: f32,
    pub alive: bool,
}

/// Everything needed to paint one frame
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: f32,
    pub height: f32,
    /// Width of the shaded player band
    pub player_area: f32,
    pub player: PlayerView,
    /// Projectiles in spawn order
    pub projectiles: Vec<Drawable>,
    pub elapsed_frames: u64,
    pub difficulty: u32,
    pub game_over: bool,
}

impl Scene {
    pub fn capture(state: &GameState) -> Self {
        let projectiles = state
            .projectiles
            .iter()
            .map(|p| {
                let decoration = match p.kind() {
                    ProjectileKind::Orbit => Decoration::Satellites(p.satellites()),
                    ProjectileKind::Boost => p.charge_progress().map_or(Decoration::None, Decoration::Charge),
                    _ => Decoration::None,
                };
                Drawable {
                    kind: p.kind(),
                    pos: p.pos,
                    radius: p.radius,
                    color: p.color,
                    decoration,
                }
            })
            .collect();

        Self {
            width: state.field.width,
            height: state.field.height,
            player_area: state.field.player_area(),
            player: PlayerView {
                pos: state.player.pos,
                radius: state.player.radius,
                alive: state.player.alive,
            },
            projectiles,
            elapsed_frames: state.elapsed_frames(),
            difficulty: state.difficulty.level(),
            game_over: !state.is_running(),
        }
    }
}

/// Satellite draw style: (radius, color)
pub const SATELLITE_STYLE: (f32, u32) = (SATELLITE_RADIUS, SECONDARY_COLOR);

/// Start/end angles of the Boost charge ring
///
/// The ring sweeps clockwise from 12 o'clock and closes when charge is full.
pub fn charge_arc(progress: f32) -> (f32, f32) {
    let start = -FRAC_PI_2;
    (start, start + progress.clamp(0.0, 1.0) * 2.0 * PI)
}

/// CSS hex string for an RGB tag
pub fn css_color(rgb: u32) -> String {
    format!("#{:06x}", rgb & 0xff_ffff)
}
