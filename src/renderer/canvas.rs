//! Canvas2D painter for the browser build

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::{Decoration, SATELLITE_STYLE, Scene, charge_arc, css_color};
use crate::format_survival;
use crate::session::RunResult;

const BAND_COLOR: &str = "#333";
const WALL_COLOR: &str = "#fff";
const PLAYER_COLOR: &str = "#fff";
const WALL_THICKNESS: f64 = 4.0;
const CHARGE_RING_RADIUS: f64 = 15.0;

fn circle(ctx: &CanvasRenderingContext2d, x: f32, y: f32, r: f32, color: &str) {
    ctx.begin_path();
    let _ = ctx.arc(x as f64, y as f64, r as f64, 0.0, TAU);
    ctx.set_fill_style_str(color);
    ctx.fill();
}

/// Paint one frame
///
/// `result` is the run that just ended, shown on the game-over overlay.
pub fn paint(ctx: &CanvasRenderingContext2d, scene: &Scene, result: Option<RunResult>, show_hud: bool) {
    let (w, h) = (scene.width as f64, scene.height as f64);
    ctx.clear_rect(0.0, 0.0, w, h);

    ctx.set_fill_style_str(BAND_COLOR);
    ctx.fill_rect(0.0, 0.0, scene.player_area as f64, h);

    circle(ctx, scene.player.pos.x, scene.player.pos.y, scene.player.radius, PLAYER_COLOR);

    for d in &scene.projectiles {
        let color = css_color(d.color);
        circle(ctx, d.pos.x, d.pos.y, d.radius, &color);
        match &d.decoration {
            Decoration::None => {}
            Decoration::Satellites(sats) => {
                let (radius, tag) = SATELLITE_STYLE;
                let sat_color = css_color(tag);
                for s in sats {
                    circle(ctx, s.x, s.y, radius, &sat_color);
                }
            }
            Decoration::Charge(progress) => {
                let (start, end) = charge_arc(*progress);
                ctx.begin_path();
                let _ = ctx.arc(
                    d.pos.x as f64,
                    d.pos.y as f64,
                    CHARGE_RING_RADIUS,
                    start as f64,
                    end as f64,
                );
                ctx.set_stroke_style_str(&color);
                ctx.set_line_width(3.0);
                ctx.stroke();
            }
        }
    }

    ctx.set_fill_style_str(WALL_COLOR);
    ctx.fill_rect(0.0, 0.0, w, WALL_THICKNESS);
    ctx.fill_rect(0.0, h - WALL_THICKNESS, w, WALL_THICKNESS);

    if show_hud && !scene.game_over {
        ctx.set_fill_style_str("#aaa");
        ctx.set_font("16px sans-serif");
        ctx.set_text_align("left");
        let _ = ctx.fill_text(
            &format!("{}  Lv {}", format_survival(scene.elapsed_frames), scene.difficulty),
            12.0,
            26.0,
        );
    }

    if let Some(result) = result.filter(|_| scene.game_over) {
        ctx.set_fill_style_str("rgba(0,0,0,0.7)");
        ctx.fill_rect(0.0, 0.0, w, h);
        ctx.set_fill_style_str("#fff");
        ctx.set_text_align("center");
        ctx.set_font("36px sans-serif");
        let _ = ctx.fill_text("Game Over", w / 2.0, h / 2.0 - 40.0);
        ctx.set_font("20px sans-serif");
        let _ = ctx.fill_text(
            &format!("Survived: {}", format_survival(result.elapsed_frames)),
            w / 2.0,
            h / 2.0,
        );
        let best = if result.new_best {
            "New best!".to_string()
        } else {
            format!("Best: {}", format_survival(result.best_frames))
        };
        let _ = ctx.fill_text(&best, w / 2.0, h / 2.0 + 40.0);
    }
}
