//! Per-micro-step projectile motion and kind-specific behaviors
//!
//! Each micro-step applies 1/5 of a projectile's per-frame velocity, so five
//! micro-steps per rendered frame move it by its full velocity.

use glam::Vec2;
use rand::Rng;

use super::physics::{clamp_leftward, reflect, touching_wall, unit_toward, within_bounds};
use super::projectile::{Behavior, Projectile};
use super::spawner::{random_launch_angle, spawn_secondary};
use super::state::{Field, GameEvent};
use crate::consts::*;

/// World facts a projectile may react to during a micro-step
#[derive(Debug, Clone, Copy)]
pub struct StepContext {
    pub field: Field,
    pub player_pos: Vec2,
    pub difficulty: u32,
}

/// Shooter fire period in micro-steps at a difficulty
#[inline]
pub fn shooter_period(difficulty: u32) -> u32 {
    SHOOTER_PERIOD
        .saturating_sub(difficulty * SHOOTER_PERIOD_STEP)
        .max(1)
}

/// Advance one projectile by one micro-step
///
/// Secondaries it fires are pushed to `spawned`; the caller appends them to
/// the live collection once the whole pass is done.
pub fn advance<R: Rng>(p: &mut Projectile, ctx: &StepContext, rng: &mut R, spawned: &mut Vec<Projectile>) {
    // Secondaries are ballistic and leave through the walls
    if !matches!(p.behavior, Behavior::Small) && touching_wall(p.pos, p.vel, p.radius, ctx.field.height) {
        (p.vel, p.reflections) = reflect(p.vel, p.reflections);
    }
    p.vel = clamp_leftward(p.vel);

    let difficulty = ctx.difficulty as f32;
    match &mut p.behavior {
        Behavior::Normal | Behavior::Small => {
            p.pos += p.vel * SUB_STEP;
        }
        Behavior::Orbit {
            angles, rotation, ..
        } => {
            p.pos += p.vel * SUB_STEP;
            let delta = ORBIT_ANGULAR_RATE * *rotation;
            for angle in angles.iter_mut() {
                *angle += delta;
            }
        }
        Behavior::Shooter { fire_timer } => {
            p.pos += p.vel * SUB_STEP;
            *fire_timer += 1;
            if *fire_timer % shooter_period(ctx.difficulty) == 0 {
                let angle = random_launch_angle(rng);
                spawned.push(spawn_secondary(p.pos, angle, SHOOTER_SHOT_SPEED + difficulty));
            }
        }
        Behavior::Boost {
            stall_timer,
            boosted,
            accel,
        } => {
            if *boosted {
                p.vel = clamp_leftward(p.vel + *accel * BOOST_ACCEL);
                p.pos += p.vel * SUB_STEP;
            } else {
                // Position freezes the moment stalling starts
                if *stall_timer == 0 {
                    p.pos += p.vel * SUB_STEP;
                }
                if p.pos.x < ctx.field.player_area() * BOOST_STALL_LINE {
                    *stall_timer += 1;
                }
                if *stall_timer > BOOST_STALL_TICKS {
                    let dir = unit_toward(p.pos, ctx.player_pos).unwrap_or_else(|| {
                        log::warn!("Boost homing from the player's own position, launching straight left");
                        Vec2::NEG_X
                    });
                    *accel = dir;
                    p.vel = clamp_leftward(dir);
                    *boosted = true;
                }
            }
        }
        Behavior::Fan {
            fan_timer,
            fired,
            base_angle,
        } => {
            p.pos += p.vel * SUB_STEP;
            *fan_timer += 1;
            if !*fired && *fan_timer > FAN_DELAY {
                let speed = FAN_SHOT_SPEED + difficulty * FAN_SHOT_SPEED_STEP;
                for k in -FAN_HALF_WIDTH..=FAN_HALF_WIDTH {
                    let angle = *base_angle + k as f32 * FAN_SPREAD;
                    spawned.push(spawn_secondary(p.pos, angle, speed));
                }
                *fired = true;
            }
        }
    }
}

/// Drop projectiles that left the field by more than the cull margin
pub fn cull(projectiles: &mut Vec<Projectile>, field: &Field) {
    projectiles.retain(|p| within_bounds(p.pos, field.width, field.height, CULL_MARGIN));
}

/// One micro-step over the whole collection: advance, append secondaries, cull
///
/// Secondary bursts are reported through `events`.
pub fn step_all<R: Rng>(
    projectiles: &mut Vec<Projectile>,
    ctx: &StepContext,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) {
    let mut spawned = Vec::new();
    for p in projectiles.iter_mut() {
        let before = spawned.len();
        advance(p, ctx, rng, &mut spawned);
        let fired = spawned.len() - before;
        if fired > 0 {
            log::debug!("{} fired {} secondaries", p.kind().as_str(), fired);
            events.push(GameEvent::SecondaryFired {
                from: p.kind(),
                count: fired as u32,
            });
        }
    }
    projectiles.append(&mut spawned);
    cull(projectiles, &ctx.field);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::projectile::ProjectileKind;
    use crate::sim::spawner::spawn_main;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ctx() -> StepContext {
        StepContext {
            field: Field::new(800.0, 600.0),
            player_pos: Vec2::new(140.0, 300.0),
            difficulty: 1,
        }
    }

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(42)
    }

    #[test]
    fn test_normal_moves_fifth_of_velocity() {
        let mut p = Projectile::new(Vec2::new(500.0, 300.0), Vec2::new(-5.0, 2.5), Behavior::Normal);
        let mut out = Vec::new();
        advance(&mut p, &ctx(), &mut rng(), &mut out);
        assert!((p.pos - Vec2::new(499.0, 300.5)).length() < 1e-4);
        assert!(out.is_empty());
    }

    #[test]
    fn test_five_micro_steps_net_full_velocity() {
        let mut p = Projectile::new(Vec2::new(500.0, 300.0), Vec2::new(-5.0, 0.0), Behavior::Normal);
        let mut out = Vec::new();
        let mut rng = rng();
        for _ in 0..MICRO_STEPS {
            advance(&mut p, &ctx(), &mut rng, &mut out);
        }
        assert!((p.pos.x - 495.0).abs() < 1e-3);
    }

    #[test]
    fn test_rightward_velocity_is_flipped() {
        let mut p = Projectile::new(Vec2::new(500.0, 300.0), Vec2::new(3.0, 0.0), Behavior::Small);
        advance(&mut p, &ctx(), &mut rng(), &mut Vec::new());
        assert_eq!(p.vel.x, -3.0);
        assert!(p.pos.x < 500.0);
    }

    #[test]
    fn test_wall_reflection() {
        let mut p = Projectile::new(Vec2::new(500.0, 5.0), Vec2::new(-1.0, -2.0), Behavior::Normal);
        advance(&mut p, &ctx(), &mut rng(), &mut Vec::new());
        assert_eq!(p.vel.y, 2.0);
        assert_eq!(p.reflections, 1);
    }

    #[test]
    fn test_small_passes_through_walls() {
        let mut p = Projectile::new(Vec2::new(500.0, 5.0), Vec2::new(-1.0, -2.0), Behavior::Small);
        advance(&mut p, &ctx(), &mut rng(), &mut Vec::new());
        assert_eq!(p.vel, Vec2::new(-1.0, -2.0));
        assert_eq!(p.reflections, 0);
        assert!(p.pos.y < 5.0);

        let mut p = Projectile::new(Vec2::new(500.0, 595.0), Vec2::new(-1.0, 2.0), Behavior::Small);
        advance(&mut p, &ctx(), &mut rng(), &mut Vec::new());
        assert_eq!(p.vel.y, 2.0);
        assert_eq!(p.reflections, 0);
    }

    #[test]
    fn test_boost_with_non_finite_player_falls_back() {
        let ctx = StepContext {
            player_pos: Vec2::new(f32::NAN, 100.0),
            ..ctx()
        };
        let mut p = Projectile::new(
            Vec2::new(100.0, 100.0),
            Vec2::ZERO,
            Behavior::Boost {
                stall_timer: BOOST_STALL_TICKS,
                boosted: false,
                accel: Vec2::ZERO,
            },
        );
        advance(&mut p, &ctx, &mut rng(), &mut Vec::new());
        assert_eq!(p.vel, Vec2::NEG_X);
    }

    #[test]
    fn test_reflection_cap_lets_projectile_through() {
        let mut p = Projectile::new(Vec2::new(500.0, 5.0), Vec2::new(-1.0, -2.0), Behavior::Normal);
        p.reflections = MAX_REFLECTIONS;
        advance(&mut p, &ctx(), &mut rng(), &mut Vec::new());
        assert_eq!(p.vel.y, -2.0);
        assert_eq!(p.reflections, MAX_REFLECTIONS);
        assert!(p.pos.y < 5.0);
    }

    #[test]
    fn test_orbit_rotates() {
        let mut p = Projectile::new(Vec2::new(500.0, 300.0), Vec2::new(-4.0, 0.0), Behavior::orbit(2, -1.0));
        advance(&mut p, &ctx(), &mut rng(), &mut Vec::new());
        let Behavior::Orbit { angles, .. } = &p.behavior else {
            unreachable!()
        };
        assert!((angles[0] + ORBIT_ANGULAR_RATE).abs() < 1e-7);
        assert_eq!(angles.len(), 6);
    }

    #[test]
    fn test_shooter_fires_on_period() {
        let ctx = StepContext {
            difficulty: 2,
            ..ctx()
        };
        let period = shooter_period(2);
        assert_eq!(period, 290);

        let mut p = Projectile::new(Vec2::new(790.0, 300.0), Vec2::new(-0.1, 0.0), Behavior::shooter());
        let mut out = Vec::new();
        let mut rng = rng();
        for _ in 0..period - 1 {
            advance(&mut p, &ctx, &mut rng, &mut out);
        }
        assert!(out.is_empty());
        advance(&mut p, &ctx, &mut rng, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].kind(), ProjectileKind::Small);
        assert_eq!(out[0].pos, p.pos);
        assert!((out[0].vel.length() - (SHOOTER_SHOT_SPEED + 2.0)).abs() < 1e-4);
    }

    #[test]
    fn test_fan_fires_once() {
        let mut p = Projectile::new(Vec2::new(790.0, 300.0), Vec2::new(-0.1, 0.0), Behavior::fan(0.0));
        let mut out = Vec::new();
        let mut rng = rng();
        for _ in 0..FAN_DELAY {
            advance(&mut p, &ctx(), &mut rng, &mut out);
        }
        assert!(out.is_empty());
        advance(&mut p, &ctx(), &mut rng, &mut out);
        assert_eq!(out.len(), 5);
        for _ in 0..200 {
            advance(&mut p, &ctx(), &mut rng, &mut out);
        }
        assert_eq!(out.len(), 5);

        let speed = FAN_SHOT_SPEED + FAN_SHOT_SPEED_STEP;
        // Middle shot goes along the base angle
        assert!((out[2].vel - Vec2::new(-speed, 0.0)).length() < 1e-4);
        assert!((out[0].vel.y - speed * (-2.0 * FAN_SPREAD).sin()).abs() < 1e-4);
    }

    #[test]
    fn test_boost_stalls_then_homes() {
        let ctx = StepContext {
            field: Field::new(800.0, 600.0),
            player_pos: Vec2::new(50.0, 50.0),
            difficulty: 4,
        };
        // Already past the stall line (280 * 1.3 = 364)
        let mut p = Projectile::new(Vec2::new(250.0, 50.0), Vec2::new(-4.0, 0.0), Behavior::boost());
        let mut rng = rng();
        let mut out = Vec::new();

        // First step integrates, then starts stalling
        advance(&mut p, &ctx, &mut rng, &mut out);
        let frozen = p.pos;
        assert!((frozen.x - 249.2).abs() < 1e-3);

        for _ in 0..BOOST_STALL_TICKS - 1 {
            advance(&mut p, &ctx, &mut rng, &mut out);
            assert_eq!(p.pos, frozen);
        }
        assert!(matches!(p.behavior, Behavior::Boost { boosted: false, .. }));
        assert_eq!(p.charge_progress(), Some(1.0));

        // Stall timer reaches 81: velocity becomes the unit vector toward the player
        advance(&mut p, &ctx, &mut rng, &mut out);
        assert!(matches!(p.behavior, Behavior::Boost { boosted: true, .. }));
        assert!((p.vel - Vec2::new(-1.0, 0.0)).length() < 1e-5);
        assert_eq!(p.charge_progress(), None);

        // Subsequent steps accelerate toward the player
        let speed_before = p.vel.x.abs();
        advance(&mut p, &ctx, &mut rng, &mut out);
        assert!(p.vel.x.abs() > speed_before);
        assert!(p.pos.x < frozen.x);
        assert!(out.is_empty());
    }

    #[test]
    fn test_boost_moves_before_stall_line() {
        let mut p = Projectile::new(Vec2::new(700.0, 300.0), Vec2::new(-5.0, 0.0), Behavior::boost());
        for _ in 0..10 {
            advance(&mut p, &ctx(), &mut rng(), &mut Vec::new());
        }
        assert!((p.pos.x - 690.0).abs() < 1e-3);
        assert!(matches!(p.behavior, Behavior::Boost { stall_timer: 0, .. }));
    }

    #[test]
    fn test_boost_on_player_position_stays_finite() {
        let ctx = StepContext {
            player_pos: Vec2::new(100.0, 100.0),
            ..ctx()
        };
        let mut p = Projectile::new(
            Vec2::new(100.0, 100.0),
            Vec2::ZERO,
            Behavior::Boost {
                stall_timer: BOOST_STALL_TICKS,
                boosted: false,
                accel: Vec2::ZERO,
            },
        );
        advance(&mut p, &ctx, &mut rng(), &mut Vec::new());
        assert!(p.vel.is_finite());
        assert_eq!(p.vel, Vec2::NEG_X);
    }

    #[test]
    fn test_cull_margin() {
        let field = Field::new(800.0, 600.0);
        let mut projectiles = vec![
            Projectile::new(Vec2::new(-29.0, 300.0), Vec2::NEG_X, Behavior::Normal),
            Projectile::new(Vec2::new(-31.0, 300.0), Vec2::NEG_X, Behavior::Normal),
            Projectile::new(Vec2::new(400.0, 640.0), Vec2::NEG_X, Behavior::Normal),
            Projectile::new(Vec2::new(400.0, -30.5), Vec2::NEG_X, Behavior::Small),
        ];
        cull(&mut projectiles, &field);
        assert_eq!(projectiles.len(), 1);
        assert_eq!(projectiles[0].pos.x, -29.0);
    }

    #[test]
    fn test_step_all_appends_secondaries_after_pass() {
        let mut projectiles = vec![Projectile::new(
            Vec2::new(700.0, 300.0),
            Vec2::new(-0.1, 0.0),
            Behavior::Fan {
                fan_timer: FAN_DELAY,
                fired: false,
                base_angle: 0.0,
            },
        )];
        let mut events = Vec::new();
        step_all(&mut projectiles, &ctx(), &mut rng(), &mut events);
        assert_eq!(projectiles.len(), 6);
        // Secondaries have not moved yet
        assert_eq!(projectiles[1].pos, projectiles[0].pos);
        assert_eq!(
            events,
            vec![GameEvent::SecondaryFired {
                from: ProjectileKind::Fan,
                count: 5
            }]
        );
    }

    proptest! {
        #[test]
        fn prop_invariants_hold(seed in any::<u64>(), difficulty in 1u32..=5, steps in 1usize..600) {
            let field = Field::new(800.0, 600.0);
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut projectiles: Vec<Projectile> =
                (0..8).map(|_| spawn_main(&mut rng, &field, difficulty)).collect();
            let ctx = StepContext { field, player_pos: field.player_start(), difficulty };
            let mut events = Vec::new();
            for _ in 0..steps {
                step_all(&mut projectiles, &ctx, &mut rng, &mut events);
                for p in &projectiles {
                    prop_assert!(p.vel.x <= 0.0);
                    prop_assert!(p.reflections <= MAX_REFLECTIONS);
                    prop_assert!(within_bounds(p.pos, field.width, field.height, CULL_MARGIN));
                }
            }
        }

        #[test]
        fn prop_reflect_never_exceeds_cap(vy in -10.0f32..10.0, count in 0u8..=MAX_REFLECTIONS) {
            let (vel, next) = reflect(Vec2::new(-1.0, vy), count);
            prop_assert!(next <= MAX_REFLECTIONS);
            prop_assert!(vel.x == -1.0);
        }
    }
}
