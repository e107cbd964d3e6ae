//! Everything that moves the ball: dribbling, kicking, free motion
//! against the rails, and goal detection.

use log::debug;

use crate::arena::{Goal, GOALS};
use crate::constants::*;
use crate::geom::{self, Circle, Vector2};
use crate::physics;
use crate::types::{Ball, Game};

/// Carry the ball along with whoever reaches it first. Avatars are
/// scanned in array order; the first one whose body (shrunk a little so
/// a grazing touch does not count) overlaps the ball wins the tick.
/// Dribble cooldowns keep ticking for everyone either way.
pub fn tick_dribble(game: &mut Game) {
    let avatar_count = game.avatar_count as usize;
    let avatars = &mut game.avatars;
    let ball = &mut game.ball;

    let mut ball_taken = false;
    for avatar in avatars[..avatar_count].iter_mut() {
        if avatar.dribble_cooldown > 0 {
            avatar.dribble_cooldown -= 1;
            continue;
        }
        if ball_taken {
            continue;
        }
        let body = Circle {
            center: avatar.circle.center,
            radius: avatar.circle.radius - DRIBBLE_REACH_SHRINK,
        };
        if geom::circles_overlap(&body, &ball.circle) {
            let heading = Vector2::from_angle(avatar.visual_rotation);
            let target = avatar.circle.center.add_scale(heading, DRIBBLE_AHEAD_DISTANCE);
            ball.circle.center = ball
                .circle
                .center
                .add_scale(target - ball.circle.center, DRIBBLE_PULL_FACTOR);
            ball.velocity = avatar.velocity.add_scale(heading, DRIBBLE_VELOCITY_BOOST);
            ball_taken = true;
        }
    }
}

/// Charge and release kicks. Holding the button grows the power; the
/// release either connects (impulse plus cooldowns) or whiffs (power is
/// simply lost, no cooldown).
pub fn tick_kicks(game: &mut Game) {
    let avatar_count = game.avatar_count as usize;
    let avatars = &mut game.avatars;
    let ball = &mut game.ball;

    for avatar in avatars[..avatar_count].iter_mut() {
        if avatar.kick_cooldown > 0 {
            avatar.kick_cooldown -= 1;
            continue;
        }
        if avatar.request_build_kick_power {
            if avatar.kick_power < KICK_MAX_POWER {
                avatar.kick_power += 1;
            }
        } else if avatar.kick_power > 0 {
            let reach = Circle {
                center: avatar.circle.center,
                radius: avatar.circle.radius * KICK_REACH_FACTOR,
            };
            if geom::circles_overlap(&reach, &ball.circle) {
                let heading = Vector2::from_angle(avatar.visual_rotation);
                let impulse =
                    f32::from(avatar.kick_power) / f32::from(KICK_MAX_POWER) * KICK_POWER_IMPULSE
                        + KICK_BASE_IMPULSE;
                ball.velocity = avatar.velocity.add_scale(heading, impulse);
                physics::depenetrate_from_borders(&mut ball.circle);
                avatar.kick_cooldown = KICK_COOLDOWN_TICKS;
                avatar.dribble_cooldown = KICK_DRIBBLE_COOLDOWN_TICKS;
                avatar.kicked_counter = avatar.kicked_counter.wrapping_add(1);
            }
            avatar.kick_power = 0;
        }
    }
}

/// Free ball motion: damp, integrate, bounce off the rails, count the
/// hard impacts, and settle to rest below the crawl threshold.
pub fn tick_ball(ball: &mut Ball) {
    ball.velocity *= BALL_DAMPING;
    ball.circle.center += ball.velocity;

    let contact = physics::collide_with_borders(
        &mut ball.circle,
        &mut ball.velocity,
        0.0,
        BALL_BORDER_DAMPENING,
    );
    if contact.max_impact > BALL_COLLIDE_MIN_IMPACT
        && ball.velocity.length() > BALL_COLLIDE_MIN_SPEED
    {
        ball.collide_counter = ball.collide_counter.wrapping_add(1);
    }

    if ball.velocity.length_sq() < BALL_REST_SPEED_SQ {
        ball.velocity = geom::ZERO;
    }
}

/// A goal counts once the ball is fully across the goal face. Returns
/// the scoring team (the one the goal's owner concedes to).
pub fn detect_goal(ball: &Ball) -> Option<u8> {
    for goal in &GOALS {
        if goal_swallowed_ball(goal, &ball.circle) {
            let scoring_team = 1 - goal.owned_by_team;
            debug!(
                "ball fully inside goal of team {}, team {} scores",
                goal.owned_by_team, scoring_team
            );
            return Some(scoring_team);
        }
    }
    None
}

fn goal_swallowed_ball(goal: &Goal, ball: &Circle) -> bool {
    let contact = geom::rect_circle_contact(&goal.rect, ball);
    if contact.depth <= GOAL_DEPTH_EPSILON {
        return false;
    }
    if goal.facing_left {
        ball.center.x - ball.radius > goal.rect.x
    } else {
        ball.center.x + ball.radius < goal.rect.x + goal.rect.w
    }
}
