//! The fixed pitch: goal rectangles, the six border rails, and the
//! kickoff formation. Everything here is a compile-time constant; the
//! rails are tested in declaration order and that order is part of the
//! simulation contract.

use serde::{Deserialize, Serialize};

use crate::geom::{LineSegment, Rect, Vector2};

pub const SCREEN_WIDTH: f32 = 640.0;
pub const SPACING: f32 = 6.0;
pub const GOAL_DETECT_WIDTH: f32 = 40.0;
pub const GOAL_SIZE: f32 = 90.0;
pub const ARENA_LINE_BOTTOM: f32 = 20.0;
pub const ARENA_HEIGHT: f32 = 280.0;
pub const ARENA_LINE_TOP: f32 = ARENA_LINE_BOTTOM + ARENA_HEIGHT;
pub const ARENA_MIDDLE_Y: f32 = 160.0;

pub const ARENA_LEFT: f32 = SPACING;
pub const ARENA_RIGHT: f32 = SCREEN_WIDTH - SPACING;
pub const ARENA_CENTER_X: f32 = SCREEN_WIDTH / 2.0;

const GOAL_MOUTH_BOTTOM: f32 = ARENA_MIDDLE_Y - GOAL_SIZE / 2.0;
const GOAL_MOUTH_TOP: f32 = ARENA_MIDDLE_Y + GOAL_SIZE / 2.0;

/// Ticks in a full match: floor(62.5 Hz * 60 s).
pub const MATCH_DURATION_TICKS: u16 = 3750;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub owned_by_team: u8,
    pub rect: Rect,
    pub facing_left: bool,
}

/// The two goal pockets just outside the side lines. The left goal
/// belongs to team 0 and faces right into the pitch.
pub const GOALS: [Goal; 2] = [
    Goal {
        owned_by_team: 0,
        rect: Rect {
            x: ARENA_LEFT - GOAL_DETECT_WIDTH,
            y: GOAL_MOUTH_BOTTOM,
            w: GOAL_DETECT_WIDTH,
            h: GOAL_SIZE,
        },
        facing_left: false,
    },
    Goal {
        owned_by_team: 1,
        rect: Rect {
            x: ARENA_RIGHT,
            y: GOAL_MOUTH_BOTTOM,
            w: GOAL_DETECT_WIDTH,
            h: GOAL_SIZE,
        },
        facing_left: true,
    },
];

/// A rail plus the side play happens on. The inward normal lets the
/// collision pass push a fast mover back onto the pitch even when its
/// center ended the integration step past the rail.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Border {
    pub segment: LineSegment,
    pub inward: Vector2,
}

/// The six rails bounding play: top, bottom, then the partials flanking
/// each goal mouth.
pub const BORDERS: [Border; 6] = [
    // Upper rail
    Border {
        segment: LineSegment {
            a: Vector2::new(ARENA_LEFT, ARENA_LINE_TOP),
            b: Vector2::new(ARENA_RIGHT, ARENA_LINE_TOP),
        },
        inward: Vector2::new(0.0, -1.0),
    },
    // Lower rail
    Border {
        segment: LineSegment {
            a: Vector2::new(ARENA_LEFT, ARENA_LINE_BOTTOM),
            b: Vector2::new(ARENA_RIGHT, ARENA_LINE_BOTTOM),
        },
        inward: Vector2::new(0.0, 1.0),
    },
    // Left side, below and above the goal mouth
    Border {
        segment: LineSegment {
            a: Vector2::new(ARENA_LEFT, ARENA_LINE_BOTTOM),
            b: Vector2::new(ARENA_LEFT, GOAL_MOUTH_BOTTOM),
        },
        inward: Vector2::new(1.0, 0.0),
    },
    Border {
        segment: LineSegment {
            a: Vector2::new(ARENA_LEFT, GOAL_MOUTH_TOP),
            b: Vector2::new(ARENA_LEFT, ARENA_LINE_TOP),
        },
        inward: Vector2::new(1.0, 0.0),
    },
    // Right side, below and above the goal mouth
    Border {
        segment: LineSegment {
            a: Vector2::new(ARENA_RIGHT, ARENA_LINE_BOTTOM),
            b: Vector2::new(ARENA_RIGHT, GOAL_MOUTH_BOTTOM),
        },
        inward: Vector2::new(-1.0, 0.0),
    },
    Border {
        segment: LineSegment {
            a: Vector2::new(ARENA_RIGHT, GOAL_MOUTH_TOP),
            b: Vector2::new(ARENA_RIGHT, ARENA_LINE_TOP),
        },
        inward: Vector2::new(-1.0, 0.0),
    },
];

pub const BALL_KICKOFF_POSITION: Vector2 = Vector2::new(ARENA_CENTER_X, ARENA_MIDDLE_Y);

// Kickoff formation: four columns per row, mirrored across the center
// line, rows stacked toward the upper rail.
const FORMATION_PER_ROW: usize = 4;
const FORMATION_FIRST_COLUMN_OFFSET: f32 = 20.0;
const FORMATION_COLUMN_SPACING: f32 = 40.0;
const FORMATION_ROW_SPACING: f32 = 50.0;

/// Where the `slot`-th avatar of a team lines up for kickoff.
pub fn formation_position(team: u8, slot: usize) -> Vector2 {
    let column = (slot % FORMATION_PER_ROW) as f32;
    let row = (slot / FORMATION_PER_ROW) as f32;
    let from_center = FORMATION_FIRST_COLUMN_OFFSET + column * FORMATION_COLUMN_SPACING;
    let x = if team == 0 {
        ARENA_CENTER_X - from_center
    } else {
        ARENA_CENTER_X + from_center
    };
    Vector2::new(x, ARENA_MIDDLE_Y + row * FORMATION_ROW_SPACING)
}

/// Kickoff facing: team 0 looks toward +x, team 1 toward -x.
pub fn formation_rotation(team: u8) -> f32 {
    if team == 0 {
        0.0
    } else {
        -std::f32::consts::PI
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rails_enclose_the_pitch() {
        assert_eq!(BORDERS.len(), 6);
        // Goal mouths are the only openings in the side lines.
        assert_eq!(BORDERS[2].segment.b.y, GOALS[0].rect.y);
        assert_eq!(BORDERS[3].segment.a.y, GOALS[0].rect.y + GOALS[0].rect.h);
        assert_eq!(BORDERS[4].segment.b.y, GOALS[1].rect.y);
        assert_eq!(BORDERS[5].segment.a.y, GOALS[1].rect.y + GOALS[1].rect.h);
    }

    #[test]
    fn inward_normals_point_at_the_pitch_center() {
        let center = Vector2::new(ARENA_CENTER_X, ARENA_MIDDLE_Y);
        for border in &BORDERS {
            let midpoint = (border.segment.a + border.segment.b) * 0.5;
            assert!((center - midpoint).dot(border.inward) > 0.0);
        }
    }

    #[test]
    fn goals_sit_just_outside_the_side_lines() {
        assert_eq!(GOALS[0].rect.x + GOALS[0].rect.w, ARENA_LEFT);
        assert_eq!(GOALS[1].rect.x, ARENA_RIGHT);
        assert!(!GOALS[0].facing_left);
        assert!(GOALS[1].facing_left);
        assert_eq!(GOALS[0].owned_by_team, 0);
        assert_eq!(GOALS[1].owned_by_team, 1);
    }

    #[test]
    fn formation_mirrors_and_stays_on_the_pitch() {
        for slot in 0..8 {
            let left = formation_position(0, slot);
            let right = formation_position(1, slot);
            assert_eq!(ARENA_CENTER_X - left.x, right.x - ARENA_CENTER_X);
            for p in [left, right] {
                assert!(p.x > ARENA_LEFT && p.x < ARENA_RIGHT);
                assert!(p.y > ARENA_LINE_BOTTOM && p.y < ARENA_LINE_TOP);
            }
        }
    }

    #[test]
    fn formation_rows_advance_every_four() {
        assert_eq!(formation_position(0, 0).y, formation_position(0, 3).y);
        assert_eq!(
            formation_position(0, 4).y,
            formation_position(0, 0).y + FORMATION_ROW_SPACING
        );
    }

    #[test]
    fn match_duration_matches_tick_rate() {
        assert_eq!(MATCH_DURATION_TICKS, (62.5f64 * 60.0) as u16);
    }
}
