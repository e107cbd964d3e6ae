use crate::arena;
use crate::types::{Ball, Game, GamePhase};

/// Fresh pre-match state: empty directories, ball resting at the center
/// spot, full match clock, waiting for the first player to commit.
pub fn create_initial_game() -> Game {
    Game {
        ball: Ball {
            circle: crate::geom::Circle {
                center: arena::BALL_KICKOFF_POSITION,
                radius: crate::constants::BALL_RADIUS,
            },
            ..Ball::default()
        },
        phase: GamePhase::WaitingForPlayers,
        match_clock_left_in_ticks: arena::MATCH_DURATION_TICKS,
        ..Game::default()
    }
}
