//! The tick entry point and the five-phase match state machine.
//!
//! One tick, in this exact order:
//!  1. Reconcile the input batch against the participant table
//!     (joins and departures).
//!  2. Project every player's last input onto its avatar / team choice.
//!  3. Advance the tick counter (wraps).
//!  4. Dispatch on the game phase.
//!
//! Inside `Playing` the sub-steps run in a fixed order that is part of
//! the contract: match clock, avatars, dribble, kick, slide-tackle
//! timers, ball, goal check. Reordering any of them changes float
//! results and breaks rollback.

use log::debug;

use crate::arena;
use crate::ball;
use crate::constants::*;
use crate::geom;
use crate::physics;
use crate::roster;
use crate::types::{Game, GamePhase, InputWithParticipant, PlayerPhase};

/// Advance the simulation by exactly one fixed step.
pub fn game_tick(game: &mut Game, inputs: &[InputWithParticipant]) {
    roster::reconcile_inputs(game, inputs);
    roster::project_inputs(game);

    game.tick_count = game.tick_count.wrapping_add(1);

    match game.phase {
        GamePhase::WaitingForPlayers => tick_waiting_for_players(game),
        GamePhase::CountDown => tick_count_down(game),
        GamePhase::Playing => tick_playing(game),
        GamePhase::AfterAGoal => tick_after_a_goal(game),
        GamePhase::PostGame => tick_post_game(game),
    }
}

fn tick_waiting_for_players(game: &mut Game) {
    let someone_committed = game
        .players()
        .iter()
        .any(|p| p.phase == PlayerPhase::CommittedToTeam);
    if !someone_committed {
        return;
    }

    debug!("first commitment arrived, starting countdown");
    game.phase = GamePhase::CountDown;
    game.phase_count_down = COUNT_DOWN_TICKS;
    spawn_committed_avatars(game);
}

fn tick_count_down(game: &mut Game) {
    if game.phase_count_down == 0 {
        game.phase = GamePhase::Playing;
        return;
    }
    game.phase_count_down -= 1;
}

fn tick_playing(game: &mut Game) {
    if game.match_clock_left_in_ticks > 0 {
        game.match_clock_left_in_ticks -= 1;
    } else {
        debug!("match clock expired");
        game.phase = GamePhase::PostGame;
        game.phase_count_down = POST_GAME_TICKS;
        return;
    }

    physics::tick_avatars(game);
    ball::tick_dribble(game);
    ball::tick_kicks(game);
    physics::tick_slide_tackle_timers(game);
    ball::tick_ball(&mut game.ball);

    if let Some(scoring_team) = ball::detect_goal(&game.ball) {
        game.teams[scoring_team as usize].score += 1;
        game.latest_scored_team = scoring_team;
        game.phase = GamePhase::AfterAGoal;
        game.phase_count_down = AFTER_GOAL_TICKS;
        debug!(
            "team {} scored, score is now {} - {}",
            scoring_team, game.teams[0].score, game.teams[1].score
        );
    }
}

fn tick_after_a_goal(game: &mut Game) {
    if game.phase_count_down > 0 {
        game.phase_count_down -= 1;
        return;
    }
    reset_pitch(game);
    game.phase = GamePhase::CountDown;
    game.phase_count_down = COUNT_DOWN_TICKS;
}

fn tick_post_game(game: &mut Game) {
    if game.phase_count_down > 0 {
        game.phase_count_down -= 1;
        return;
    }
    for team in &mut game.teams {
        team.score = 0;
    }
    game.match_clock_left_in_ticks = arena::MATCH_DURATION_TICKS;
    reset_pitch(game);
    game.phase = GamePhase::CountDown;
    game.phase_count_down = COUNT_DOWN_TICKS;
}

/// Spawn an avatar for every player that has a valid team and no avatar
/// yet; those players go straight to `Playing`.
fn spawn_committed_avatars(game: &mut Game) {
    for player_index in 0..game.player_count as usize {
        let player = &game.players[player_index];
        if (player.preferred_team as usize) < TEAM_COUNT
            && player.controlling_avatar == UNDEFINED_INDEX
        {
            roster::spawn_avatar(game, player_index);
        }
    }
}

/// Kickoff arrangement: late committers get their avatar, every avatar
/// returns to its formation slot with all transient motion state
/// cleared, and the ball goes back to the center spot.
fn reset_pitch(game: &mut Game) {
    spawn_committed_avatars(game);

    let mut team_slots = [0usize; TEAM_COUNT];
    for i in 0..game.avatar_count as usize {
        let avatar = &mut game.avatars[i];
        let slot = team_slots[avatar.team as usize];
        team_slots[avatar.team as usize] += 1;

        avatar.circle.center = arena::formation_position(avatar.team, slot);
        avatar.visual_rotation = arena::formation_rotation(avatar.team);
        avatar.velocity = geom::ZERO;
        avatar.requested_velocity = geom::ZERO;
        avatar.dribble_cooldown = 0;
        avatar.kick_cooldown = 0;
        avatar.slide_tackle_cooldown = 0;
        avatar.slide_tackle_remaining = 0;
        avatar.slide_tackle_rotation = 0.0;
        avatar.request_build_kick_power = false;
        avatar.request_slide_tackle = false;
        avatar.kick_power = 0;
    }

    game.ball.circle.center = arena::BALL_KICKOFF_POSITION;
    game.ball.velocity = geom::ZERO;
    game.ball.collide_counter = 0;
}


#[cfg(test)]
mod properties {
    use super::*;
    use crate::types::{InGameInput, PlayerInput, SelectTeamInput};
    use proptest::prelude::*;

    fn input_strategy() -> impl Strategy<Value = PlayerInput> {
        prop_oneof![
            Just(PlayerInput::None),
            Just(PlayerInput::Forced),
            Just(PlayerInput::WaitingForReconnect),
            (any::<i8>(), any::<i8>(), 0u8..4).prop_map(|(h, v, buttons)| {
                PlayerInput::InGame(InGameInput {
                    horizontal_axis: h,
                    vertical_axis: v,
                    buttons,
                })
            }),
            (0u8..4).prop_map(|team| {
                PlayerInput::SelectTeam(SelectTeamInput {
                    preferred_team_to_join: team,
                })
            }),
        ]
    }

    fn batch_strategy() -> impl Strategy<Value = Vec<InputWithParticipant>> {
        proptest::collection::vec(
            (0u8..8, input_strategy()).prop_map(|(participant_id, input)| InputWithParticipant {
                participant_id,
                input,
            }),
            0..6,
        )
    }

    fn assert_directory_links(game: &Game) {
        assert!(game.player_count as usize <= MAX_PLAYERS);
        assert!(game.avatar_count <= game.player_count);
        for (i, player) in game.players().iter().enumerate() {
            let slot = &game.participants[player.participant_id as usize];
            assert!(slot.is_used);
            assert_eq!(slot.player_index as usize, i);
            if player.controlling_avatar != UNDEFINED_INDEX {
                let avatar = &game.avatars[player.controlling_avatar as usize];
                assert_eq!(avatar.controlled_by_player as usize, i);
            }
        }
        for (i, avatar) in game.avatars().iter().enumerate() {
            let player = &game.players[avatar.controlled_by_player as usize];
            assert_eq!(player.controlling_avatar as usize, i);
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn random_sessions_keep_the_directories_sound(
            batches in proptest::collection::vec(batch_strategy(), 1..250)
        ) {
            let mut game = crate::init::create_initial_game();
            for batch in &batches {
                game_tick(&mut game, batch);
                assert_directory_links(&game);
                for avatar in game.avatars() {
                    prop_assert!(avatar.velocity.length() <= MAX_AVATAR_SPEED + 1e-3);
                }
            }
        }

        #[test]
        fn random_sessions_are_deterministic(
            batches in proptest::collection::vec(batch_strategy(), 1..150)
        ) {
            let mut first = crate::init::create_initial_game();
            let mut second = crate::init::create_initial_game();
            for batch in &batches {
                game_tick(&mut first, batch);
            }
            for batch in &batches {
                game_tick(&mut second, batch);
            }
            prop_assert_eq!(first, second);
        }

        #[test]
        fn random_sessions_snapshot_bitwise(
            batches in proptest::collection::vec(batch_strategy(), 1..100)
        ) {
            let mut game = crate::init::create_initial_game();
            for batch in &batches {
                game_tick(&mut game, batch);
            }
            let image = crate::snapshot::encode_game(&game);
            let restored = crate::snapshot::decode_game(&image);
            prop_assert_eq!(restored, game);
            prop_assert_eq!(crate::snapshot::encode_game(&restored), image);
        }
    }
}
