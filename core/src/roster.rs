//! Who is connected and what they control: the participant table, the
//! dense player array, and avatar spawn/despawn. The three directories
//! point at each other by index; every mutation here repairs the
//! back-pointers in the same call.

use log::{debug, trace};

use crate::arena;
use crate::constants::*;
use crate::types::{
    button, Avatar, Game, GamePhase, InputWithParticipant, PlayerInput, PlayerPhase,
};

/// Bring the participant table in line with one tick's input batch.
/// New ids join (and get a player), ids missing from the batch leave
/// (and lose their player and avatar). Every present player's
/// `last_input` is refreshed.
pub fn reconcile_inputs(game: &mut Game, inputs: &[InputWithParticipant]) {
    if inputs.len() != game.last_participant_count as usize {
        trace!(
            "participant count changed: {} -> {}",
            game.last_participant_count,
            inputs.len()
        );
    }

    for slot in &mut game.participants {
        slot.seen_this_tick = false;
    }

    for entry in inputs {
        let id = entry.participant_id as usize;
        assert!(
            id < MAX_PARTICIPANTS,
            "participant id {} outside the table",
            entry.participant_id
        );
        if !game.participants[id].is_used {
            game.participants[id].is_used = true;
            game.participants[id].participant_id = entry.participant_id;
            spawn_player(game, entry.participant_id);
        }
        let player_index = game.participants[id].player_index as usize;
        game.players[player_index].last_input = entry.input;
        game.participants[id].seen_this_tick = true;
    }

    for id in 0..MAX_PARTICIPANTS {
        if game.participants[id].is_used && !game.participants[id].seen_this_tick {
            participant_left(game, id);
        }
    }

    game.last_participant_count = inputs.len() as u8;
}

/// Translate every player's `last_input` into game effects: avatar
/// request fields, team commitment, or reconnect bookkeeping.
pub fn project_inputs(game: &mut Game) {
    for player_index in 0..game.player_count as usize {
        match game.players[player_index].last_input {
            PlayerInput::InGame(input) => {
                let player = &mut game.players[player_index];
                player.waiting_for_reconnect = false;
                let avatar_index = player.controlling_avatar;
                if avatar_index == UNDEFINED_INDEX {
                    // Input for a not-yet-spawned avatar; nothing to steer.
                    continue;
                }
                let avatar = &mut game.avatars[avatar_index as usize];
                avatar.requested_velocity = crate::geom::Vector2::new(
                    f32::from(input.horizontal_axis),
                    f32::from(input.vertical_axis),
                ) * REQUEST_VELOCITY_SCALE;
                avatar.request_build_kick_power = input.buttons & button::BUILD_KICK_POWER != 0;
                avatar.request_slide_tackle = input.buttons & button::SLIDE_TACKLE != 0;
            }
            PlayerInput::SelectTeam(select) => {
                if game.players[player_index].phase != PlayerPhase::SelectTeam {
                    continue;
                }
                game.players[player_index].preferred_team = select.preferred_team_to_join;
                game.players[player_index].phase = PlayerPhase::CommittedToTeam;
                let can_join_now = matches!(
                    game.phase,
                    GamePhase::CountDown | GamePhase::AfterAGoal
                );
                if can_join_now && (select.preferred_team_to_join as usize) < TEAM_COUNT {
                    spawn_avatar(game, player_index);
                }
            }
            PlayerInput::WaitingForReconnect => {
                game.players[player_index].waiting_for_reconnect = true;
            }
            PlayerInput::Forced | PlayerInput::None => {}
        }
    }
}

fn spawn_player(game: &mut Game, participant_id: u8) {
    assert!(
        (game.player_count as usize) < MAX_PLAYERS,
        "player table full; the host must admission-control joins"
    );
    let player_index = game.player_count;
    game.player_count += 1;

    let player = &mut game.players[player_index as usize];
    *player = Default::default();
    player.player_index = player_index;
    player.participant_id = participant_id;

    game.participants[participant_id as usize].player_index = player_index;

    debug!(
        "participant {} joined, created player {}",
        participant_id, player_index
    );
}

fn participant_left(game: &mut Game, participant_table_index: usize) {
    let player_index = game.participants[participant_table_index].player_index;
    let avatar_index = game.players[player_index as usize].controlling_avatar;
    if avatar_index != UNDEFINED_INDEX {
        despawn_avatar(game, avatar_index as usize);
    }
    remove_player(game, player_index as usize);
    game.participants[participant_table_index].is_used = false;

    debug!(
        "participant {} left, released player {}",
        participant_table_index, player_index
    );
}

/// Swap-with-last removal; the moved player's participant slot and
/// avatar back-pointer are repaired in place.
fn remove_player(game: &mut Game, index: usize) {
    let last = game.player_count as usize - 1;
    game.players[index] = game.players[last];
    game.player_count = last as u8;

    if index < last {
        let moved = &mut game.players[index];
        moved.player_index = index as u8;
        let moved_participant = moved.participant_id as usize;
        let moved_avatar = moved.controlling_avatar;
        game.participants[moved_participant].player_index = index as u8;
        if moved_avatar != UNDEFINED_INDEX {
            game.avatars[moved_avatar as usize].controlled_by_player = index as u8;
        }
    }
}

/// Swap-with-last removal of an avatar, detaching its player first.
pub fn despawn_avatar(game: &mut Game, index: usize) {
    let owner = game.avatars[index].controlled_by_player;
    if owner != UNDEFINED_INDEX {
        game.players[owner as usize].controlling_avatar = UNDEFINED_INDEX;
    }

    let last = game.avatar_count as usize - 1;
    game.avatars[index] = game.avatars[last];
    game.avatar_count = last as u8;

    if index < last {
        let moved_owner = game.avatars[index].controlled_by_player;
        if moved_owner != UNDEFINED_INDEX {
            game.players[moved_owner as usize].controlling_avatar = index as u8;
        }
    }
}

/// Put a committed player's avatar on the pitch at its team's next free
/// formation slot and hand the player control of it.
pub fn spawn_avatar(game: &mut Game, player_index: usize) {
    let team = game.players[player_index].preferred_team;
    assert!(
        (team as usize) < TEAM_COUNT,
        "avatar spawn for an uncommitted team"
    );
    assert!(
        (game.avatar_count as usize) < MAX_PLAYERS,
        "avatar table full"
    );

    let mut team_slot = 0usize;
    for i in 0..game.avatar_count as usize {
        if game.avatars[i].team == team {
            team_slot += 1;
        }
    }

    let avatar_index = game.avatar_count;
    game.avatar_count += 1;

    let avatar = &mut game.avatars[avatar_index as usize];
    *avatar = Avatar::default();
    avatar.circle.center = arena::formation_position(team, team_slot);
    avatar.visual_rotation = arena::formation_rotation(team);
    avatar.controlled_by_player = player_index as u8;
    avatar.team = team;

    game.players[player_index].controlling_avatar = avatar_index;
    game.players[player_index].phase = PlayerPhase::Playing;

    debug!(
        "spawned avatar {} for player {} on team {}",
        avatar_index, player_index, team
    );
}
