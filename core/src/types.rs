use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::geom::{Circle, Vector2};

// -- Input -------------------------------------------------------------------

/// Button bitmask constants for `InGameInput::buttons`.
pub mod button {
    pub const BUILD_KICK_POWER: u8 = 1;
    pub const SLIDE_TACKLE: u8 = 2;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InGameInput {
    pub horizontal_axis: i8,
    pub vertical_axis: i8,
    pub buttons: u8,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectTeamInput {
    pub preferred_team_to_join: u8,
}

/// One participant's input for one tick. `Forced` and
/// `WaitingForReconnect` carry no payload; the host uses them to signal
/// input-stream conditions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerInput {
    #[default]
    None,
    Forced,
    WaitingForReconnect,
    InGame(InGameInput),
    SelectTeam(SelectTeamInput),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputWithParticipant {
    pub participant_id: u8,
    pub input: PlayerInput,
}

// -- Directory records -------------------------------------------------------

/// One slot in the directly indexed participant table (index == id).
/// `seen_this_tick` is only meaningful inside input reconciliation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub participant_id: u8,
    pub player_index: u8,
    pub is_used: bool,
    pub seen_this_tick: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerPhase {
    #[default]
    SelectTeam,
    CommittedToTeam,
    Playing,
}

/// The logical game entity owned by exactly one participant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_index: u8,
    pub preferred_team: u8,
    pub controlling_avatar: u8,
    pub participant_id: u8,
    pub last_input: PlayerInput,
    pub phase: PlayerPhase,
    pub waiting_for_reconnect: bool,
}

impl Default for Player {
    fn default() -> Self {
        Player {
            player_index: UNDEFINED_INDEX,
            preferred_team: UNDEFINED_INDEX,
            controlling_avatar: UNDEFINED_INDEX,
            participant_id: UNDEFINED_INDEX,
            last_input: PlayerInput::None,
            phase: PlayerPhase::SelectTeam,
            waiting_for_reconnect: false,
        }
    }
}

// -- On-pitch entities -------------------------------------------------------

/// The player-controlled disc.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub circle: Circle,
    pub requested_velocity: Vector2,
    pub velocity: Vector2,
    pub visual_rotation: f32,
    pub controlled_by_player: u8,
    pub team: u8,
    pub dribble_cooldown: u8,
    pub kick_cooldown: u8,
    pub kicked_counter: u8,
    pub slide_tackle_cooldown: u8,
    pub slide_tackle_remaining: u8,
    pub slide_tackle_rotation: f32,
    pub request_build_kick_power: bool,
    pub request_slide_tackle: bool,
    pub kick_power: u8,
}

impl Default for Avatar {
    fn default() -> Self {
        Avatar {
            circle: Circle {
                center: Vector2::default(),
                radius: AVATAR_RADIUS,
            },
            requested_velocity: Vector2::default(),
            velocity: Vector2::default(),
            visual_rotation: 0.0,
            controlled_by_player: UNDEFINED_INDEX,
            team: UNDEFINED_INDEX,
            dribble_cooldown: 0,
            kick_cooldown: 0,
            kicked_counter: 0,
            slide_tackle_cooldown: 0,
            slide_tackle_remaining: 0,
            slide_tackle_rotation: 0.0,
            request_build_kick_power: false,
            request_slide_tackle: false,
            kick_power: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub circle: Circle,
    pub velocity: Vector2,
    pub collide_counter: u8,
}

impl Default for Ball {
    fn default() -> Self {
        Ball {
            circle: Circle {
                center: Vector2::default(),
                radius: BALL_RADIUS,
            },
            velocity: Vector2::default(),
            collide_counter: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub score: u8,
}

// -- Game --------------------------------------------------------------------

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    WaitingForPlayers,
    CountDown,
    Playing,
    AfterAGoal,
    PostGame,
}

/// The whole simulation state. Flat by construction: fixed-capacity
/// arrays and scalars only, so a rollback host can copy it bitwise at
/// any tick boundary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub participants: [Participant; MAX_PARTICIPANTS],
    pub last_participant_count: u8,
    pub players: [Player; MAX_PLAYERS],
    pub player_count: u8,
    pub avatars: [Avatar; MAX_PLAYERS],
    pub avatar_count: u8,
    pub teams: [Team; TEAM_COUNT],
    pub ball: Ball,
    pub phase: GamePhase,
    pub phase_count_down: u16,
    pub tick_count: u16,
    pub match_clock_left_in_ticks: u16,
    pub latest_scored_team: u8,
}

impl Game {
    pub fn players(&self) -> &[Player] {
        &self.players[..self.player_count as usize]
    }

    pub fn avatars(&self) -> &[Avatar] {
        &self.avatars[..self.avatar_count as usize]
    }
}
