//! Host adapter for the simulation core.
//!
//! A lockstep/rollback host talks to the match through this thin layer:
//! opaque byte-image snapshots of known size, one input batch per tick
//! (with per-participant stream statuses mapped onto the input union),
//! and formatters for debug traces.

use log::trace;

use pitchball_core::{
    create_initial_game, decode_game, encode_game, game_tick, Game, InputWithParticipant,
    PlayerInput, STATE_OCTET_SIZE,
};

/// Fixed step duration advertised to the host (about 62.5 Hz).
pub const TICK_DURATION_MS: u32 = 16;

/// Stream condition the host reports alongside each participant input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostInputStatus {
    /// The payload arrived in time; pass it through.
    Normal,
    /// Nothing arrived before the deadline; the simulation sees `Forced`.
    NoInputInTime,
    /// The connection is paused for a reconnect attempt.
    WaitingForReconnect,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HostParticipantInput {
    pub participant_id: u8,
    pub status: HostInputStatus,
    pub input: PlayerInput,
}

/// The simulation behind the host's uniform VM interface.
#[derive(Clone, Debug)]
pub struct SimulationVm {
    game: Game,
}

impl Default for SimulationVm {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationVm {
    pub fn new() -> Self {
        SimulationVm {
            game: create_initial_game(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Opaque byte image of the current state, always
    /// [`STATE_OCTET_SIZE`] octets.
    pub fn get_state(&self) -> Vec<u8> {
        encode_game(&self.game)
    }

    /// Replace the current state with a previously captured image. The
    /// size is part of the host contract; a mismatch is fatal.
    pub fn set_state(&mut self, image: &[u8]) {
        assert_eq!(
            image.len(),
            STATE_OCTET_SIZE,
            "state image size is wrong: {}",
            image.len()
        );
        self.game = decode_game(image);
    }

    /// Forward one batch to the simulation, folding each participant's
    /// stream status into the input union first.
    pub fn tick(&mut self, batch: &[HostParticipantInput]) {
        let mut inputs = [InputWithParticipant::default(); pitchball_core::MAX_PARTICIPANTS];
        assert!(
            batch.len() <= inputs.len(),
            "host batch larger than the participant table"
        );
        for (slot, host_input) in inputs.iter_mut().zip(batch) {
            slot.participant_id = host_input.participant_id;
            slot.input = match host_input.status {
                HostInputStatus::Normal => host_input.input,
                HostInputStatus::NoInputInTime => PlayerInput::Forced,
                HostInputStatus::WaitingForReconnect => PlayerInput::WaitingForReconnect,
            };
        }
        game_tick(&mut self.game, &inputs[..batch.len()]);
        trace!("advanced to tick {}", self.game.tick_count);
    }

    /// One-line state description for debug traces.
    pub fn state_to_string(&self) -> String {
        format!(
            "state: tick: {} ball-pos: {:.1}, {:.1}",
            self.game.tick_count, self.game.ball.circle.center.x, self.game.ball.circle.center.y
        )
    }

    /// One-line input description for debug traces.
    pub fn input_to_string(input: &PlayerInput) -> String {
        match input {
            PlayerInput::None => "input: none".to_string(),
            PlayerInput::Forced => "input: forced".to_string(),
            PlayerInput::WaitingForReconnect => "input: waiting for reconnect".to_string(),
            PlayerInput::InGame(in_game) => format!(
                "input: inGame: horizontalAxis: {}",
                in_game.horizontal_axis
            ),
            PlayerInput::SelectTeam(select) => format!(
                "input: select team: {}",
                select.preferred_team_to_join
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitchball_core::{GamePhase, InGameInput, SelectTeamInput};

    fn normal(participant_id: u8, input: PlayerInput) -> HostParticipantInput {
        HostParticipantInput {
            participant_id,
            status: HostInputStatus::Normal,
            input,
        }
    }

    #[test]
    fn snapshot_round_trip_restores_the_game() {
        let mut vm = SimulationVm::new();
        vm.tick(&[
            normal(
                13,
                PlayerInput::InGame(InGameInput {
                    horizontal_axis: 33,
                    vertical_axis: 0,
                    buttons: 0,
                }),
            ),
            normal(
                2,
                PlayerInput::SelectTeam(SelectTeamInput {
                    preferred_team_to_join: 1,
                }),
            ),
        ]);
        assert_eq!(vm.game().tick_count, 1);

        let image = vm.get_state();
        assert_eq!(image.len(), STATE_OCTET_SIZE);

        let mut other = SimulationVm::new();
        other.set_state(&image);
        assert_eq!(other.game(), vm.game());
        assert_eq!(other.get_state(), image);
    }

    #[test]
    fn rollback_replay_reaches_the_same_state() {
        let mut vm = SimulationVm::new();
        let scripted: Vec<Vec<HostParticipantInput>> = (0..120u16)
            .map(|tick| {
                vec![normal(
                    0,
                    if tick == 0 {
                        PlayerInput::SelectTeam(SelectTeamInput {
                            preferred_team_to_join: 0,
                        })
                    } else {
                        PlayerInput::InGame(InGameInput {
                            horizontal_axis: if tick % 20 < 10 { 70 } else { -70 },
                            vertical_axis: 15,
                            buttons: (tick % 3 == 0) as u8,
                        })
                    },
                )]
            })
            .collect();

        for batch in &scripted[..40] {
            vm.tick(batch);
        }
        let checkpoint = vm.get_state();
        for batch in &scripted[40..] {
            vm.tick(batch);
        }
        let final_image = vm.get_state();

        // Roll back to the checkpoint and replay the same inputs.
        vm.set_state(&checkpoint);
        for batch in &scripted[40..] {
            vm.tick(batch);
        }
        assert_eq!(vm.get_state(), final_image);
    }

    #[test]
    fn missing_input_becomes_forced() {
        let mut vm = SimulationVm::new();
        vm.tick(&[normal(
            0,
            PlayerInput::SelectTeam(SelectTeamInput {
                preferred_team_to_join: 0,
            }),
        )]);
        assert_eq!(vm.game().phase, GamePhase::CountDown);

        // The host times the participant out; membership must survive.
        vm.tick(&[HostParticipantInput {
            participant_id: 0,
            status: HostInputStatus::NoInputInTime,
            input: PlayerInput::InGame(InGameInput {
                horizontal_axis: 99,
                vertical_axis: 99,
                buttons: 3,
            }),
        }]);
        assert_eq!(vm.game().player_count, 1);
        assert_eq!(vm.game().players[0].last_input, PlayerInput::Forced);
    }

    #[test]
    fn reconnect_status_flags_the_player() {
        let mut vm = SimulationVm::new();
        vm.tick(&[normal(5, PlayerInput::None)]);
        vm.tick(&[HostParticipantInput {
            participant_id: 5,
            status: HostInputStatus::WaitingForReconnect,
            input: PlayerInput::None,
        }]);
        assert!(vm.game().players[0].waiting_for_reconnect);
    }

    #[test]
    fn state_string_has_one_decimal_ball_position() {
        let vm = SimulationVm::new();
        assert_eq!(
            vm.state_to_string(),
            "state: tick: 0 ball-pos: 320.0, 160.0"
        );
    }

    #[test]
    fn input_strings_cover_every_kind() {
        assert_eq!(
            SimulationVm::input_to_string(&PlayerInput::None),
            "input: none"
        );
        assert_eq!(
            SimulationVm::input_to_string(&PlayerInput::Forced),
            "input: forced"
        );
        assert_eq!(
            SimulationVm::input_to_string(&PlayerInput::WaitingForReconnect),
            "input: waiting for reconnect"
        );
        assert_eq!(
            SimulationVm::input_to_string(&PlayerInput::InGame(InGameInput {
                horizontal_axis: -7,
                vertical_axis: 2,
                buttons: 1,
            })),
            "input: inGame: horizontalAxis: -7"
        );
        assert_eq!(
            SimulationVm::input_to_string(&PlayerInput::SelectTeam(SelectTeamInput {
                preferred_team_to_join: 1,
            })),
            "input: select team: 1"
        );
    }

    #[test]
    #[should_panic(expected = "state image size is wrong")]
    fn wrong_image_size_is_fatal() {
        let mut vm = SimulationVm::new();
        vm.set_state(&[0u8; 16]);
    }
}
