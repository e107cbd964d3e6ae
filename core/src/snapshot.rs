//! Fixed-size byte image of the whole `Game`.
//!
//! The host copies state in and out as an opaque octet block, so the
//! layout must have one known size no matter which input variant each
//! player last sent. serde cannot promise that for a sum type, so this
//! is a plain little-endian field-by-field codec: every record encodes
//! to the same number of octets every time, and
//! `decode_game(encode_game(g)) == g` holds bitwise.

use crate::constants::*;
use crate::geom::{Circle, Vector2};
use crate::types::{
    Avatar, Ball, Game, GamePhase, InGameInput, Participant, Player, PlayerInput, PlayerPhase,
    SelectTeamInput, Team,
};

const VECTOR2_OCTETS: usize = 8;
const CIRCLE_OCTETS: usize = VECTOR2_OCTETS + 4;
const INPUT_OCTETS: usize = 4;
const PARTICIPANT_OCTETS: usize = 4;
const PLAYER_OCTETS: usize = 6 + INPUT_OCTETS;
const AVATAR_OCTETS: usize = CIRCLE_OCTETS + 2 * VECTOR2_OCTETS + 4 + 4 + 7 + 3;
const BALL_OCTETS: usize = CIRCLE_OCTETS + VECTOR2_OCTETS + 1;
const TEAM_OCTETS: usize = 1;

/// Size of the encoded `Game`, advertised to the host.
pub const STATE_OCTET_SIZE: usize = MAX_PARTICIPANTS * PARTICIPANT_OCTETS
    + 1
    + MAX_PLAYERS * PLAYER_OCTETS
    + 1
    + MAX_PLAYERS * AVATAR_OCTETS
    + 1
    + TEAM_COUNT * TEAM_OCTETS
    + BALL_OCTETS
    + 1 // phase
    + 2 // phase_count_down
    + 2 // tick_count
    + 2 // match_clock_left_in_ticks
    + 1; // latest_scored_team

// -- Cursors -----------------------------------------------------------------

struct Writer<'a> {
    buf: &'a mut [u8],
    at: usize,
}

impl<'a> Writer<'a> {
    fn put_u8(&mut self, v: u8) {
        self.buf[self.at] = v;
        self.at += 1;
    }

    fn put_bool(&mut self, v: bool) {
        self.put_u8(u8::from(v));
    }

    fn put_i8(&mut self, v: i8) {
        self.put_u8(v as u8);
    }

    fn put_u16(&mut self, v: u16) {
        self.buf[self.at..self.at + 2].copy_from_slice(&v.to_le_bytes());
        self.at += 2;
    }

    fn put_f32(&mut self, v: f32) {
        self.buf[self.at..self.at + 4].copy_from_slice(&v.to_le_bytes());
        self.at += 4;
    }

    fn put_vector2(&mut self, v: Vector2) {
        self.put_f32(v.x);
        self.put_f32(v.y);
    }

    fn put_circle(&mut self, c: Circle) {
        self.put_vector2(c.center);
        self.put_f32(c.radius);
    }
}

struct Reader<'a> {
    buf: &'a [u8],
    at: usize,
}

impl<'a> Reader<'a> {
    fn get_u8(&mut self) -> u8 {
        let v = self.buf[self.at];
        self.at += 1;
        v
    }

    fn get_bool(&mut self) -> bool {
        self.get_u8() != 0
    }

    fn get_u16(&mut self) -> u16 {
        let v = u16::from_le_bytes([self.buf[self.at], self.buf[self.at + 1]]);
        self.at += 2;
        v
    }

    fn get_f32(&mut self) -> f32 {
        let v = f32::from_le_bytes([
            self.buf[self.at],
            self.buf[self.at + 1],
            self.buf[self.at + 2],
            self.buf[self.at + 3],
        ]);
        self.at += 4;
        v
    }

    fn get_vector2(&mut self) -> Vector2 {
        Vector2 {
            x: self.get_f32(),
            y: self.get_f32(),
        }
    }

    fn get_circle(&mut self) -> Circle {
        Circle {
            center: self.get_vector2(),
            radius: self.get_f32(),
        }
    }
}

// -- Input packing -----------------------------------------------------------

// One tag octet plus three payload octets, zero-padded so every variant
// has the same width.
fn put_input(w: &mut Writer, input: PlayerInput) {
    match input {
        PlayerInput::None => {
            w.put_u8(0);
            w.put_u8(0);
            w.put_u8(0);
            w.put_u8(0);
        }
        PlayerInput::Forced => {
            w.put_u8(1);
            w.put_u8(0);
            w.put_u8(0);
            w.put_u8(0);
        }
        PlayerInput::WaitingForReconnect => {
            w.put_u8(2);
            w.put_u8(0);
            w.put_u8(0);
            w.put_u8(0);
        }
        PlayerInput::InGame(in_game) => {
            w.put_u8(3);
            w.put_i8(in_game.horizontal_axis);
            w.put_i8(in_game.vertical_axis);
            w.put_u8(in_game.buttons);
        }
        PlayerInput::SelectTeam(select) => {
            w.put_u8(4);
            w.put_u8(select.preferred_team_to_join);
            w.put_u8(0);
            w.put_u8(0);
        }
    }
}

fn get_input(r: &mut Reader) -> PlayerInput {
    let tag = r.get_u8();
    let a = r.get_u8();
    let b = r.get_u8();
    let c = r.get_u8();
    match tag {
        0 => PlayerInput::None,
        1 => PlayerInput::Forced,
        2 => PlayerInput::WaitingForReconnect,
        3 => PlayerInput::InGame(InGameInput {
            horizontal_axis: a as i8,
            vertical_axis: b as i8,
            buttons: c,
        }),
        4 => PlayerInput::SelectTeam(SelectTeamInput {
            preferred_team_to_join: a,
        }),
        _ => panic!("corrupt state image: unknown input tag {}", tag),
    }
}

// -- Records -----------------------------------------------------------------

fn put_participant(w: &mut Writer, p: &Participant) {
    w.put_u8(p.participant_id);
    w.put_u8(p.player_index);
    w.put_bool(p.is_used);
    w.put_bool(p.seen_this_tick);
}

fn get_participant(r: &mut Reader) -> Participant {
    Participant {
        participant_id: r.get_u8(),
        player_index: r.get_u8(),
        is_used: r.get_bool(),
        seen_this_tick: r.get_bool(),
    }
}

fn put_player_phase(w: &mut Writer, phase: PlayerPhase) {
    w.put_u8(match phase {
        PlayerPhase::SelectTeam => 0,
        PlayerPhase::CommittedToTeam => 1,
        PlayerPhase::Playing => 2,
    });
}

fn get_player_phase(r: &mut Reader) -> PlayerPhase {
    match r.get_u8() {
        0 => PlayerPhase::SelectTeam,
        1 => PlayerPhase::CommittedToTeam,
        2 => PlayerPhase::Playing,
        tag => panic!("corrupt state image: unknown player phase {}", tag),
    }
}

fn put_player(w: &mut Writer, p: &Player) {
    w.put_u8(p.player_index);
    w.put_u8(p.preferred_team);
    w.put_u8(p.controlling_avatar);
    w.put_u8(p.participant_id);
    put_input(w, p.last_input);
    put_player_phase(w, p.phase);
    w.put_bool(p.waiting_for_reconnect);
}

fn get_player(r: &mut Reader) -> Player {
    Player {
        player_index: r.get_u8(),
        preferred_team: r.get_u8(),
        controlling_avatar: r.get_u8(),
        participant_id: r.get_u8(),
        last_input: get_input(r),
        phase: get_player_phase(r),
        waiting_for_reconnect: r.get_bool(),
    }
}

fn put_avatar(w: &mut Writer, a: &Avatar) {
    w.put_circle(a.circle);
    w.put_vector2(a.requested_velocity);
    w.put_vector2(a.velocity);
    w.put_f32(a.visual_rotation);
    w.put_u8(a.controlled_by_player);
    w.put_u8(a.team);
    w.put_u8(a.dribble_cooldown);
    w.put_u8(a.kick_cooldown);
    w.put_u8(a.kicked_counter);
    w.put_u8(a.slide_tackle_cooldown);
    w.put_u8(a.slide_tackle_remaining);
    w.put_f32(a.slide_tackle_rotation);
    w.put_bool(a.request_build_kick_power);
    w.put_bool(a.request_slide_tackle);
    w.put_u8(a.kick_power);
}

fn get_avatar(r: &mut Reader) -> Avatar {
    Avatar {
        circle: r.get_circle(),
        requested_velocity: r.get_vector2(),
        velocity: r.get_vector2(),
        visual_rotation: r.get_f32(),
        controlled_by_player: r.get_u8(),
        team: r.get_u8(),
        dribble_cooldown: r.get_u8(),
        kick_cooldown: r.get_u8(),
        kicked_counter: r.get_u8(),
        slide_tackle_cooldown: r.get_u8(),
        slide_tackle_remaining: r.get_u8(),
        slide_tackle_rotation: r.get_f32(),
        request_build_kick_power: r.get_bool(),
        request_slide_tackle: r.get_bool(),
        kick_power: r.get_u8(),
    }
}

fn put_game_phase(w: &mut Writer, phase: GamePhase) {
    w.put_u8(match phase {
        GamePhase::WaitingForPlayers => 0,
        GamePhase::CountDown => 1,
        GamePhase::Playing => 2,
        GamePhase::AfterAGoal => 3,
        GamePhase::PostGame => 4,
    });
}

fn get_game_phase(r: &mut Reader) -> GamePhase {
    match r.get_u8() {
        0 => GamePhase::WaitingForPlayers,
        1 => GamePhase::CountDown,
        2 => GamePhase::Playing,
        3 => GamePhase::AfterAGoal,
        4 => GamePhase::PostGame,
        tag => panic!("corrupt state image: unknown game phase {}", tag),
    }
}

// -- Entry points ------------------------------------------------------------

/// Encode into a caller-provided buffer of exactly `STATE_OCTET_SIZE`.
pub fn encode_game_into(game: &Game, out: &mut [u8]) {
    assert_eq!(out.len(), STATE_OCTET_SIZE, "state image size is wrong");
    let mut w = Writer { buf: out, at: 0 };

    for participant in &game.participants {
        put_participant(&mut w, participant);
    }
    w.put_u8(game.last_participant_count);
    for player in &game.players {
        put_player(&mut w, player);
    }
    w.put_u8(game.player_count);
    for avatar in &game.avatars {
        put_avatar(&mut w, avatar);
    }
    w.put_u8(game.avatar_count);
    for team in &game.teams {
        w.put_u8(team.score);
    }
    w.put_circle(game.ball.circle);
    w.put_vector2(game.ball.velocity);
    w.put_u8(game.ball.collide_counter);
    put_game_phase(&mut w, game.phase);
    w.put_u16(game.phase_count_down);
    w.put_u16(game.tick_count);
    w.put_u16(game.match_clock_left_in_ticks);
    w.put_u8(game.latest_scored_team);

    debug_assert_eq!(w.at, STATE_OCTET_SIZE);
}

/// Encode into a fresh buffer.
pub fn encode_game(game: &Game) -> Vec<u8> {
    let mut out = vec![0u8; STATE_OCTET_SIZE];
    encode_game_into(game, &mut out);
    out
}

/// Rebuild a `Game` from its byte image. The image size is part of the
/// host contract; a mismatch is fatal.
pub fn decode_game(bytes: &[u8]) -> Game {
    assert_eq!(bytes.len(), STATE_OCTET_SIZE, "state image size is wrong");
    let mut r = Reader { buf: bytes, at: 0 };

    let mut game = Game::default();
    for participant in &mut game.participants {
        *participant = get_participant(&mut r);
    }
    game.last_participant_count = r.get_u8();
    for player in &mut game.players {
        *player = get_player(&mut r);
    }
    game.player_count = r.get_u8();
    for avatar in &mut game.avatars {
        *avatar = get_avatar(&mut r);
    }
    game.avatar_count = r.get_u8();
    for team in &mut game.teams {
        *team = Team { score: r.get_u8() };
    }
    game.ball = Ball {
        circle: r.get_circle(),
        velocity: r.get_vector2(),
        collide_counter: r.get_u8(),
    };
    game.phase = get_game_phase(&mut r);
    game.phase_count_down = r.get_u16();
    game.tick_count = r.get_u16();
    game.match_clock_left_in_ticks = r.get_u16();
    game.latest_scored_team = r.get_u8();

    debug_assert_eq!(r.at, STATE_OCTET_SIZE);
    game
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::create_initial_game;
    use crate::step::game_tick;
    use crate::types::{InputWithParticipant, SelectTeamInput};

    fn busy_game() -> Game {
        let mut game = create_initial_game();
        let commits: Vec<_> = (0..3u8)
            .map(|id| InputWithParticipant {
                participant_id: id,
                input: PlayerInput::SelectTeam(SelectTeamInput {
                    preferred_team_to_join: id % 2,
                }),
            })
            .collect();
        for _ in 0..20 {
            game_tick(&mut game, &commits);
        }
        game
    }

    #[test]
    fn image_has_the_advertised_size() {
        let game = busy_game();
        assert_eq!(encode_game(&game).len(), STATE_OCTET_SIZE);
    }

    #[test]
    fn round_trip_is_bitwise() {
        let game = busy_game();
        let restored = decode_game(&encode_game(&game));
        assert_eq!(game, restored);
        assert_eq!(encode_game(&restored), encode_game(&game));
    }

    #[test]
    fn initial_game_round_trips_too() {
        let game = create_initial_game();
        assert_eq!(decode_game(&encode_game(&game)), game);
    }

    #[test]
    fn every_input_variant_survives_the_image() {
        let variants = [
            PlayerInput::None,
            PlayerInput::Forced,
            PlayerInput::WaitingForReconnect,
            PlayerInput::InGame(InGameInput {
                horizontal_axis: -128,
                vertical_axis: 127,
                buttons: 3,
            }),
            PlayerInput::SelectTeam(SelectTeamInput {
                preferred_team_to_join: 1,
            }),
        ];
        let mut game = busy_game();
        for (i, variant) in variants.iter().enumerate() {
            game.players[i].last_input = *variant;
        }
        let restored = decode_game(&encode_game(&game));
        for (i, variant) in variants.iter().enumerate() {
            assert_eq!(restored.players[i].last_input, *variant);
        }
    }

    #[test]
    #[should_panic(expected = "state image size is wrong")]
    fn short_image_is_fatal() {
        decode_game(&[0u8; 8]);
    }
}
