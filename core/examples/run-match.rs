//! Drives a scripted match and prints a JSON summary of the final state.
//!
//! Usage:
//!   cargo run -p pitchball-core --example run-match -- [idle|duel|short]

use pitchball_core::*;

fn in_game(participant_id: u8, horizontal: i8, vertical: i8, buttons: u8) -> InputWithParticipant {
    InputWithParticipant {
        participant_id,
        input: PlayerInput::InGame(InGameInput {
            horizontal_axis: horizontal,
            vertical_axis: vertical,
            buttons,
        }),
    }
}

fn select_team(participant_id: u8, team: u8) -> InputWithParticipant {
    InputWithParticipant {
        participant_id,
        input: PlayerInput::SelectTeam(SelectTeamInput {
            preferred_team_to_join: team,
        }),
    }
}

fn main() {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "duel".to_string());

    let ticks: u32 = match mode.as_str() {
        "idle" => u32::from(arena::MATCH_DURATION_TICKS),
        "duel" => 2000,
        "short" => 100,
        _ => {
            eprintln!("Unknown mode: {}. Use 'idle', 'duel', or 'short'", mode);
            std::process::exit(1);
        }
    };

    let mut game = create_initial_game();
    for tick in 0..ticks {
        let inputs = match (mode.as_str(), tick) {
            ("idle", _) => vec![],
            (_, 0) => vec![select_team(0, 0), select_team(1, 1)],
            (_, t) => vec![
                // Player 0 chases rightward and taps the kick button.
                in_game(0, 100, ((t % 60) as i8) - 30, (t % 40 / 30) as u8),
                // Player 1 sweeps up and down on the other wing.
                in_game(1, -100, if t % 50 < 25 { 80 } else { -80 }, 0),
            ],
        };
        game_tick(&mut game, &inputs);
    }

    eprintln!("=== Match result ({} mode) ===", mode);
    eprintln!("Tick: {}", game.tick_count);
    eprintln!("Phase: {:?}", game.phase);
    eprintln!(
        "Score: {} - {}",
        game.teams[0].score, game.teams[1].score
    );
    eprintln!(
        "Ball: ({:.1}, {:.1})",
        game.ball.circle.center.x, game.ball.circle.center.y
    );

    println!("{}", serde_json::to_string(&game).unwrap());
}
