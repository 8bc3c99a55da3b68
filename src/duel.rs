//! Full games between two move policies.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Result,
    ports::MovePolicy,
    tictactoe::{BoardState, Game, Outcome, Player},
};

/// Play one game from `start`; `x` moves for X and `o` moves for O.
///
/// # Errors
///
/// Propagates policy errors and rejects illegal moves returned by a policy.
pub fn play_game(
    x: &mut dyn MovePolicy,
    o: &mut dyn MovePolicy,
    start: BoardState,
) -> Result<Game> {
    let mut game = Game::from_position(start);
    let mut state = start;

    while !game.outcome.is_decided() {
        let position = match state.to_move {
            Player::X => x.select_move(&state)?,
            Player::O => o.select_move(&state)?,
        };
        game.play(position)?;
        state = state.make_move(position)?;
    }

    debug!(
        x = x.name(),
        o = o.name(),
        moves = ?game.moves.iter().map(|m| m.position).collect::<Vec<_>>(),
        outcome = %game.outcome,
        "game finished"
    );
    Ok(game)
}

/// Outcome counts of a duel, seen from the first policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuelSummary {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl DuelSummary {
    fn record(&mut self, outcome: Outcome, player: Player) {
        self.games += 1;
        match outcome {
            Outcome::Win(winner) if winner == player => self.wins += 1,
            Outcome::Win(_) => self.losses += 1,
            Outcome::Draw | Outcome::InProgress => self.draws += 1,
        }
    }
}

/// Play `games` games between `policy` and `opponent`.
///
/// The first policy is X when `policy_first` is set, O otherwise; X always
/// opens.
pub fn run_duel(
    policy: &mut dyn MovePolicy,
    opponent: &mut dyn MovePolicy,
    games: usize,
    policy_first: bool,
) -> Result<DuelSummary> {
    let mut summary = DuelSummary::default();
    let role = if policy_first { Player::X } else { Player::O };

    for _ in 0..games {
        let game = if policy_first {
            play_game(policy, opponent, BoardState::new())?
        } else {
            play_game(opponent, policy, BoardState::new())?
        };
        summary.record(game.outcome, role);
    }

    info!(
        policy = policy.name(),
        opponent = opponent.name(),
        games = summary.games,
        wins = summary.wins,
        losses = summary.losses,
        draws = summary.draws,
        "duel finished"
    );
    Ok(summary)
}
