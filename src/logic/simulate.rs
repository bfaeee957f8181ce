//! Score every open match of the current phase with random results (test/demo helper).

use crate::logic::progress::record_match_score;
use crate::models::{GameMatch, MatchId, Tournament, TournamentError, TournamentState};
use rand::Rng;

/// Points needed to win a game.
const WINNING_SCORE: u32 = 21;

/// Score all open matches of the current phase: winner gets 21, loser 0..=19, side chosen at random.
/// Advances the bracket as rounds complete. Returns how many matches were scored.
pub fn simulate_open_matches<R: Rng>(
    tournament: &mut Tournament,
    rng: &mut R,
) -> Result<usize, TournamentError> {
    let open: Vec<MatchId> = current_round_matches(tournament)
        .filter(|m| !m.completed)
        .map(|m| m.id.clone())
        .collect();

    for id in &open {
        let loser = rng.gen_range(0..=WINNING_SCORE - 2);
        let (score_1, score_2) = if rng.gen_bool(0.5) {
            (WINNING_SCORE, loser)
        } else {
            (loser, WINNING_SCORE)
        };
        record_match_score(tournament, id, score_1, score_2)?;
    }
    Ok(open.len())
}

fn current_round_matches(tournament: &Tournament) -> Box<dyn Iterator<Item = &GameMatch> + '_> {
    match tournament.state() {
        TournamentState::GroupPlay => {
            Box::new(tournament.groups.iter().flat_map(|g| g.matches.iter()))
        }
        TournamentState::QuarterFinals => Box::new(tournament.quarter_finals.iter()),
        TournamentState::SemiFinals => Box::new(tournament.semi_finals.iter()),
        TournamentState::Finals => Box::new(
            tournament
                .final_match
                .iter()
                .chain(tournament.third_place.iter()),
        ),
        TournamentState::Completed => Box::new(std::iter::empty()),
    }
}
