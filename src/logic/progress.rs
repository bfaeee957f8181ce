//! Round progression: record scores and generate the next knockout round once a round is decided.

use crate::logic::bracket::{generate_finals, generate_quarter_finals, generate_semi_finals, Finals};
use crate::models::{GameMatch, RoundType, Tournament, TournamentError};

/// Record a score for any match and advance the bracket if that completed a round.
///
/// Returns the round generated as a result, if any. A round is locked once the round after it
/// exists; re-scoring a match of a still-open round is allowed. On error the tournament is
/// left unchanged.
pub fn record_match_score(
    tournament: &mut Tournament,
    match_id: &str,
    score_1: u32,
    score_2: u32,
) -> Result<Option<RoundType>, TournamentError> {
    let round = tournament
        .find_match(match_id)
        .map(|m| m.round)
        .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?;
    if next_round_started(tournament, round) {
        return Err(TournamentError::RoundLocked(round));
    }
    let mut next = tournament.clone();
    next
        .find_match_mut(match_id)
        .ok_or_else(|| TournamentError::MatchNotFound(match_id.to_string()))?
        .record_score(score_1, score_2)?;
    let generated = advance(&mut next)?;
    *tournament = next;
    log::debug!("Recorded {}-{} for match {}", score_1, score_2, match_id);
    Ok(generated)
}

fn next_round_started(tournament: &Tournament, round: RoundType) -> bool {
    match round {
        RoundType::Group => !tournament.quarter_finals.is_empty(),
        RoundType::Quarter => !tournament.semi_finals.is_empty(),
        RoundType::Semi => tournament.final_match.is_some() || tournament.third_place.is_some(),
        RoundType::Final | RoundType::Third => false,
    }
}

/// First open match of a round, for error reporting.
fn first_open(matches: &[GameMatch]) -> Option<&GameMatch> {
    matches.iter().find(|m| !m.is_decided())
}

/// Generate the next round if its prerequisite round is decided and it does not exist yet.
pub fn advance(tournament: &mut Tournament) -> Result<Option<RoundType>, TournamentError> {
    if tournament.quarter_finals.is_empty() {
        if !tournament.group_stage_complete() {
            return Ok(None);
        }
        start_knockout_stage(tournament)?;
        return Ok(Some(RoundType::Quarter));
    }

    if tournament.semi_finals.is_empty() {
        if first_open(&tournament.quarter_finals).is_some() {
            return Ok(None);
        }
        tournament.semi_finals = generate_semi_finals(&tournament.quarter_finals)?.into();
        log::info!("Semi finals generated");
        return Ok(Some(RoundType::Semi));
    }

    if tournament.final_match.is_none() && first_open(&tournament.semi_finals).is_none() {
        let Finals {
            final_match,
            third_place,
        } = generate_finals(&tournament.semi_finals)?;
        tournament.final_match = Some(final_match);
        tournament.third_place = Some(third_place);
        log::info!("Final and third place match generated");
        return Ok(Some(RoundType::Final));
    }

    Ok(None)
}

/// Generate the quarter finals from the group tables. Every group match must be completed.
pub fn start_knockout_stage(tournament: &mut Tournament) -> Result<(), TournamentError> {
    if !tournament.quarter_finals.is_empty() {
        return Err(TournamentError::RoundAlreadyGenerated(RoundType::Quarter));
    }
    if let Some(open) = tournament
        .groups
        .iter()
        .flat_map(|g| g.matches.iter())
        .find(|m| !m.completed)
    {
        return Err(TournamentError::IncompleteRound {
            round: RoundType::Group,
            match_id: open.id.clone(),
        });
    }
    tournament.quarter_finals = generate_quarter_finals(tournament)?.into();
    log::info!("Quarter finals generated");
    Ok(())
}
