//! Group standings: points table derived from a pool's match results.

use crate::models::{Group, GroupStanding, Side, Team};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Number of teams per group that advance to the knockout stage.
pub const QUALIFIERS_PER_GROUP: usize = 2;

/// Compute the ranked table for one group. Pure: the group is not modified.
///
/// 1. One zeroed row per team, in team order.
/// 2. Each completed match: win = 1 point, loss = 0; both teams get the signed score delta.
/// 3. Sort by points, then score difference, then matches won (all descending).
///    Rows equal on all three keep team order.
pub fn calculate_group_standings(group: &Group) -> Vec<GroupStanding> {
    let mut standings: Vec<GroupStanding> =
        group.teams.iter().cloned().map(GroupStanding::new).collect();
    let index: HashMap<&str, usize> = group
        .teams
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id.as_str(), i))
        .collect();

    for m in group.matches.iter().filter(|m| m.completed) {
        let (Some(&i1), Some(&i2)) = (index.get(m.team_1.id.as_str()), index.get(m.team_2.id.as_str()))
        else {
            continue;
        };

        standings[i1].add_played();
        standings[i2].add_played();

        match m.winner {
            Some(Side::One) => {
                standings[i1].add_win();
                standings[i2].add_loss();
            }
            Some(Side::Two) => {
                standings[i2].add_win();
                standings[i1].add_loss();
            }
            None => {}
        }

        if let (Some(s1), Some(s2)) = (m.score_1, m.score_2) {
            let delta = i64::from(s1) - i64::from(s2);
            standings[i1].score_difference += delta;
            standings[i2].score_difference -= delta;
        }
    }

    standings.sort_by(compare_standings);
    standings
}

/// Descending order on (points, score difference, matches won).
fn compare_standings(a: &GroupStanding, b: &GroupStanding) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.score_difference.cmp(&a.score_difference))
        .then_with(|| b.matches_won.cmp(&a.matches_won))
}

/// The top two teams of a finished group. Empty while any group match is open.
pub fn qualified_teams(group: &Group) -> Vec<Team> {
    if !group.is_complete() {
        return Vec::new();
    }
    calculate_group_standings(group)
        .into_iter()
        .take(QUALIFIERS_PER_GROUP)
        .map(|s| s.team)
        .collect()
}
