//! Integration tests for group standings.

use badminton_tournament_web::{
    calculate_group_standings, qualified_teams, Group, GroupStanding, Team,
};

fn team(id: &str) -> Team {
    Team::new(id, format!("Team {id}"), "CLUB", vec![format!("{id} a"), format!("{id} b")])
}

fn group_of(ids: &[&str]) -> Group {
    Group::round_robin("A", "Bảng A", ids.iter().map(|id| team(id)).collect())
}

fn score(group: &mut Group, team_1: &str, team_2: &str, s1: u32, s2: u32) {
    let m = group
        .matches
        .iter_mut()
        .find(|m| {
            (m.team_1.id == team_1 && m.team_2.id == team_2)
                || (m.team_1.id == team_2 && m.team_2.id == team_1)
        })
        .unwrap();
    if m.team_1.id == team_1 {
        m.record_score(s1, s2).unwrap();
    } else {
        m.record_score(s2, s1).unwrap();
    }
}

fn row<'a>(standings: &'a [GroupStanding], id: &str) -> &'a GroupStanding {
    standings.iter().find(|s| s.team.id == id).unwrap()
}

#[test]
fn round_robin_creates_every_pairing_once() {
    let g = group_of(&["A1", "A2", "A3", "A4"]);
    assert_eq!(g.matches.len(), 6);
    let ids: Vec<_> = g.matches.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, ["A-0-1", "A-0-2", "A-0-3", "A-1-2", "A-1-3", "A-2-3"]);
    assert!(g.matches.iter().all(|m| m.group == "A" && !m.completed));
}

#[test]
fn no_completed_matches_gives_zeroed_table_in_team_order() {
    let g = group_of(&["A1", "A2", "A3", "A4"]);
    let standings = calculate_group_standings(&g);
    assert_eq!(standings.len(), 4);
    for (s, id) in standings.iter().zip(["A1", "A2", "A3", "A4"]) {
        assert_eq!(s.team.id, id);
        assert_eq!(s.points, 0);
        assert_eq!(s.matches_played, 0);
        assert_eq!(s.matches_won, 0);
        assert_eq!(s.matches_lost, 0);
        assert_eq!(s.score_difference, 0);
    }
}

#[test]
fn team_winning_all_three_tops_the_group() {
    let mut g = group_of(&["A", "B", "C", "D"]);
    score(&mut g, "A", "B", 21, 10);
    score(&mut g, "A", "C", 21, 10);
    score(&mut g, "A", "D", 21, 10);
    score(&mut g, "B", "C", 21, 15);
    score(&mut g, "B", "D", 21, 18);
    score(&mut g, "C", "D", 21, 19);

    let standings = calculate_group_standings(&g);
    let first = &standings[0];
    assert_eq!(first.team.id, "A");
    assert_eq!(first.points, 3);
    assert_eq!(first.matches_won, 3);
    assert_eq!(first.matches_lost, 0);
    assert_eq!(first.score_difference, 33);
    let order: Vec<_> = standings.iter().map(|s| s.team.id.as_str()).collect();
    assert_eq!(order, ["A", "B", "C", "D"]);
}

#[test]
fn each_match_awards_one_point_and_balances_score_difference() {
    let mut g = group_of(&["A", "B", "C"]);
    score(&mut g, "A", "B", 21, 17);
    score(&mut g, "C", "A", 21, 12);

    let standings = calculate_group_standings(&g);
    let points: u32 = standings.iter().map(|s| s.points).sum();
    let won: u32 = standings.iter().map(|s| s.matches_won).sum();
    let lost: u32 = standings.iter().map(|s| s.matches_lost).sum();
    let diff: i64 = standings.iter().map(|s| s.score_difference).sum();
    assert_eq!(points, 2);
    assert_eq!(won, 2);
    assert_eq!(lost, 2);
    assert_eq!(diff, 0);

    let a = row(&standings, "A");
    assert_eq!(a.matches_played, 2);
    assert_eq!(a.score_difference, 4 - 9);
}

#[test]
fn ties_on_points_break_by_score_difference() {
    // Three-way cycle: everyone has one win.
    let mut g = group_of(&["A", "B", "C"]);
    score(&mut g, "A", "B", 21, 19);
    score(&mut g, "B", "C", 21, 5);
    score(&mut g, "C", "A", 21, 18);

    let standings = calculate_group_standings(&g);
    assert!(standings.iter().all(|s| s.points == 1));
    let order: Vec<_> = standings.iter().map(|s| s.team.id.as_str()).collect();
    // B: -2 + 16 = 14, C: -16 + 3 = -13, A: 2 - 3 = -1
    assert_eq!(order, ["B", "A", "C"]);
}

#[test]
fn standings_are_sorted_by_points_then_difference_then_wins() {
    let mut g = group_of(&["A", "B", "C", "D"]);
    score(&mut g, "D", "A", 21, 3);
    score(&mut g, "B", "C", 21, 20);
    score(&mut g, "C", "D", 21, 11);

    let standings = calculate_group_standings(&g);
    for pair in standings.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.points >= b.points);
        if a.points == b.points {
            assert!(a.score_difference >= b.score_difference);
            if a.score_difference == b.score_difference {
                assert!(a.matches_won >= b.matches_won);
            }
        }
    }
}

#[test]
fn completed_match_without_winner_still_counts_as_played() {
    let mut g = group_of(&["A", "B"]);
    let m = &mut g.matches[0];
    m.score_1 = Some(21);
    m.score_2 = Some(10);
    m.completed = true;

    let standings = calculate_group_standings(&g);
    let a = row(&standings, "A");
    let b = row(&standings, "B");
    assert_eq!((a.matches_played, a.matches_won, a.points, a.score_difference), (1, 0, 0, 11));
    assert_eq!((b.matches_played, b.matches_lost, b.points, b.score_difference), (1, 0, 0, -11));
}

#[test]
fn input_group_is_not_modified() {
    let mut g = group_of(&["A", "B"]);
    score(&mut g, "A", "B", 21, 9);
    let before = g.clone();
    let _ = calculate_group_standings(&g);
    assert_eq!(g, before);
}

#[test]
fn qualified_teams_only_once_group_is_complete() {
    let mut g = group_of(&["A", "B", "C"]);
    score(&mut g, "A", "B", 21, 9);
    score(&mut g, "A", "C", 21, 9);
    assert!(qualified_teams(&g).is_empty());

    score(&mut g, "C", "B", 21, 9);
    let ids: Vec<_> = qualified_teams(&g).into_iter().map(|t| t.id).collect();
    assert_eq!(ids, ["A", "C"]);
}
