//! Integration tests for league play: schedule generation and standings.

use competition_manager::{
    calculate_league_standings, generate_league_schedule, FormResult, Leg, Match, ScoreField,
    Settings, Team, TeamId,
};
use std::collections::{HashMap, HashSet};

fn teams(n: usize) -> Vec<Team> {
    (0..n).map(|i| Team::new(format!("T{i}"))).collect()
}

fn sides(m: &Match) -> (TeamId, TeamId) {
    (m.home.unwrap().id, m.away.unwrap().id)
}

fn unordered(m: &Match) -> (TeamId, TeamId) {
    let (h, a) = sides(m);
    if h < a {
        (h, a)
    } else {
        (a, h)
    }
}

/// Matchdays in one pass of the circle method.
fn matchdays_per_pass(n: usize) -> u32 {
    (n + n % 2) as u32 - 1
}

fn play(m: &mut Match, home: u32, away: u32) {
    m.set_field(ScoreField::HomeScore, Some(home));
    m.set_field(ScoreField::AwayScore, Some(away));
}

#[test]
fn match_count_and_pairs_single_leg() {
    for n in 2..=9 {
        let t = teams(n);
        let matches = generate_league_schedule(&t, false);
        assert_eq!(matches.len(), n * (n - 1) / 2, "n = {n}");
        let pairs: HashSet<_> = matches.iter().map(unordered).collect();
        assert_eq!(pairs.len(), matches.len(), "a pair repeats for n = {n}");
        assert!(matches.iter().all(|m| !m.is_played && m.score().is_none()));
    }
}

#[test]
fn match_count_and_pairs_double_leg() {
    for n in 2..=8 {
        let t = teams(n);
        let matches = generate_league_schedule(&t, true);
        assert_eq!(matches.len(), n * (n - 1), "n = {n}");

        assert!(matches.iter().all(|m| m.leg == Leg::First));
        let pass = matchdays_per_pass(n);
        let first: Vec<_> = matches.iter().filter(|m| m.round <= pass).collect();
        let second: Vec<_> = matches.iter().filter(|m| m.round > pass).collect();
        assert_eq!(first.len(), second.len());
        let first_pairs: HashSet<_> = first.iter().map(|m| unordered(m)).collect();
        let second_pairs: HashSet<_> = second.iter().map(|m| unordered(m)).collect();
        assert_eq!(first_pairs.len(), first.len());
        assert_eq!(first_pairs, second_pairs);

        // Every ordered fixture appears exactly once: home and away are mirrored.
        let ordered: HashSet<_> = matches.iter().map(sides).collect();
        assert_eq!(ordered.len(), matches.len());
    }
}

#[test]
fn two_teams_single_leg_is_one_match() {
    let matches = generate_league_schedule(&teams(2), false);
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].round, 1);
    assert_eq!(matches[0].round_name, "Matchday 1");
}

#[test]
fn three_teams_each_play_twice() {
    let t = teams(3);
    let matches = generate_league_schedule(&t, false);
    assert_eq!(matches.len(), 3);
    let mut played: HashMap<TeamId, usize> = HashMap::new();
    for m in &matches {
        let (h, a) = sides(m);
        *played.entry(h).or_default() += 1;
        *played.entry(a).or_default() += 1;
    }
    for team in &t {
        assert_eq!(played[&team.id], 2);
    }
    // One rest fixture dropped from each of the three matchdays.
    let rounds: Vec<u32> = matches.iter().map(|m| m.round).collect();
    assert_eq!(rounds, vec![1, 2, 3]);
}

#[test]
fn second_leg_continues_matchday_numbering() {
    let t = teams(4);
    let matches = generate_league_schedule(&t, true);
    let pass = matchdays_per_pass(4);
    assert_eq!(pass, 3);
    assert_eq!(matches.iter().map(|m| m.round).max(), Some(6));
    // The mirrored pass starts on matchday 4 with home and away swapped.
    let opener = &matches[0];
    let mirror = matches.iter().find(|m| m.round == pass + 1).unwrap();
    assert_eq!(mirror.home, opener.away);
    assert_eq!(mirror.away, opener.home);
    assert!(matches.windows(2).all(|w| w[0].round <= w[1].round));
    let numbers: HashSet<u32> = matches.iter().map(|m| m.match_number).collect();
    assert_eq!(numbers.len(), matches.len());
}

#[test]
fn no_team_plays_twice_on_a_matchday() {
    let t = teams(6);
    let matches = generate_league_schedule(&t, true);
    let mut seen: HashSet<(u32, TeamId)> = HashSet::new();
    for m in &matches {
        let (h, a) = sides(m);
        assert!(seen.insert((m.round, h)));
        assert!(seen.insert((m.round, a)));
    }
}

#[test]
fn standings_wins_equal_losses_and_draw_points() {
    let t = teams(4);
    let settings = Settings::default();
    let mut matches = generate_league_schedule(&t, false);
    play(&mut matches[0], 2, 0);
    play(&mut matches[1], 0, 0);
    play(&mut matches[2], 1, 3);
    // matches[3..] stay unplayed

    let table = calculate_league_standings(&t, &matches, &settings);
    assert_eq!(table.len(), 4);
    let won: u32 = table.iter().map(|r| r.won).sum();
    let lost: u32 = table.iter().map(|r| r.lost).sum();
    assert_eq!(won, 2);
    assert_eq!(lost, 2);

    let (h, a) = sides(&matches[1]);
    for id in [h, a] {
        let row = table.iter().find(|r| r.team_id == id).unwrap();
        assert_eq!(row.drawn, 1);
        assert!(row.form.contains(&FormResult::Draw));
    }
    let played: u32 = table.iter().map(|r| r.played).sum();
    assert_eq!(played, 6);
}

#[test]
fn standings_order_points_then_difference_then_goals() {
    let t = teams(3);
    let (a, b, c) = (t[0].id, t[1].id, t[2].id);
    let mut matches = vec![
        Match::league(1, 1, a, b),
        Match::league(2, 2, b, c),
        Match::league(3, 3, c, a),
    ];
    // a beats b 1-0, b beats c 3-0, c beats a 2-1: everyone has 3 points.
    play(&mut matches[0], 1, 0);
    play(&mut matches[1], 3, 0);
    play(&mut matches[2], 2, 1);

    let table = calculate_league_standings(&t, &matches, &Settings::default());
    let order: Vec<TeamId> = table.iter().map(|r| r.team_id).collect();
    // b: +2, a: 0 (gf 2), c: -2
    assert_eq!(order, vec![b, a, c]);
    assert!(table.iter().all(|r| r.points == 3));
    assert_eq!(table[0].goal_difference, 2);
    assert_eq!(table[2].goal_difference, -2);
}

#[test]
fn standings_skip_unresolved_and_bye_teams() {
    let mut t = teams(2);
    let bye = Team::bye();
    t.push(bye.clone());
    let mut matches = vec![
        Match::league(1, 1, t[0].id, t[1].id),
        Match::league(2, 2, t[0].id, bye.id),
        Match::league(3, 3, t[0].id, TeamId::new_v4()),
    ];
    for m in &mut matches {
        play(m, 1, 0);
    }
    let mut placeholder = Match::league(4, 4, t[0].id, t[1].id);
    placeholder.home = None;
    placeholder.is_played = true;
    matches.push(placeholder);

    let table = calculate_league_standings(&t, &matches, &Settings::default());
    assert_eq!(table.len(), 2);
    assert!(table.iter().all(|r| r.team_id != bye.id));
    assert_eq!(table[0].played, 1);
    assert_eq!(table[0].points, 3);
    assert_eq!(table[0].form_string(), "W");
    assert_eq!(table[1].form_string(), "L");
}

#[test]
fn standings_use_configured_points() {
    let t = teams(2);
    let mut matches = generate_league_schedule(&t, true);
    play(&mut matches[0], 2, 2);
    play(&mut matches[1], 1, 0);
    let settings = Settings {
        win_points: 2,
        draw_points: 0,
        ..Settings::default()
    };
    let table = calculate_league_standings(&t, &matches, &settings);
    assert_eq!(table[0].points, 2);
    assert_eq!(table[1].points, 0);
    assert_eq!(table[0].form.len(), 2);
}

#[test]
fn standings_totals_hold_maximum_scores() {
    let t = teams(2);
    let mut matches = generate_league_schedule(&t, true);
    play(&mut matches[0], u32::MAX, 0);
    play(&mut matches[1], u32::MAX, 1);
    let settings = Settings {
        win_points: u32::MAX,
        ..Settings::default()
    };
    let table = calculate_league_standings(&t, &matches, &settings);
    let total: u64 = table.iter().map(|r| r.goals_for).sum();
    assert_eq!(total, 2 * u64::from(u32::MAX) + 1);
    assert!(table.iter().all(|r| r.points == u64::from(u32::MAX)));
    let difference: i64 = table.iter().map(|r| r.goal_difference).sum();
    assert_eq!(difference, 0);
    assert_eq!(table[0].goal_difference, 1);
}
