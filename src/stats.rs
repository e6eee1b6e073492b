use crate::dates::{compare_desc, year_of};
use crate::models::{Badge, PlayerEntry, Session, StandingRow, Streak};
use std::collections::BTreeMap;

pub fn totals(sessions: &[Session]) -> BTreeMap<String, i64> {
    sum_by_player(sessions, |entry| entry.net)
}

pub fn total_chips(sessions: &[Session]) -> BTreeMap<String, i64> {
    sum_by_player(sessions, |entry| entry.ending)
}

fn sum_by_player(
    sessions: &[Session],
    value: impl Fn(&PlayerEntry) -> i64,
) -> BTreeMap<String, i64> {
    let mut sums = BTreeMap::new();
    for entry in sessions.iter().flat_map(|session| &session.players) {
        *sums.entry(entry.player.clone()).or_insert(0) += value(entry);
    }
    sums
}

pub fn yearly_totals(sessions: &[Session]) -> BTreeMap<String, BTreeMap<String, i64>> {
    let mut years: BTreeMap<String, BTreeMap<String, i64>> = BTreeMap::new();
    for session in sessions {
        let Some(year) = year_of(&session.date) else {
            continue;
        };
        let bucket = years.entry(year).or_default();
        for entry in &session.players {
            *bucket.entry(entry.player.clone()).or_insert(0) += entry.net;
        }
    }
    years
}

/// Current win or loss run for every player, newest session first.
///
/// Sessions the player sat out are skipped. A zero net ends the run, and a
/// most recent zero leaves both counts at 0.
pub fn current_streaks(sessions: &[Session]) -> BTreeMap<String, Streak> {
    let mut ordered: Vec<&Session> = sessions.iter().collect();
    ordered.sort_by(|a, b| compare_desc(&a.date, &b.date));

    let mut nets: BTreeMap<&str, Vec<i64>> = BTreeMap::new();
    for session in ordered {
        for entry in &session.players {
            nets.entry(entry.player.as_str()).or_default().push(entry.net);
        }
    }

    nets.into_iter()
        .map(|(player, nets)| (player.to_string(), streak_from(&nets)))
        .collect()
}

fn streak_from(nets: &[i64]) -> Streak {
    let Some(&latest) = nets.first() else {
        return Streak::default();
    };
    let sign = latest.signum();
    if sign == 0 {
        return Streak::default();
    }

    let run = nets.iter().take_while(|net| net.signum() == sign).count() as u32;
    if sign > 0 {
        Streak { win: run, loss: 0 }
    } else {
        Streak { win: 0, loss: run }
    }
}

/// Players ranked by total net, highest first; equal totals fall back to
/// name order.
pub fn standings(sessions: &[Session]) -> Vec<StandingRow> {
    let chips = total_chips(sessions);
    rank_totals(totals(sessions))
        .into_iter()
        .enumerate()
        .map(|(index, (player, total))| {
            let rank = index + 1;
            StandingRow {
                rank,
                display_rank: rank.min(4),
                badge: badge_for(rank),
                chips: chips.get(&player).copied().unwrap_or_default(),
                player,
                total,
            }
        })
        .collect()
}

pub fn rank_totals(totals: BTreeMap<String, i64>) -> Vec<(String, i64)> {
    // BTreeMap iteration is already alphabetical, so a stable sort keeps
    // tied players in name order.
    let mut ranked: Vec<(String, i64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

fn badge_for(rank: usize) -> Option<Badge> {
    match rank {
        1 => Some(Badge::Gold),
        2 => Some(Badge::Silver),
        3 => Some(Badge::Bronze),
        _ => None,
    }
}
