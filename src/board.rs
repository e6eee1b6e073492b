use crate::dates::{display_label, sort_sessions_desc};
use crate::models::{BoardResponse, HistoryCard, PlayerTotal, Session, StreakRow, YearSummary};
use crate::stats::{current_streaks, rank_totals, standings, yearly_totals};
use std::cmp::Reverse;

pub fn build_board(sessions: &[Session]) -> BoardResponse {
    let mut yearly: Vec<YearSummary> = yearly_totals(sessions)
        .into_iter()
        .map(|(year, totals)| YearSummary {
            year,
            players: rank_totals(totals)
                .into_iter()
                .map(|(player, total)| PlayerTotal { player, total })
                .collect(),
        })
        .collect();
    yearly.sort_by_key(|summary| Reverse(summary.year.clone()));

    let streaks = current_streaks(sessions)
        .into_iter()
        .filter(|(_, streak)| streak.win > 0 || streak.loss > 0)
        .map(|(player, streak)| StreakRow {
            player,
            win: streak.win,
            loss: streak.loss,
        })
        .collect();

    let mut ordered = sessions.to_vec();
    sort_sessions_desc(&mut ordered);
    let history = ordered
        .into_iter()
        .map(|session| HistoryCard {
            label: display_label(&session.date),
            id: session.id,
            date: session.date,
            players: session.players,
        })
        .collect();

    BoardResponse {
        standings: standings(sessions),
        yearly,
        streaks,
        history,
    }
}
