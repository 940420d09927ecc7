//! Quarter records table: per-quarter scores, totals and quarter wins

use serde::Serialize;

use crate::state::{
    game::{Game, Quarter},
    history::{self, QuarterRecord},
};

/// One team's cell in a quarter row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterCell {
    pub team_id: String,
    pub score: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterRow {
    pub quarter: Quarter,
    pub is_current: bool,
    pub cells: [QuarterCell; 2],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub team_id: String,
    pub name: String,
    pub color: String,
    pub total: u64,
    pub quarter_wins: u32,
}

/// Everything the quarter records table shows for a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterRecordsView {
    pub current_quarter: Quarter,
    pub teams: [TeamSummary; 2],
    pub quarters: Vec<QuarterRow>,
}

/// Live scores count only while the current quarter has no saved record
fn live_scores(game: &Game) -> Option<[u32; 2]> {
    (!history::is_saved(&game.quarter_records, game.current_quarter))
        .then(|| [game.teams[0].score, game.teams[1].score])
}

fn recorded_scores(game: &Game, record: &QuarterRecord) -> [u32; 2] {
    [
        record.score_for(&game.teams[0].id),
        record.score_for(&game.teams[1].id),
    ]
}

/// Score pairs of every counted quarter: saved records plus the unsaved
/// live quarter
fn counted_quarters(game: &Game) -> impl Iterator<Item = [u32; 2]> + '_ {
    game.quarter_records
        .iter()
        .map(move |record| recorded_scores(game, record))
        .chain(live_scores(game))
}

fn team_index(game: &Game, team_id: &str) -> Option<usize> {
    game.teams.iter().position(|t| t.id == team_id)
}

/// Sum of saved quarter scores, plus the live score if the current quarter
/// is unsaved. Unknown teams total 0.
pub fn total_score(game: &Game, team_id: &str) -> u64 {
    let Some(index) = team_index(game, team_id) else {
        return 0;
    };
    counted_quarters(game).map(|scores| u64::from(scores[index])).sum()
}

/// Quarters in which the team strictly outscored the other team
pub fn quarter_wins(game: &Game, team_id: &str) -> u32 {
    let Some(index) = team_index(game, team_id) else {
        return 0;
    };
    counted_quarters(game)
        .filter(|scores| scores[index] > scores[1 - index])
        .count() as u32
}

impl QuarterRecordsView {
    pub fn from_game(game: &Game) -> Self {
        let quarters = Quarter::all()
            .map(|quarter| {
                let record = history::find(&game.quarter_records, quarter);
                let is_current = quarter == game.current_quarter;

                let cells = [0, 1].map(|i| {
                    let team = &game.teams[i];
                    let score = if is_current {
                        team.score
                    } else {
                        record.map_or(0, |r| r.score_for(&team.id))
                    };
                    let color = record
                        .and_then(|r| r.color_for(&team.id))
                        .unwrap_or(&team.color)
                        .to_string();

                    QuarterCell {
                        team_id: team.id.clone(),
                        score,
                        color,
                    }
                });

                QuarterRow {
                    quarter,
                    is_current,
                    cells,
                }
            })
            .collect::<Vec<QuarterRow>>();

        let current_row = quarters.iter().find(|row| row.is_current);
        let teams = [0, 1].map(|i| {
            let team = &game.teams[i];
            TeamSummary {
                team_id: team.id.clone(),
                name: team.name.clone(),
                color: current_row.map_or(&team.color, |row| &row.cells[i].color).clone(),
                total: total_score(game, &team.id),
                quarter_wins: quarter_wins(game, &team.id),
            }
        });

        Self {
            current_quarter: game.current_quarter,
            teams,
            quarters,
        }
    }
}
