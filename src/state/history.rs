//! Quarter history: per-quarter snapshots of both teams' scores and colors

use std::collections::BTreeMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::game::{Quarter, Team};

/// Snapshot of both teams for one quarter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuarterRecord {
    pub quarter: Quarter,
    pub team_scores: BTreeMap<String, u32>,
    /// Absent on records written before colors were tracked
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_colors: Option<BTreeMap<String, String>>,
}

impl QuarterRecord {
    /// Capture the live scores and colors of `teams` for `quarter`
    pub fn snapshot(quarter: Quarter, teams: &[Team; 2]) -> Self {
        Self {
            quarter,
            team_scores: teams.iter().map(|t| (t.id.clone(), t.score)).collect(),
            team_colors: Some(colors_of(teams)),
        }
    }

    /// Score stored for a team, 0 if the team is missing from the record
    pub fn score_for(&self, team_id: &str) -> u32 {
        self.team_scores.get(team_id).copied().unwrap_or(0)
    }

    /// Stored color for a team, if any
    pub fn color_for(&self, team_id: &str) -> Option<&str> {
        self.team_colors
            .as_ref()
            .and_then(|colors| colors.get(team_id))
            .map(String::as_str)
    }
}

fn colors_of(teams: &[Team; 2]) -> BTreeMap<String, String> {
    teams.iter().map(|t| (t.id.clone(), t.color.clone())).collect()
}

/// Insert `record`, replacing any record already held for the same quarter.
/// Returns false when an identical record was already stored.
pub fn upsert(records: &mut Vec<QuarterRecord>, record: QuarterRecord) -> bool {
    match records.iter_mut().find(|r| r.quarter == record.quarter) {
        Some(existing) if *existing == record => false,
        Some(existing) => {
            *existing = record;
            true
        }
        None => {
            records.push(record);
            true
        }
    }
}

/// Give every record without stored colors the current team colors.
///
/// Records that already carry colors are left alone. Returns how many
/// records were filled in.
pub fn backfill_colors(records: &mut [QuarterRecord], teams: &[Team; 2]) -> usize {
    let mut filled = 0;
    for record in records.iter_mut().filter(|r| r.team_colors.is_none()) {
        record.team_colors = Some(colors_of(teams));
        filled += 1;
    }

    if filled > 0 {
        debug!("Backfilled team colors on {} quarter records", filled);
    }
    filled
}

/// Record for `quarter`, if one has been saved
pub fn find(records: &[QuarterRecord], quarter: Quarter) -> Option<&QuarterRecord> {
    records.iter().find(|r| r.quarter == quarter)
}

/// Whether a record exists for `quarter`
pub fn is_saved(records: &[QuarterRecord], quarter: Quarter) -> bool {
    find(records, quarter).is_some()
}
