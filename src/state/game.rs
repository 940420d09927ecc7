//! Game, team and quarter types together with the pure game transitions

use std::fmt;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    history::{self, QuarterRecord},
    timer_state::TickOutcome,
};

/// Timer length of a fresh game and of a timer reset
pub const DEFAULT_TIMER_SECONDS: u32 = 600;

/// Remaining seconds at or below which every tick emits a countdown cue
pub const COUNTDOWN_FROM: u32 = 5;

/// A scoring period, always within 1..=9
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Quarter(u8);

impl Quarter {
    pub const FIRST: Quarter = Quarter(1);
    pub const LAST: Quarter = Quarter(9);

    /// Build a quarter, rejecting numbers outside 1..=9
    pub fn new(number: u8) -> Option<Self> {
        (Self::FIRST.0..=Self::LAST.0)
            .contains(&number)
            .then_some(Quarter(number))
    }

    /// Build a quarter, clamping `number` into 1..=9
    pub fn clamped(number: i32) -> Self {
        Quarter(number.clamp(Self::FIRST.0.into(), Self::LAST.0.into()) as u8)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Following quarter, saturating at the last one
    pub fn next(self) -> Self {
        Self::clamped(i32::from(self.0) + 1)
    }

    /// Preceding quarter, saturating at the first one
    pub fn previous(self) -> Self {
        Self::clamped(i32::from(self.0) - 1)
    }

    /// Every quarter in order
    pub fn all() -> impl Iterator<Item = Quarter> {
        (Self::FIRST.0..=Self::LAST.0).map(Quarter)
    }
}

impl TryFrom<u8> for Quarter {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Quarter::new(number).ok_or_else(|| format!("Quarter {} is outside 1..=9", number))
    }
}

impl From<Quarter> for u8 {
    fn from(quarter: Quarter) -> Self {
        quarter.0
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

/// One of the two sides on the scoreboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub score: u32,
    /// Hex color string, stored as given
    pub color: String,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            score: 0,
            color: color.into(),
        }
    }
}

/// Fixed ids of the two teams
pub const TEAM_IDS: [&str; 2] = ["1", "2"];

fn default_teams() -> [Team; 2] {
    [
        Team::new(TEAM_IDS[0], "Player1", "#3B82F6"),
        Team::new(TEAM_IDS[1], "Player2", "#EF4444"),
    ]
}

/// The single active game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub teams: [Team; 2],
    pub timer_seconds: u32,
    pub is_timer_running: bool,
    pub created_at: DateTime<Utc>,
    pub current_quarter: Quarter,
    pub quarter_records: Vec<QuarterRecord>,
}

impl Game {
    /// Create a fresh game: default teams, 10 minute timer, quarter 1
    pub fn new() -> Self {
        Self::created_at(Utc::now())
    }

    /// Create a fresh game stamped with `created_at`
    pub fn created_at(created_at: DateTime<Utc>) -> Self {
        Self {
            id: created_at.timestamp_millis().to_string(),
            teams: default_teams(),
            timer_seconds: DEFAULT_TIMER_SECONDS,
            is_timer_running: false,
            created_at,
            current_quarter: Quarter::FIRST,
            quarter_records: Vec::new(),
        }
    }

    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    fn team_mut(&mut self, team_id: &str) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == team_id)
    }

    /// Apply `delta` to a team's score, flooring at zero.
    ///
    /// Returns whether the score changed; unknown teams are ignored.
    pub fn update_score(&mut self, team_id: &str, delta: i32) -> bool {
        let Some(team) = self.team_mut(team_id) else {
            return false;
        };

        let score = (i64::from(team.score) + i64::from(delta)).clamp(0, i64::from(u32::MAX)) as u32;
        let changed = score != team.score;
        team.score = score;
        changed
    }

    pub fn update_team_name(&mut self, team_id: &str, name: &str) -> bool {
        match self.team_mut(team_id) {
            Some(team) if team.name != name => {
                team.name = name.to_string();
                true
            }
            _ => false,
        }
    }

    pub fn update_team_color(&mut self, team_id: &str, color: &str) -> bool {
        match self.team_mut(team_id) {
            Some(team) if team.color != color => {
                team.color = color.to_string();
                true
            }
            _ => false,
        }
    }

    /// Zero both scores, go back to quarter 1 and drop the quarter history
    pub fn reset_scores(&mut self) -> bool {
        let changed = self.reset_current_quarter()
            || self.current_quarter != Quarter::FIRST
            || !self.quarter_records.is_empty();

        self.current_quarter = Quarter::FIRST;
        self.quarter_records.clear();
        changed
    }

    /// Zero both scores, keeping the quarter history
    pub fn reset_current_quarter(&mut self) -> bool {
        let changed = self.teams.iter().any(|t| t.score != 0);
        for team in &mut self.teams {
            team.score = 0;
        }
        changed
    }

    /// Save the live scores and colors as the record of the current quarter.
    ///
    /// Returns false when the stored record already matched and no legacy
    /// record needed colors.
    pub fn save_current_quarter(&mut self) -> bool {
        let record = QuarterRecord::snapshot(self.current_quarter, &self.teams);
        let stored = history::upsert(&mut self.quarter_records, record);
        let filled = history::backfill_colors(&mut self.quarter_records, &self.teams);
        stored || filled > 0
    }

    pub fn next_quarter(&mut self) -> bool {
        self.move_to_quarter(self.current_quarter.next())
    }

    pub fn previous_quarter(&mut self) -> bool {
        self.move_to_quarter(self.current_quarter.previous())
    }

    /// Save the current quarter, then load the target quarter's scores
    /// (zero when it has no record yet)
    fn move_to_quarter(&mut self, target: Quarter) -> bool {
        if target == self.current_quarter {
            return false;
        }

        self.save_current_quarter();

        let restored = history::find(&self.quarter_records, target)
            .map(|record| [record.score_for(&self.teams[0].id), record.score_for(&self.teams[1].id)])
            .unwrap_or([0, 0]);

        for (team, score) in self.teams.iter_mut().zip(restored) {
            team.score = score;
        }
        self.current_quarter = target;
        true
    }

    pub fn start_timer(&mut self) -> bool {
        !std::mem::replace(&mut self.is_timer_running, true)
    }

    pub fn stop_timer(&mut self) -> bool {
        std::mem::replace(&mut self.is_timer_running, false)
    }

    /// Set the remaining time and stop the timer
    pub fn set_timer(&mut self, seconds: u32) -> bool {
        let changed = self.timer_seconds != seconds || self.is_timer_running;
        self.timer_seconds = seconds;
        self.is_timer_running = false;
        changed
    }

    /// Set the remaining time, leaving the run state alone
    pub fn update_timer(&mut self, seconds: u32) -> bool {
        std::mem::replace(&mut self.timer_seconds, seconds) != seconds
    }

    pub fn reset_timer(&mut self) -> bool {
        self.set_timer(DEFAULT_TIMER_SECONDS)
    }

    /// Advance the running timer by one second
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_timer_running {
            return TickOutcome::Idle;
        }

        if self.timer_seconds == 0 {
            self.stop_timer();
            return TickOutcome::Expired;
        }

        let remaining = self.timer_seconds - 1;
        self.update_timer(remaining);

        match remaining {
            0 => {
                self.stop_timer();
                TickOutcome::Finished
            }
            1..=COUNTDOWN_FROM => TickOutcome::Countdown { remaining },
            _ => TickOutcome::Continue { remaining },
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(game: &Game) -> [u32; 2] {
        [game.teams[0].score, game.teams[1].score]
    }

    #[test]
    fn new_game_has_defaults() {
        let game = Game::new();

        assert_eq!(game.teams[0].id, "1");
        assert_eq!(game.teams[1].color, "#EF4444");
        assert_eq!(game.timer_seconds, 600);
        assert!(!game.is_timer_running);
        assert_eq!(game.current_quarter, Quarter::FIRST);
        assert!(game.quarter_records.is_empty());
        assert_eq!(game.id, game.created_at.timestamp_millis().to_string());
    }

    #[test]
    fn quarter_is_clamped() {
        assert_eq!(Quarter::clamped(0), Quarter::FIRST);
        assert_eq!(Quarter::clamped(42), Quarter::LAST);
        assert_eq!(Quarter::LAST.next(), Quarter::LAST);
        assert_eq!(Quarter::FIRST.previous(), Quarter::FIRST);
        assert!(Quarter::new(10).is_none());
        assert_eq!(Quarter::all().count(), 9);
    }

    #[test]
    fn quarter_rejects_out_of_range_json() {
        assert!(serde_json::from_str::<Quarter>("0").is_err());
        assert_eq!(serde_json::from_str::<Quarter>("9").unwrap(), Quarter::LAST);
    }

    #[test]
    fn score_never_goes_negative() {
        let mut game = Game::new();

        assert!(game.update_score("1", 2));
        assert!(game.update_score("1", -5));
        assert_eq!(game.teams[0].score, 0);
        assert!(!game.update_score("1", -1));
    }

    #[test]
    fn unknown_team_is_ignored() {
        let mut game = Game::new();
        let before = game.clone();

        assert!(!game.update_score("3", 1));
        assert!(!game.update_team_name("3", "Nobody"));
        assert!(!game.update_team_color("3", "#000000"));
        assert_eq!(game, before);
    }

    #[test]
    fn same_name_or_color_is_no_change() {
        let mut game = Game::new();

        assert!(!game.update_team_name("1", "Player1"));
        assert!(!game.update_team_color("2", "#EF4444"));
        assert!(game.update_team_name("1", "Hawks"));
    }

    #[test]
    fn next_quarter_snapshots_and_zeroes() {
        let mut game = Game::new();
        game.update_score("1", 3);
        game.update_score("2", 1);

        assert!(game.next_quarter());

        assert_eq!(game.current_quarter.number(), 2);
        assert_eq!(scores(&game), [0, 0]);
        let record = history::find(&game.quarter_records, Quarter::FIRST).unwrap();
        assert_eq!(record.score_for("1"), 3);
        assert_eq!(record.color_for("2"), Some("#EF4444"));
    }

    #[test]
    fn previous_quarter_restores_saved_scores() {
        let mut game = Game::new();
        game.update_score("1", 4);
        game.next_quarter();
        game.update_score("2", 2);

        assert!(game.previous_quarter());
        assert_eq!(scores(&game), [4, 0]);

        assert!(game.next_quarter());
        assert_eq!(scores(&game), [0, 2]);
        assert_eq!(game.quarter_records.len(), 2);
    }

    #[test]
    fn boundaries_are_no_ops() {
        let mut game = Game::new();
        game.update_score("1", 1);
        let before = game.clone();

        assert!(!game.previous_quarter());
        assert_eq!(game, before);

        for _ in 1..9 {
            game.next_quarter();
        }
        let at_last = game.clone();
        assert!(!game.next_quarter());
        assert_eq!(game, at_last);
    }

    #[test]
    fn reset_scores_clears_history() {
        let mut game = Game::new();
        game.update_score("1", 1);
        game.next_quarter();
        game.update_score("2", 1);

        assert!(game.reset_scores());
        assert_eq!(scores(&game), [0, 0]);
        assert_eq!(game.current_quarter, Quarter::FIRST);
        assert!(game.quarter_records.is_empty());
    }

    #[test]
    fn reset_current_quarter_keeps_history() {
        let mut game = Game::new();
        game.update_score("1", 1);
        game.next_quarter();
        game.update_score("1", 6);

        assert!(game.reset_current_quarter());
        assert_eq!(scores(&game), [0, 0]);
        assert_eq!(game.current_quarter.number(), 2);
        assert_eq!(game.quarter_records.len(), 1);
    }

    #[test]
    fn resaving_unchanged_quarter_reports_no_change() {
        let mut game = Game::new();
        game.update_score("2", 2);

        assert!(game.save_current_quarter());
        assert!(!game.save_current_quarter());

        game.update_team_color("2", "#000000");
        assert!(game.save_current_quarter());
    }

    #[test]
    fn save_counts_legacy_backfill_as_change() {
        let mut game = Game::new();
        game.save_current_quarter();
        game.quarter_records.push(QuarterRecord {
            quarter: Quarter::LAST,
            team_scores: Default::default(),
            team_colors: None,
        });

        assert!(game.save_current_quarter());
        assert!(game.quarter_records[1].team_colors.is_some());
        assert!(!game.save_current_quarter());
    }

    #[test]
    fn set_timer_stops_running() {
        let mut game = Game::new();
        game.start_timer();

        game.set_timer(90);
        assert_eq!(game.timer_seconds, 90);
        assert!(!game.is_timer_running);

        game.start_timer();
        game.update_timer(30);
        assert!(game.is_timer_running);

        game.reset_timer();
        assert_eq!(game.timer_seconds, DEFAULT_TIMER_SECONDS);
        assert!(!game.is_timer_running);
    }

    #[test]
    fn tick_counts_down_and_finishes() {
        let mut game = Game::new();
        game.set_timer(7);
        assert_eq!(game.tick(), TickOutcome::Idle);

        game.start_timer();
        assert_eq!(game.tick(), TickOutcome::Continue { remaining: 6 });
        assert_eq!(game.tick(), TickOutcome::Countdown { remaining: 5 });
        for remaining in (1..5).rev() {
            assert_eq!(game.tick(), TickOutcome::Countdown { remaining });
        }
        assert_eq!(game.tick(), TickOutcome::Finished);
        assert!(!game.is_timer_running);
        assert_eq!(game.timer_seconds, 0);
    }

    #[test]
    fn tick_at_zero_stops_without_alarm() {
        let mut game = Game::new();
        game.set_timer(0);
        game.start_timer();

        assert_eq!(game.tick(), TickOutcome::Expired);
        assert!(!game.is_timer_running);
    }
}
