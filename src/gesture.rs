//! Score panel gestures: vertical drags and name submissions

/// Downward drag, in points, beyond which a release takes a point away
pub const SWIPE_DOWN_THRESHOLD: f64 = 30.0;

/// Movement, in points, within which a release counts as a tap
pub const TAP_TOLERANCE: f64 = 10.0;

/// Score change for a drag released `dy` points below its start.
///
/// Swiping up or tapping adds a point, a long enough swipe down removes
/// one. Short downward drags do nothing.
pub fn score_delta_for_drag(dy: f64) -> Option<i32> {
    if dy > SWIPE_DOWN_THRESHOLD {
        Some(-1)
    } else if dy < -TAP_TOLERANCE || dy.abs() <= TAP_TOLERANCE {
        Some(1)
    } else {
        None
    }
}

/// Trimmed team name, or `None` when nothing is left
pub fn normalize_team_name(input: &str) -> Option<String> {
    let name = input.trim();
    (!name.is_empty()).then(|| name.to_string())
}
