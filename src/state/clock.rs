//! Minute/second arithmetic for the timer screen

/// Format seconds as zero-padded `MM:SS`
pub fn format(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Replace the minutes part, keeping the seconds. Minutes clamp to 0..=59.
pub fn with_minutes(current: u32, minutes: i64) -> u32 {
    minutes.clamp(0, 59) as u32 * 60 + current % 60
}

/// Replace the seconds part, keeping the minutes. Seconds clamp to 0..=59.
pub fn with_seconds(current: u32, seconds: i64) -> u32 {
    (current / 60) * 60 + seconds.clamp(0, 59) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format(0), "00:00");
        assert_eq!(format(600), "10:00");
        assert_eq!(format(65), "01:05");
        assert_eq!(format(6000), "100:00");
    }

    #[test]
    fn edits_one_part_at_a_time() {
        assert_eq!(with_minutes(125, 7), 7 * 60 + 5);
        assert_eq!(with_minutes(125, 99), 59 * 60 + 5);
        assert_eq!(with_minutes(125, -3), 5);
        assert_eq!(with_seconds(125, 30), 150);
        assert_eq!(with_seconds(125, 75), 179);
        assert_eq!(with_seconds(125, -1), 120);
    }
}
