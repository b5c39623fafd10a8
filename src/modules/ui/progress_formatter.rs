use crate::core::models::{Phase, TickSnapshot};
use std::time::Duration;

/// Formats a countdown as MM:SS, or HH:MM:SS past the hour
pub fn format_clock(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Formats a duration in a compact form (e.g., "3:45" instead of "03:45")
pub fn format_duration_compact(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Short tag shown next to the clock
pub fn phase_tag(phase: Phase) -> &'static str {
    match phase {
        Phase::Exercise => "WORK",
        Phase::RestBetweenExercises => "REST",
        Phase::RestBetweenSets => "SET REST",
        Phase::Complete => "DONE",
        Phase::Idle => "IDLE",
    }
}

/// "Set 2 of 3"
pub fn set_caption(snapshot: &TickSnapshot) -> String {
    format!("Set {} of {}", snapshot.set_index, snapshot.sets)
}

/// "Next: Squats", or empty on the last interval
pub fn next_caption(snapshot: &TickSnapshot) -> String {
    if snapshot.next_label.is_empty() {
        String::new()
    } else {
        format!("Next: {}", snapshot.next_label)
    }
}

/// Fixed-width text bar, e.g. `[#####-----]` at 50%
pub fn text_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Represents formatted progress information ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedProgress {
    pub clock_text: String,
    pub total_text: String,
    pub combined_label: String,
    pub percentage: u8,
}

impl FormattedProgress {
    pub fn from_snapshot(snapshot: &TickSnapshot) -> Self {
        let clock_text = format_clock(snapshot.remaining_seconds);
        let total_text = format_clock(snapshot.total_seconds);
        let percentage = snapshot.percent_elapsed.clamp(0.0, 100.0).floor() as u8;

        Self {
            combined_label: format!("{} / {}", clock_text, total_text),
            clock_text,
            total_text,
            percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(remaining: u64, total: u64, percent: f64, next: &str) -> TickSnapshot {
        TickSnapshot {
            phase: Phase::Exercise,
            label: "Push-ups".to_string(),
            next_label: next.to_string(),
            remaining_seconds: remaining,
            total_seconds: total,
            percent_elapsed: percent,
            set_index: 1,
            sets: 3,
            paused: false,
        }
    }

    #[test]
    fn clock_is_zero_padded() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(3_725), "01:02:05");
    }

    #[test]
    fn compact_duration_drops_leading_zero() {
        assert_eq!(format_duration_compact(Duration::from_secs(135)), "2:15");
        assert_eq!(format_duration_compact(Duration::from_secs(3_600)), "1:00:00");
    }

    #[test]
    fn text_bar_fills_proportionally() {
        assert_eq!(text_bar(0.0, 4), "[----]");
        assert_eq!(text_bar(50.0, 4), "[##--]");
        assert_eq!(text_bar(100.0, 4), "[####]");
        assert_eq!(text_bar(250.0, 4), "[####]");
    }

    #[test]
    fn captions() {
        let s = snapshot(12, 30, 60.0, "Squats");
        assert_eq!(set_caption(&s), "Set 1 of 3");
        assert_eq!(next_caption(&s), "Next: Squats");
        assert_eq!(next_caption(&snapshot(12, 30, 60.0, "")), "");
    }

    #[test]
    fn formatted_progress_from_snapshot() {
        let p = FormattedProgress::from_snapshot(&snapshot(18, 30, 40.0, ""));
        assert_eq!(p.combined_label, "00:18 / 00:30");
        assert_eq!(p.percentage, 40);
    }
}
