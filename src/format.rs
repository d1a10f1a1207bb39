//! Time labels for track markers and the coverage summary.

/// Format a track length as `M:SS`.
///
/// ```rust
/// use roadie_route::format::format_duration;
///
/// assert_eq!(format_duration(215_000), "3:35");
/// assert_eq!(format_duration(61_000), "1:01");
/// ```
pub fn format_duration(ms: u64) -> String {
    let mut minutes = ms / 60_000;
    // Seconds are rounded, so 59.6 s shows as the next full minute
    let mut seconds = ((ms % 60_000) as f64 / 1000.0).round() as u64;
    if seconds == 60 {
        minutes += 1;
        seconds = 0;
    }
    format!("{minutes}:{seconds:02}")
}

/// Format elapsed playlist time for a marker's "plays at" label.
///
/// Under an hour this is `M:SS`; from an hour on it switches to words, e.g.
/// `"1 hour 14 minutes"` or `"2 hours"`.
///
/// ```rust
/// use roadie_route::format::format_playback_time;
///
/// assert_eq!(format_playback_time(2_730_000), "45:30");
/// assert_eq!(format_playback_time(4_440_000), "1 hour 14 minutes");
/// assert_eq!(format_playback_time(7_200_000), "2 hours");
/// ```
pub fn format_playback_time(ms: u64) -> String {
    let total_minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;

    if total_minutes < 60 {
        return format!("{total_minutes}:{seconds:02}");
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    let hour_text = if hours == 1 { "hour" } else { "hours" };

    match minutes {
        0 => format!("{hours} {hour_text}"),
        1 => format!("{hours} {hour_text} 1 minute"),
        _ => format!("{hours} {hour_text} {minutes} minutes"),
    }
}
