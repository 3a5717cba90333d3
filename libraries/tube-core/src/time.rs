//! Position/duration helpers
//!
//! The external player reports seconds as floats and may hand back `NaN`,
//! negatives or zero before metadata is available.

/// Clamp a reported position or duration to a finite, non-negative value
pub fn sanitize_seconds(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}

/// Render seconds as `MM:SS`
///
/// `NaN`, zero, negative and non-finite inputs render as `00:00`.
/// Minutes are not wrapped into hours.
pub fn format_time(seconds: f64) -> String {
    let seconds = sanitize_seconds(seconds);
    if seconds == 0.0 {
        return "00:00".to_string();
    }

    let total = seconds.floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}
