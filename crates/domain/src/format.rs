//! Human-readable formatting helpers
//!
//! Pure functions the UI calls on the normalized model. All amounts are
//! formatted for the app's market (Vietnam): dot thousands separators and
//! the đồng suffix.

/// Format a distance in meters.
///
/// Below one kilometer renders as rounded meters ("999m"); from one
/// kilometer on as kilometers with one decimal ("1.5km").
#[must_use]
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{}m", meters.round())
    } else {
        format!("{:.1}km", meters / 1000.0)
    }
}

/// Format a duration in seconds as whole hours and minutes.
///
/// Sub-minute durations render as "0m"; with a whole hour present the form
/// is "Hh Mm".
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    let hours = (seconds / 3600.0).floor();
    let minutes = ((seconds % 3600.0) / 60.0).floor();
    if hours > 0.0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Format a cost in đồng.
///
/// Zero renders as "free"; anything else as the integer with dot thousands
/// separators and the currency suffix.
#[must_use]
pub fn format_cost(cost: u64) -> String {
    if cost == 0 {
        return "free".to_string();
    }

    let digits = cost.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    format!("{grouped}đ")
}
