//! Time formatting utilities.

use chrono::Local;
use std::time::Duration;

/// Formats the current local time according to the specified format string.
///
/// The format string follows the same syntax as `chrono::format::strftime`.
///
/// # Arguments
///
/// * `format` - The format string (e.g., "%Y-%m-%d %H:%M:%S")
///
/// # Returns
///
/// Returns the formatted time string.
///
/// # Examples
///
/// ```
/// use cutil::time::local_now;
///
/// let formatted = local_now("%Y-%m-%d %H:%M:%S");
/// println!("Current time: {}", formatted);
/// ```
pub fn local_now(format: &str) -> String {
    Local::now().format(format).to_string()
}

/// Rounds a number of seconds to the given number of decimal places.
///
/// # Examples
///
/// ```
/// use cutil::time::round_secs;
///
/// assert_eq!(round_secs(1.23456, 2), 1.23);
/// assert_eq!(round_secs(0.005, 1), 0.0);
/// ```
pub fn round_secs(secs: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (secs * factor).round() / factor
}

/// Average of `total` over `count` items in seconds, rounded to 2 decimal places.
///
/// Returns `0.0` when `count` is zero.
pub fn average_secs(total: Duration, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }

    round_secs(total.as_secs_f64() / count as f64, 2)
}
