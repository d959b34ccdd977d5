//! Turns raw status values into something a person can read.
//!
//! Every formatter is total: input that does not parse is returned unchanged.

const BYTE_UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB", "EB"];

pub const PROGRESS_BAR_WIDTH: usize = 20;
pub const BAR_FILLED: char = '█';
pub const BAR_EMPTY: char = '░';

fn parse_finite(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn format_byte_size(value: &str) -> String {
    let Some(bytes) = parse_finite(value) else {
        return value.to_string();
    };

    let mut size = bytes.trunc();
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < BYTE_UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.2} {}", size, BYTE_UNITS[unit_index])
}

pub fn format_duration(value: &str) -> String {
    let Some(seconds) = parse_finite(value) else {
        return value.to_string();
    };

    // Hours are unbounded; only values no integer type can hold pass through.
    let total = seconds.trunc();
    if total < i128::MIN as f64 || total >= i128::MAX as f64 {
        return value.to_string();
    }

    let total = total as i128;
    let hours = total.div_euclid(3600);
    let remainder = total.rem_euclid(3600);
    let minutes = remainder / 60;
    let seconds = remainder % 60;

    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Accepts ASCII digits with at most one decimal point, e.g. `0.25`, `1`, `.5`.
pub fn parse_fraction(value: &str) -> Option<f64> {
    let mut digits = 0;
    let mut points = 0;

    for c in value.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return None,
        }
    }

    if digits == 0 || points > 1 {
        return None;
    }

    value.parse::<f64>().ok()
}

pub fn format_percent(value: &str) -> String {
    match parse_fraction(value) {
        Some(fraction) => format!("{:.2}%", fraction * 100.0),
        None => value.to_string(),
    }
}

pub fn format_flag(value: &str) -> String {
    let flag = if value == "1" { "Yes" } else { "No" };
    flag.to_string()
}

/// Returns the filled cell count and the bar text for a 0..1 fraction.
pub fn progress_bar(fraction: f64) -> (usize, String) {
    let filled = ((PROGRESS_BAR_WIDTH as f64 * fraction).floor().max(0.0) as usize)
        .min(PROGRESS_BAR_WIDTH);

    let mut bar = String::with_capacity(PROGRESS_BAR_WIDTH * BAR_FILLED.len_utf8());
    bar.extend(std::iter::repeat(BAR_FILLED).take(filled));
    bar.extend(std::iter::repeat(BAR_EMPTY).take(PROGRESS_BAR_WIDTH - filled));

    (filled, bar)
}
