/// Round to one fractional digit, half away from zero on the scaled value.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Parse a provider duration like "PT5H30M" into decimal hours.
///
/// Hours and minutes may each be absent ("PT45M", "PT10H"). Anything that
/// does not carry the "PT" period prefix degrades to 0 instead of failing.
pub fn parse_duration_hours(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else { return 0.0 };
    let Some(rest) = raw.strip_prefix("PT") else { return 0.0 };

    let mut hours: u64 = 0;
    let mut minutes: u64 = 0;
    let mut digits = String::new();

    for ch in rest.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        match ch {
            'H' => hours = digits.parse().unwrap_or(0),
            'M' => minutes = digits.parse().unwrap_or(0),
            _ => {}
        }
        digits.clear();
    }

    round_tenth(hours as f64 + minutes as f64 / 60.0)
}
