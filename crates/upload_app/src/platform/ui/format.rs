use chrono::TimeZone;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
const BAR_WIDTH: usize = 20;

/// Human readable size in base-1024 units.
pub fn size_label(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

/// `YYYY-MM-DD HH:mm:ss` for an epoch-millisecond timestamp.
pub fn timestamp_label<Tz>(millis: i64, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match zone.timestamp_millis_opt(millis).single() {
        Some(at) => at.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}

pub fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn utc_timestamp_label(millis: i64) -> String {
        timestamp_label(millis, &Utc)
    }

    #[test]
    fn sizes_scale_by_1024() {
        assert_eq!(size_label(0), "0 B");
        assert_eq!(size_label(1023), "1023 B");
        assert_eq!(size_label(1024), "1.00 KB");
        assert_eq!(size_label(1536), "1.50 KB");
        assert_eq!(size_label(5 * 1024 * 1024), "5.00 MB");
        assert_eq!(size_label(3 * 1024_u64.pow(4)), "3.00 TB");
        assert_eq!(size_label(2048 * 1024_u64.pow(4)), "2048.00 TB");
    }

    #[test]
    fn timestamps_render_in_fixed_layout() {
        assert_eq!(utc_timestamp_label(0), "1970-01-01 00:00:00");
        assert_eq!(utc_timestamp_label(1_700_000_000_000), "2023-11-14 22:13:20");
    }

    #[test]
    fn progress_bar_fills_proportionally() {
        assert_eq!(progress_bar(0), format!("[{}]", "-".repeat(20)));
        assert_eq!(progress_bar(50), format!("[{}{}]", "#".repeat(10), "-".repeat(10)));
        assert_eq!(progress_bar(100), format!("[{}]", "#".repeat(20)));
    }
}
