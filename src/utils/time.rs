use chrono::NaiveDate;

/// Parse time string in HH:MM format
pub fn parse_time(time_str: &str) -> Option<(u32, u32)> {
    let parts: Vec<&str> = time_str.split(':').collect();
    if parts.len() != 2 || parts[0].len() != 2 || parts[1].len() != 2 {
        return None;
    }
    let hour = parts[0].parse::<u32>().ok()?;
    let minute = parts[1].parse::<u32>().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some((hour, minute))
}

/// Parse an ISO calendar date (YYYY-MM-DD)
pub fn parse_date(date_str: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()
}

/// Check that `end` is strictly after `start`, both in HH:MM format
pub fn is_ordered(start: &str, end: &str) -> bool {
    match (parse_time(start), parse_time(end)) {
        (Some(start), Some(end)) => end > start,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_time() {
        // Valid cases
        assert_eq!(parse_time("00:00"), Some((0, 0)));
        assert_eq!(parse_time("10:00"), Some((10, 0)));
        assert_eq!(parse_time("23:59"), Some((23, 59)));

        // Invalid cases
        assert_eq!(parse_time("24:00"), None); // Hour out of range
        assert_eq!(parse_time("12:60"), None); // Minute out of range
        assert_eq!(parse_time("12:30:45"), None); // Too many parts
        assert_eq!(parse_time("12"), None);
        assert_eq!(parse_time("9:30"), None); // Not zero padded
        assert_eq!(parse_time("ab:30"), None);
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("2024-01-15").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 1, 15));

        assert!(parse_date("2024-02-30").is_none());
        assert!(parse_date("15.01.2024").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn test_is_ordered() {
        assert!(is_ordered("10:00", "11:00"));
        assert!(!is_ordered("11:00", "10:00"));
        assert!(!is_ordered("10:00", "10:00"));
        assert!(!is_ordered("10:00", "late"));
    }
}
