use chrono::{DateTime, Utc};

#[must_use]
pub fn format_datetime(value: DateTime<Utc>) -> String {
    value.format("%d %b %Y, %H:%M UTC").to_string()
}

#[cfg(test)]
mod tests {
    use mathgen_core::time::fixed_now;

    use super::*;

    #[test]
    fn formats_day_month_and_minutes() {
        assert_eq!(format_datetime(fixed_now()), "14 Nov 2023, 22:13 UTC");
    }
}
