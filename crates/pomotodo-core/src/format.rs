//! Countdown display.

/// Render seconds as `MM:SS`.
///
/// Minutes are not wrapped into hours, so an hour reads `60:00`. Negative
/// input renders as `00:00`.
pub fn format_time(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(60), "01:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(125), "02:05");
    }

    #[test]
    fn minutes_do_not_roll_over() {
        assert_eq!(format_time(3600), "60:00");
        assert_eq!(format_time(6000 * 60 + 7), "6000:07");
    }

    #[test]
    fn negative_clamps_to_zero() {
        assert_eq!(format_time(-3), "00:00");
    }

    proptest! {
        #[test]
        fn parses_back_to_input(secs in 0i64..1_000_000) {
            let text = format_time(secs);
            let (m, s) = text.split_once(':').unwrap();
            prop_assert!(m.len() >= 2);
            prop_assert_eq!(s.len(), 2);
            let m: i64 = m.parse().unwrap();
            let s: i64 = s.parse().unwrap();
            prop_assert!(s < 60);
            prop_assert_eq!(m * 60 + s, secs);
        }
    }
}
