//! Date field text.

use core::fmt::Write;

use platform::LocalTime;

use crate::settings::SettingsState;

/// Date field contents, e.g. `"Mo 03/18"`.
pub type DateText = heapless::String<16>;

/// Format the date field for `now`.
///
/// `"<label> <a>/<b>"`, both numbers zero-padded, month first when
/// `month_first` is set.
#[must_use]
pub fn format_date(now: &LocalTime, settings: &SettingsState) -> DateText {
    let (first, second) = if settings.month_first {
        (now.month, now.day)
    } else {
        (now.day, now.month)
    };
    let mut text = DateText::new();
    // Longest output is an 8-byte label plus " 99/99", which fits.
    let _ = write!(
        text,
        "{} {:02}/{:02}",
        settings.day_label(now.weekday),
        first,
        second
    );
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::label_from;
    use platform::Weekday;

    fn march_18() -> LocalTime {
        LocalTime {
            year: 2024,
            month: 3,
            day: 18,
            weekday: Weekday::Monday,
            hour: 9,
            minute: 5,
        }
    }

    #[test]
    fn test_month_first() {
        let text = format_date(&march_18(), &SettingsState::default());
        assert_eq!(text.as_str(), "Mo 03/18");
    }

    #[test]
    fn test_day_first() {
        let settings = SettingsState {
            month_first: false,
            ..SettingsState::default()
        };
        assert_eq!(format_date(&march_18(), &settings).as_str(), "Mo 18/03");
    }

    #[test]
    fn test_custom_label_at_capacity() {
        let mut settings = SettingsState::default();
        settings.day_labels[1] = label_from("Montag!!");
        assert_eq!(format_date(&march_18(), &settings).as_str(), "Montag!! 03/18");
    }
}
