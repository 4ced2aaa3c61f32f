//! Wall-clock abstraction

/// Day of the week, Sunday first (host `tm_wday` order).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Weekday {
    /// Sunday
    Sunday,
    /// Monday
    Monday,
    /// Tuesday
    Tuesday,
    /// Wednesday
    Wednesday,
    /// Thursday
    Thursday,
    /// Friday
    Friday,
    /// Saturday
    Saturday,
}

impl Weekday {
    /// All days in Sunday-first order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Zero-based index with Sunday = 0.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Day for a zero-based Sunday-first index, wrapping modulo 7.
    pub fn from_index(index: usize) -> Self {
        match index % 7 {
            0 => Weekday::Sunday,
            1 => Weekday::Monday,
            2 => Weekday::Tuesday,
            3 => Weekday::Wednesday,
            4 => Weekday::Thursday,
            5 => Weekday::Friday,
            _ => Weekday::Saturday,
        }
    }
}

/// Broken-down local time as delivered by the host tick service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LocalTime {
    /// Calendar year
    pub year: u16,
    /// Month, 1–12
    pub month: u8,
    /// Day of month, 1–31
    pub day: u8,
    /// Day of the week
    pub weekday: Weekday,
    /// Hour, 0–23
    pub hour: u8,
    /// Minute, 0–59
    pub minute: u8,
}

impl LocalTime {
    /// Calendar date part, used to detect day changes.
    pub const fn date(&self) -> (u16, u8, u8) {
        (self.year, self.month, self.day)
    }
}

/// Host clock
pub trait Clock {
    /// Current local time.
    fn now(&self) -> LocalTime;

    /// `true` when the user has chosen the 24-hour convention.
    fn is_24h_style(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::Weekday;

    #[test]
    fn weekday_index_round_trips() {
        for day in Weekday::ALL {
            assert_eq!(Weekday::from_index(day.index()), day);
        }
    }

    #[test]
    fn weekday_from_index_wraps() {
        assert_eq!(Weekday::from_index(7), Weekday::Sunday);
        assert_eq!(Weekday::from_index(13), Weekday::Saturday);
    }
}
