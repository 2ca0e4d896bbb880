//! Trip length presets offered during the dialogue.

use std::fmt;

/// Enumerated trip-length options, each mapping to a nights range.
///
/// The range is inclusive on both ends and always satisfies
/// `nights_from <= nights_to` by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripLength {
    /// 5-7 nights.
    Short,
    /// 7-10 nights.
    Medium,
    /// 10-14 nights.
    Long,
    /// 14-21 nights.
    VeryLong,
}

impl TripLength {
    /// All options, in menu order.
    pub const ALL: [TripLength; 4] = [
        TripLength::Short,
        TripLength::Medium,
        TripLength::Long,
        TripLength::VeryLong,
    ];

    /// Parses a menu option number ("1".."4").
    pub fn from_option(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(TripLength::Short),
            "2" => Some(TripLength::Medium),
            "3" => Some(TripLength::Long),
            "4" => Some(TripLength::VeryLong),
            _ => None,
        }
    }

    /// Menu option number for this preset.
    pub fn option(&self) -> &'static str {
        match self {
            TripLength::Short => "1",
            TripLength::Medium => "2",
            TripLength::Long => "3",
            TripLength::VeryLong => "4",
        }
    }

    /// Inclusive (nights_from, nights_to) range.
    pub fn nights(&self) -> (u8, u8) {
        match self {
            TripLength::Short => (5, 7),
            TripLength::Medium => (7, 10),
            TripLength::Long => (10, 14),
            TripLength::VeryLong => (14, 21),
        }
    }

    /// User-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            TripLength::Short => "Короткая (5-7 ночей)",
            TripLength::Medium => "Средняя (7-10 ночей)",
            TripLength::Long => "Длинная (10-14 ночей)",
            TripLength::VeryLong => "Очень длинная (14-21 ночь)",
        }
    }
}

impl fmt::Display for TripLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_option_parses_menu_numbers() {
        assert_eq!(TripLength::from_option("1"), Some(TripLength::Short));
        assert_eq!(TripLength::from_option(" 4 "), Some(TripLength::VeryLong));
        assert_eq!(TripLength::from_option("5"), None);
        assert_eq!(TripLength::from_option("короткая"), None);
    }

    #[test]
    fn test_nights_ranges_are_ordered() {
        for preset in TripLength::ALL {
            let (from, to) = preset.nights();
            assert!(from <= to, "{:?} range inverted", preset);
        }
    }

    #[test]
    fn test_option_roundtrip() {
        for preset in TripLength::ALL {
            assert_eq!(TripLength::from_option(preset.option()), Some(preset));
        }
    }
}
