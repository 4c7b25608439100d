use crate::prelude::*;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// A calendar day collapsed to a single comparable integer.
///
/// Keys are days counted from the Common Era, so two date values that fall
/// on the same calendar day always produce the same key no matter what
/// time-of-day component they carry. Used for set membership (disabled
/// dates, events) and day-equality tests.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize,
)]
#[display(fmt = "{_0}")]
#[serde(transparent)]
pub struct DayKey(i32);

impl DayKey {
    /// Normalizes any date-like value to its day key.
    pub fn of(date: &impl Datelike) -> Self {
        Self(date.num_days_from_ce())
    }

    /// Returns the raw day count.
    #[inline]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Converts the key back to a date.
    ///
    /// Returns `None` only for keys outside chrono's representable range,
    /// which cannot happen for keys produced by [`DayKey::of`].
    pub fn date(self) -> Option<NaiveDate> {
        NaiveDate::from_num_days_from_ce_opt(self.0)
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self::of(&date)
    }
}

/// The surface a shown picker presents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// The month grid.
    #[default]
    #[display(fmt = "calendar")]
    Calendar,
    /// The year-entry overlay.
    #[display(fmt = "overlay")]
    Overlay,
}

/// Where the renderer places the calendar relative to its anchor.
///
/// `Centered` asks for fixed positioning in the middle of the screen, which
/// tends to suit small viewports. The display form is the two-letter code
/// used by configuration (`tr`, `tl`, `br`, `bl`, `c`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum Position {
    /// Above the anchor, right-aligned.
    #[display(fmt = "tr")]
    #[serde(rename = "tr")]
    TopRight,
    /// Above the anchor, left-aligned.
    #[display(fmt = "tl")]
    #[serde(rename = "tl")]
    TopLeft,
    /// Below the anchor, right-aligned.
    #[display(fmt = "br")]
    #[serde(rename = "br")]
    BottomRight,
    /// Below the anchor, left-aligned.
    #[display(fmt = "bl")]
    #[serde(rename = "bl")]
    BottomLeft,
    /// Fixed in the middle of the screen.
    #[display(fmt = "c")]
    #[serde(rename = "c")]
    Centered,
}

impl Position {
    /// Parses a position code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "tr" => Some(Self::TopRight),
            "tl" => Some(Self::TopLeft),
            "br" => Some(Self::BottomRight),
            "bl" => Some(Self::BottomLeft),
            "c" => Some(Self::Centered),
            _ => None,
        }
    }
}

/// True for Saturday and Sunday.
pub(crate) fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Clamps a date to the first of its month, the canonical form of a
/// picker's current date.
pub(crate) fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_key_ignores_time_of_day() {
        let day = date(2024, 2, 15);
        let morning = day.and_time(NaiveTime::from_hms_opt(0, 0, 1).unwrap());
        let night = day.and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap());
        assert_eq!(DayKey::of(&morning), DayKey::of(&night));
        assert_eq!(DayKey::of(&morning), DayKey::from(day));
    }

    #[test]
    fn day_key_distinguishes_adjacent_days() {
        let a = DayKey::from(date(2024, 2, 15));
        let b = DayKey::from(date(2024, 2, 16));
        assert_ne!(a, b);
        assert!(a < b);
        assert_eq!(b.get() - a.get(), 1);
    }

    #[test]
    fn day_key_round_trips() {
        let day = date(1999, 12, 31);
        assert_eq!(DayKey::from(day).date(), Some(day));
    }

    #[test]
    fn day_key_serde_is_plain_integer() {
        let key = DayKey::from(date(2024, 2, 15));
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, key.get().to_string());
        let parsed: DayKey = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn view_serde_codes() {
        assert_eq!(serde_json::to_string(&View::Calendar).unwrap(), r#""calendar""#);
        assert_eq!(serde_json::to_string(&View::Overlay).unwrap(), r#""overlay""#);
    }

    #[test]
    fn position_codes_round_trip() {
        for position in [
            Position::TopRight,
            Position::TopLeft,
            Position::BottomRight,
            Position::BottomLeft,
            Position::Centered,
        ] {
            assert_eq!(Position::from_code(&position.to_string()), Some(position));
        }
        assert_eq!(Position::from_code("center"), None);
    }

    #[test]
    fn weekend_days() {
        assert!(is_weekend(Weekday::Sat));
        assert!(is_weekend(Weekday::Sun));
        assert!(!is_weekend(Weekday::Mon));
        assert!(!is_weekend(Weekday::Fri));
    }

    #[test]
    fn first_of_month_clamps_day() {
        assert_eq!(first_of_month(date(2024, 2, 15)), date(2024, 2, 1));
        assert_eq!(first_of_month(date(2024, 2, 1)), date(2024, 2, 1));
    }
}
