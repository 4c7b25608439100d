//! Error types for the datepicker crate.

use chrono::NaiveDate;

/// Problems detected while normalizing a [`crate::PickerOptions`].
///
/// Reported once at creation; nothing here crashes an embedding
/// application, the offending `create` call simply fails.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `custom_days` did not contain one entry per weekday.
    #[error("custom_days needs 7 entries, found {found}")]
    WrongDayCount {
        /// The number of entries that were provided.
        found: usize,
    },

    /// A month-name table did not contain one entry per month.
    #[error("{table} needs 12 entries, found {found}")]
    WrongMonthCount {
        /// Which table was malformed (`custom_months` or
        /// `custom_overlay_months`).
        table: &'static str,
        /// The number of entries that were provided.
        found: usize,
    },

    /// `start_day` was outside `0..=6`.
    #[error("invalid start day: {start_day} (must be 0..=6, 0 is Sunday)")]
    InvalidStartDay {
        /// The invalid value that was provided.
        start_day: u8,
    },

    /// The initial selection also appears in `disabled_dates`.
    #[error("selected_date {date} is also listed in disabled_dates")]
    SelectedDateDisabled {
        /// The conflicting date.
        date: NaiveDate,
    },

    /// `min_date` was after `max_date`.
    #[error("invalid bounds: min {min} is after max {max}")]
    InvertedBounds {
        /// The provided minimum.
        min: NaiveDate,
        /// The provided maximum.
        max: NaiveDate,
    },
}

/// Failures that abort a single [`crate::Registry::create`] call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateError {
    /// The selector did not resolve to a registered anchor.
    #[error("no anchor registered under selector {selector:?}")]
    AnchorNotFound {
        /// The name that failed to resolve.
        selector: String,
    },

    /// The options failed normalization.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
