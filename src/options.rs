//! Configuration surface and the normalizer that turns it into instance
//! state.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use derive_setters::Setters;
use tracing::warn;

use crate::anchor::Anchor;
use crate::consts::{
    DEFAULT_DAYS, DEFAULT_MONTHS, DEFAULT_OVERLAY_BUTTON, DEFAULT_OVERLAY_PLACEHOLDER,
    DAYS_PER_WEEK, MAX_START_DAY, MONTHS_PER_YEAR, OVERLAY_MONTH_PREFIX,
};
use crate::error::ConfigError;
use crate::picker::{Bound, MonthChange, PickerState, SelectionChange};
use crate::types::{DayKey, Position, View, first_of_month, is_weekend};

/// Decides whether an arbitrary date should be unselectable, on top of the
/// built-in disabling rules.
pub type Disabler = Arc<dyn Fn(NaiveDate) -> bool + Send + Sync>;

/// Formats a selected date before it is written to the anchor element.
pub type Formatter = Arc<dyn Fn(NaiveDate) -> String + Send + Sync>;

/// Runs after the selection changed.
pub type OnSelect = Arc<dyn Fn(&SelectionChange) + Send + Sync>;

/// Runs after the displayed month changed.
pub type OnMonthChange = Arc<dyn Fn(&MonthChange) + Send + Sync>;

/// Runs after the calendar was shown or hidden.
pub type OnVisibility = Arc<dyn Fn() + Send + Sync>;

/// Configuration for one picker instance.
///
/// Every field has a working default; construct with [`PickerOptions::new`]
/// and chain the setters you need. Callback fields use the builder methods
/// below since closures do not fit the setter derive.
#[derive(Clone, Setters)]
pub struct PickerOptions {
    /// Day of the week the calendar starts on, 0 = Sunday through
    /// 6 = Saturday.
    pub start_day: u8,
    /// Display names for the days of the week, 7 entries starting at
    /// Sunday.
    #[setters(strip_option)]
    pub custom_days: Option<Vec<String>>,
    /// Display names for the months, 12 entries starting at January.
    #[setters(strip_option)]
    pub custom_months: Option<Vec<String>>,
    /// Month names for the overlay view, 12 entries. Defaults to the first
    /// three characters of the month names.
    #[setters(strip_option)]
    pub custom_overlay_months: Option<Vec<String>>,
    /// Surface presented when the calendar is shown.
    pub default_view: View,
    /// Label of the overlay submit button.
    #[setters(into)]
    pub overlay_button: String,
    /// Placeholder of the overlay year entry.
    #[setters(into)]
    pub overlay_placeholder: String,
    /// Days that carry an event marker.
    pub events: Vec<NaiveDate>,
    /// Keeps the calendar permanently on screen.
    pub always_show: bool,
    /// Starts with this date already selected.
    #[setters(strip_option)]
    pub selected_date: Option<NaiveDate>,
    /// Latest selectable date.
    #[setters(strip_option)]
    pub max_date: Option<NaiveDate>,
    /// Earliest selectable date.
    #[setters(strip_option)]
    pub min_date: Option<NaiveDate>,
    /// Month the calendar opens on. Defaults to the selected date's month,
    /// or today's.
    #[setters(strip_option)]
    pub start_date: Option<NaiveDate>,
    /// Also numbers the leading and trailing days of adjacent months.
    pub show_all_dates: bool,
    /// Refuses selection while the anchor is disabled or read-only.
    pub respect_disabled_read_only: bool,
    /// Disables Saturdays and Sundays.
    pub no_weekends: bool,
    /// Dates that cannot be selected.
    pub disabled_dates: Vec<NaiveDate>,
    /// Hands the picker over to a native control in mobile environments.
    pub disable_mobile: bool,
    /// Removes the year-entry overlay.
    pub disable_year_overlay: bool,
    /// Placement of the calendar relative to its anchor.
    #[setters(strip_option)]
    pub position: Option<Position>,
    /// Links two instances created with the same id into a range pair.
    #[setters(strip_option, into)]
    pub pair_id: Option<String>,
    /// Custom disable predicate; see [`PickerOptions::disabler`].
    #[setters(skip)]
    pub disabler: Option<Disabler>,
    /// Anchor value formatter; see [`PickerOptions::formatter`].
    #[setters(skip)]
    pub formatter: Option<Formatter>,
    /// Selection callback; see [`PickerOptions::on_select`].
    #[setters(skip)]
    pub on_select: Option<OnSelect>,
    /// Show callback; see [`PickerOptions::on_show`].
    #[setters(skip)]
    pub on_show: Option<OnVisibility>,
    /// Hide callback; see [`PickerOptions::on_hide`].
    #[setters(skip)]
    pub on_hide: Option<OnVisibility>,
    /// Month-change callback; see [`PickerOptions::on_month_change`].
    #[setters(skip)]
    pub on_month_change: Option<OnMonthChange>,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            start_day: 0,
            custom_days: None,
            custom_months: None,
            custom_overlay_months: None,
            default_view: View::Calendar,
            overlay_button: DEFAULT_OVERLAY_BUTTON.to_owned(),
            overlay_placeholder: DEFAULT_OVERLAY_PLACEHOLDER.to_owned(),
            events: Vec::new(),
            always_show: false,
            selected_date: None,
            max_date: None,
            min_date: None,
            start_date: None,
            show_all_dates: false,
            respect_disabled_read_only: false,
            no_weekends: false,
            disabled_dates: Vec::new(),
            disable_mobile: false,
            disable_year_overlay: false,
            position: None,
            pair_id: None,
            disabler: None,
            formatter: None,
            on_select: None,
            on_show: None,
            on_hide: None,
            on_month_change: None,
        }
    }
}

impl PickerOptions {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the custom disable predicate.
    pub fn disabler<F>(mut self, f: F) -> Self
    where
        F: Fn(NaiveDate) -> bool + Send + Sync + 'static,
    {
        self.disabler = Some(Arc::new(f));
        self
    }

    /// Sets the formatter used when writing selections to the anchor.
    pub fn formatter<F>(mut self, f: F) -> Self
    where
        F: Fn(NaiveDate) -> String + Send + Sync + 'static,
    {
        self.formatter = Some(Arc::new(f));
        self
    }

    /// Sets the selection callback.
    pub fn on_select<F>(mut self, f: F) -> Self
    where
        F: Fn(&SelectionChange) + Send + Sync + 'static,
    {
        self.on_select = Some(Arc::new(f));
        self
    }

    /// Sets the show callback.
    pub fn on_show<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_show = Some(Arc::new(f));
        self
    }

    /// Sets the hide callback.
    pub fn on_hide<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_hide = Some(Arc::new(f));
        self
    }

    /// Sets the month-change callback.
    pub fn on_month_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&MonthChange) + Send + Sync + 'static,
    {
        self.on_month_change = Some(Arc::new(f));
        self
    }

    /// Validates the configuration and produces the instance state seed.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for malformed name tables, an out-of-range
    /// `start_day`, inverted bounds, or an initial selection that is also
    /// disabled.
    pub(crate) fn normalize(
        self,
        anchor: Arc<dyn Anchor>,
        today: NaiveDate,
    ) -> Result<PickerState, ConfigError> {
        if self.start_day > MAX_START_DAY {
            return Err(ConfigError::InvalidStartDay {
                start_day: self.start_day,
            });
        }

        let days: [String; DAYS_PER_WEEK] = match self.custom_days {
            Some(days) => days
                .try_into()
                .map_err(|v: Vec<String>| ConfigError::WrongDayCount { found: v.len() })?,
            None => DEFAULT_DAYS.map(ToOwned::to_owned),
        };

        let months: [String; MONTHS_PER_YEAR] = match self.custom_months {
            Some(months) => {
                months
                    .try_into()
                    .map_err(|v: Vec<String>| ConfigError::WrongMonthCount {
                        table: "custom_months",
                        found: v.len(),
                    })?
            }
            None => DEFAULT_MONTHS.map(ToOwned::to_owned),
        };

        let overlay_months: [String; MONTHS_PER_YEAR] = match self.custom_overlay_months {
            Some(overlay) => {
                overlay
                    .try_into()
                    .map_err(|v: Vec<String>| ConfigError::WrongMonthCount {
                        table: "custom_overlay_months",
                        found: v.len(),
                    })?
            }
            None => std::array::from_fn(|i| {
                months[i].chars().take(OVERLAY_MONTH_PREFIX).collect()
            }),
        };

        if let (Some(min), Some(max)) = (self.min_date, self.max_date) {
            if min > max {
                return Err(ConfigError::InvertedBounds { min, max });
            }
        }

        let disabled_dates: HashSet<DayKey> =
            self.disabled_dates.iter().map(DayKey::of).collect();
        let events: HashSet<DayKey> = self.events.iter().map(DayKey::of).collect();

        let selected = match self.selected_date {
            Some(date) if disabled_dates.contains(&DayKey::from(date)) => {
                return Err(ConfigError::SelectedDateDisabled { date });
            }
            Some(date) if self.no_weekends && is_weekend(date.weekday()) => {
                warn!(%date, "dropping initial selection, weekends are disabled");
                None
            }
            Some(date)
                if self.min_date.is_some_and(|min| date < min)
                    || self.max_date.is_some_and(|max| date > max) =>
            {
                warn!(%date, "dropping initial selection outside the min/max bounds");
                None
            }
            other => other,
        };

        let default_view = if self.default_view == View::Overlay && self.disable_year_overlay {
            warn!("default_view is the overlay but the overlay is disabled, using the calendar");
            View::Calendar
        } else {
            self.default_view
        };

        let current_date = first_of_month(self.start_date.or(selected).unwrap_or(today));

        Ok(PickerState {
            anchor,
            current_date,
            selected,
            min: self.min_date.map_or(Bound::Unset, Bound::Explicit),
            max: self.max_date.map_or(Bound::Unset, Bound::Explicit),
            disabled_dates,
            events,
            start_day: self.start_day,
            days,
            months,
            overlay_months,
            overlay_button: self.overlay_button,
            overlay_placeholder: self.overlay_placeholder,
            default_view,
            view: default_view,
            visible: self.always_show,
            always_show: self.always_show,
            show_all_dates: self.show_all_dates,
            no_weekends: self.no_weekends,
            respect_disabled_read_only: self.respect_disabled_read_only,
            disable_overlay: self.disable_year_overlay,
            disable_mobile: self.disable_mobile,
            position: self.position,
            disabler: self.disabler,
            formatter: self.formatter,
            on_select: self.on_select,
            on_show: self.on_show,
            on_hide: self.on_hide,
            on_month_change: self.on_month_change,
            pair: None,
        })
    }
}
