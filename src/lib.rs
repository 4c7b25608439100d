//! Headless date-picker / date-range-picker state engine.
//!
//! This crate owns everything a calendar widget does except the painting:
//! option normalization, per-instance state, the navigate / select /
//! bounds / visibility transitions, sibling linkage for range pairs, and a
//! registry with explicit lifecycle for the shared document-click route.
//! A UI layer consumes [`CalendarView`] snapshots and wires its events
//! back into the transition methods on [`Picker`]; it never mutates state
//! directly.
//!
//! Recoverable misuse (selecting a disabled date, inverting the min/max
//! window, toggling the overlay while hidden) is reported through
//! `tracing` and ignored, so the embedding UI stays interactive.
//! Configuration problems surface once, as a [`CreateError`] from
//! [`Registry::create`].
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use datepicker::{PickerOptions, PlainAnchor, Registry, SelectDateRequest, Selector};
//!
//! let registry = Registry::new();
//! let picker = registry
//!     .create(
//!         Selector::handle(PlainAnchor::new()),
//!         PickerOptions::new()
//!             .start_date(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap())
//!             .min_date(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap())
//!             .max_date(NaiveDate::from_ymd_opt(2024, 2, 20).unwrap()),
//!     )
//!     .unwrap();
//!
//! picker.select_date(SelectDateRequest::of(
//!     NaiveDate::from_ymd_opt(2024, 2, 12).unwrap(),
//! ));
//! assert_eq!(picker.selected_date(), NaiveDate::from_ymd_opt(2024, 2, 12));
//!
//! // A date outside the window is reported and ignored.
//! picker.select_date(SelectDateRequest::of(
//!     NaiveDate::from_ymd_opt(2024, 2, 25).unwrap(),
//! ));
//! assert_eq!(picker.selected_date(), NaiveDate::from_ymd_opt(2024, 2, 12));
//! ```
//!
//! Two instances created with the same `pair_id` form a range pair: the
//! first is the start, the second the end, and bounds derived from one
//! member's selections and limits keep the other member's calendar inside
//! the shared window.

mod anchor;
mod consts;
mod error;
mod options;
mod pair;
mod picker;
mod prelude;
mod registry;
mod types;
mod view;

pub use anchor::{Anchor, PlainAnchor, Selector};
pub use consts::{
    DAYS_PER_WEEK, DEFAULT_DAYS, DEFAULT_MONTHS, DEFAULT_OVERLAY_BUTTON,
    DEFAULT_OVERLAY_PLACEHOLDER, GRID_CELLS, MAX_START_DAY, MONTHS_PER_YEAR,
    OVERLAY_MONTH_PREFIX, WEEKS_PER_GRID,
};
pub use error::{ConfigError, CreateError};
pub use options::{
    Disabler, Formatter, OnMonthChange, OnSelect, OnVisibility, PickerOptions,
};
pub use pair::SelectedRange;
pub use picker::{MonthChange, NavigateRequest, SelectDateRequest, SelectionChange};
pub use registry::{Picker, Registry};
pub use types::{DayKey, Position, View};
pub use view::{CalendarView, DayCell, OverlayView};
