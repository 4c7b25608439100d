//! Immutable render snapshots consumed by a UI layer.
//!
//! A [`CalendarView`] is everything a renderer needs to paint one picker:
//! the month grid with per-day flags, the rotated weekday labels, and the
//! overlay surface. Building a view never mutates instance state; all
//! mutation goes through the transition methods on [`crate::Picker`].

use chrono::{Datelike, Days, NaiveDate};

use crate::consts::{DAYS_PER_WEEK, GRID_CELLS, MONTHS_PER_YEAR};
use crate::picker::PickerState;
use crate::types::{Position, View, is_weekend};

/// One day square of the month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    /// The calendar day this square stands for.
    pub date: NaiveDate,
    /// False for leading and trailing days of adjacent months.
    pub in_current_month: bool,
    /// True when this day is the selection.
    pub selected: bool,
    /// True when this day cannot be selected.
    pub disabled: bool,
    /// True when this day carries an event marker.
    pub event: bool,
    /// True for Saturdays and Sundays.
    pub weekend: bool,
    /// True when this day is today.
    pub today: bool,
}

/// The year-entry overlay surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayView {
    /// Short month names shown in the overlay.
    pub months: [String; MONTHS_PER_YEAR],
    /// Placeholder of the year entry.
    pub placeholder: String,
    /// Label of the submit button.
    pub button_text: String,
    /// False when the overlay was disabled in the options.
    pub enabled: bool,
}

/// Snapshot of one picker instance for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarView {
    /// Displayed year.
    pub year: i32,
    /// Displayed month, 1 through 12.
    pub month: u32,
    /// Display name of the month.
    pub month_name: String,
    /// Weekday header labels, rotated to the configured start day.
    pub weekday_labels: [String; DAYS_PER_WEEK],
    /// Six weeks of day squares, row by row. `None` squares stay empty
    /// unless `show_all_dates` filled them.
    pub cells: Vec<Option<DayCell>>,
    /// Which surface is active.
    pub view: View,
    /// Whether the calendar is on screen at all.
    pub visible: bool,
    /// Requested placement relative to the anchor.
    pub position: Option<Position>,
    /// The overlay surface.
    pub overlay: OverlayView,
}

/// Builds the render snapshot for a state at a given `today`.
pub(crate) fn build(state: &PickerState, today: NaiveDate) -> CalendarView {
    let current = state.current_date;
    let offset = (i64::from(current.weekday().num_days_from_sunday())
        - i64::from(state.start_day))
    .rem_euclid(7)
    .unsigned_abs();
    let grid_start = current.checked_sub_days(Days::new(offset)).unwrap_or(current);

    let mut cells = Vec::with_capacity(GRID_CELLS);
    for index in 0..GRID_CELLS {
        let Some(date) = grid_start.checked_add_days(Days::new(index as u64)) else {
            cells.push(None);
            continue;
        };
        let in_current_month =
            date.year() == current.year() && date.month() == current.month();
        if !in_current_month && !state.show_all_dates {
            cells.push(None);
            continue;
        }
        cells.push(Some(DayCell {
            date,
            in_current_month,
            selected: state.selected == Some(date),
            disabled: state.is_disabled(date),
            event: state.has_event(date),
            weekend: is_weekend(date.weekday()),
            today: date == today,
        }));
    }

    let weekday_labels: [String; DAYS_PER_WEEK] = std::array::from_fn(|index| {
        state.days[(usize::from(state.start_day) + index) % DAYS_PER_WEEK].clone()
    });

    CalendarView {
        year: current.year(),
        month: current.month(),
        month_name: state.months[current.month0() as usize].clone(),
        weekday_labels,
        cells,
        view: state.view,
        visible: state.visible,
        position: state.position,
        overlay: OverlayView {
            months: state.overlay_months.clone(),
            placeholder: state.overlay_placeholder.clone(),
            button_text: state.overlay_button.clone(),
            enabled: !state.disable_overlay,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::PlainAnchor;
    use crate::options::PickerOptions;
    use std::sync::Arc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 2, 15)
    }

    fn view_of(options: PickerOptions) -> CalendarView {
        let state = options
            .normalize(Arc::new(PlainAnchor::new()), today())
            .unwrap();
        build(&state, today())
    }

    #[test]
    fn february_2024_grid_shape() {
        // 2024-02-01 is a Thursday, four squares into a Sunday-first week.
        let view = view_of(PickerOptions::new().start_date(date(2024, 2, 15)));
        assert_eq!(view.year, 2024);
        assert_eq!(view.month, 2);
        assert_eq!(view.month_name, "February");
        assert_eq!(view.cells.len(), GRID_CELLS);

        assert!(view.cells[3].is_none());
        let first = view.cells[4].as_ref().unwrap();
        assert_eq!(first.date, date(2024, 2, 1));
        let last = view.cells[4 + 28].as_ref().unwrap();
        assert_eq!(last.date, date(2024, 2, 29));
        assert!(view.cells[4 + 29].is_none());
    }

    #[test]
    fn start_day_rotates_grid_and_labels() {
        let view = view_of(
            PickerOptions::new()
                .start_date(date(2024, 2, 15))
                .start_day(1),
        );
        assert_eq!(view.weekday_labels[0], "Mon");
        assert_eq!(view.weekday_labels[6], "Sun");
        // Monday-first, so February 1st sits three squares in.
        let first = view.cells[3].as_ref().unwrap();
        assert_eq!(first.date, date(2024, 2, 1));
    }

    #[test]
    fn show_all_dates_fills_adjacent_months() {
        let view = view_of(
            PickerOptions::new()
                .start_date(date(2024, 2, 15))
                .show_all_dates(true),
        );
        let leading = view.cells[0].as_ref().unwrap();
        assert_eq!(leading.date, date(2024, 1, 28));
        assert!(!leading.in_current_month);
        let trailing = view.cells[GRID_CELLS - 1].as_ref().unwrap();
        assert_eq!(trailing.date, date(2024, 3, 9));
        assert!(!trailing.in_current_month);
    }

    #[test]
    fn cells_carry_day_flags() {
        let view = view_of(
            PickerOptions::new()
                .start_date(date(2024, 2, 15))
                .selected_date(date(2024, 2, 14))
                .events(vec![date(2024, 2, 14)])
                .disabled_dates(vec![date(2024, 2, 16)]),
        );
        let cell = |day: u32| {
            view.cells[(4 + day - 1) as usize]
                .as_ref()
                .unwrap()
                .clone()
        };

        let valentines = cell(14);
        assert!(valentines.selected);
        assert!(valentines.event);
        assert!(!valentines.disabled);

        let sixteenth = cell(16);
        assert!(sixteenth.disabled);
        assert!(!sixteenth.selected);

        assert!(cell(15).today);
        assert!(!cell(14).today);

        // 2024-02-10 is a Saturday.
        assert!(cell(10).weekend);
        assert!(!cell(12).weekend);
    }

    #[test]
    fn overlay_surface_reflects_options() {
        let view = view_of(PickerOptions::new().start_date(date(2024, 2, 15)));
        assert_eq!(view.overlay.months[1], "Feb");
        assert_eq!(view.overlay.placeholder, "4-digit year");
        assert_eq!(view.overlay.button_text, "Submit");
        assert!(view.overlay.enabled);

        let view = view_of(
            PickerOptions::new()
                .start_date(date(2024, 2, 15))
                .disable_year_overlay(true),
        );
        assert!(!view.overlay.enabled);
    }

    #[test]
    fn hidden_picker_still_snapshots() {
        let view = view_of(PickerOptions::new().start_date(date(2024, 2, 15)));
        assert!(!view.visible);
        assert_eq!(view.view, View::Calendar);
    }
}
