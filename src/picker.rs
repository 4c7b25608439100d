//! Per-instance state and the transition functions that mutate it.
//!
//! Transitions never panic on recoverable misuse: selecting a disabled
//! date, hiding an always-shown calendar, or tightening a bound the wrong
//! way around is reported through `tracing` and ignored, so the embedding
//! UI stays interactive. Callbacks are collected as [`PendingCall`]s and
//! invoked by the registry after its lock is released.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use derive_setters::Setters;
use tracing::warn;

use crate::anchor::Anchor;
use crate::consts::{DAYS_PER_WEEK, MONTHS_PER_YEAR};
use crate::options::{Disabler, Formatter, OnMonthChange, OnSelect, OnVisibility};
use crate::pair::{BoundKind, PairLink, PairRole, derived_targets, selection_target};
use crate::types::{DayKey, Position, View, first_of_month, is_weekend};

/// Payload of the selection callback.
///
/// `new_date` is `None` when a date was unselected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    /// Selection before the transition.
    pub prev_date: Option<NaiveDate>,
    /// Selection after the transition.
    pub new_date: Option<NaiveDate>,
}

/// Payload of the month-change callback. Both dates are firsts of month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthChange {
    /// Displayed month before the transition.
    pub prev_date: NaiveDate,
    /// Displayed month after the transition.
    pub new_date: NaiveDate,
}

/// Request for [`crate::Picker::navigate`]: jump the calendar to `date`'s
/// month without touching the selection.
#[derive(Debug, Clone, Copy, Setters)]
pub struct NavigateRequest {
    /// Any date inside the target month.
    pub date: NaiveDate,
    /// Fire the month-change callback if the month actually changes.
    pub trigger_on_month_change: bool,
}

impl NavigateRequest {
    /// Navigates to `date`'s month without firing callbacks.
    pub fn to(date: NaiveDate) -> Self {
        Self {
            date,
            trigger_on_month_change: false,
        }
    }
}

/// Request for [`crate::Picker::select_date`]. The default clears the
/// current selection.
#[derive(Debug, Clone, Copy, Default, Setters)]
pub struct SelectDateRequest {
    /// Date to select; leave unset to unselect.
    #[setters(strip_option)]
    pub date: Option<NaiveDate>,
    /// Also navigate the calendar to the selected date's month.
    pub change_calendar: bool,
    /// Fire the month-change callback when `change_calendar` changes the
    /// month.
    pub trigger_on_month_change: bool,
    /// Fire the selection callback.
    pub trigger_on_select: bool,
}

impl SelectDateRequest {
    /// Selects `date`, without firing callbacks or moving the calendar.
    pub fn of(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..Self::default()
        }
    }

    /// Clears the selection.
    pub fn clear() -> Self {
        Self::default()
    }
}

/// A min or max bound together with its provenance.
///
/// Pair propagation needs to know whether a bound was set directly on this
/// instance or derived from its sibling: derived values yield to explicit
/// ones and are cleared when the sibling clears.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum Bound {
    #[default]
    Unset,
    Derived(NaiveDate),
    Explicit(NaiveDate),
}

impl Bound {
    pub(crate) fn date(self) -> Option<NaiveDate> {
        match self {
            Self::Unset => None,
            Self::Derived(date) | Self::Explicit(date) => Some(date),
        }
    }

    pub(crate) fn is_explicit(self) -> bool {
        matches!(self, Self::Explicit(_))
    }

    /// Applies a derived candidate unless an explicit value is present.
    pub(crate) fn derive(&mut self, date: NaiveDate) {
        if !self.is_explicit() {
            *self = Self::Derived(date);
        }
    }

    /// Removes a derived value, leaving explicit ones alone.
    pub(crate) fn clear_derived(&mut self) {
        if matches!(self, Self::Derived(_)) {
            *self = Self::Unset;
        }
    }
}

/// A callback or anchor write collected during a transition and invoked
/// once the registry lock is released, in mutation order.
pub(crate) enum PendingCall {
    MonthChange(OnMonthChange, MonthChange),
    Select(OnSelect, SelectionChange),
    Visibility(OnVisibility),
    AnchorWrite(Arc<dyn Anchor>, String),
}

impl PendingCall {
    pub(crate) fn invoke(self) {
        match self {
            Self::MonthChange(callback, change) => callback(&change),
            Self::Select(callback, change) => callback(&change),
            Self::Visibility(callback) => callback(),
            Self::AnchorWrite(anchor, text) => anchor.set_value(&text),
        }
    }
}

/// The full state of one picker instance.
pub(crate) struct PickerState {
    pub(crate) anchor: Arc<dyn Anchor>,
    /// Drives the rendered month; always the first of its month.
    pub(crate) current_date: NaiveDate,
    pub(crate) selected: Option<NaiveDate>,
    pub(crate) min: Bound,
    pub(crate) max: Bound,
    pub(crate) disabled_dates: HashSet<DayKey>,
    pub(crate) events: HashSet<DayKey>,
    pub(crate) start_day: u8,
    pub(crate) days: [String; DAYS_PER_WEEK],
    pub(crate) months: [String; MONTHS_PER_YEAR],
    pub(crate) overlay_months: [String; MONTHS_PER_YEAR],
    pub(crate) overlay_button: String,
    pub(crate) overlay_placeholder: String,
    pub(crate) default_view: View,
    pub(crate) view: View,
    pub(crate) visible: bool,
    pub(crate) always_show: bool,
    pub(crate) show_all_dates: bool,
    pub(crate) no_weekends: bool,
    pub(crate) respect_disabled_read_only: bool,
    pub(crate) disable_overlay: bool,
    pub(crate) disable_mobile: bool,
    pub(crate) position: Option<Position>,
    pub(crate) disabler: Option<Disabler>,
    pub(crate) formatter: Option<Formatter>,
    pub(crate) on_select: Option<OnSelect>,
    pub(crate) on_show: Option<OnVisibility>,
    pub(crate) on_hide: Option<OnVisibility>,
    pub(crate) on_month_change: Option<OnMonthChange>,
    pub(crate) pair: Option<PairLink>,
}

impl PickerState {
    /// True when `date` cannot be selected: listed in the disabled set, a
    /// weekend under `no_weekends`, outside `[min, max]`, or rejected by
    /// the custom disabler. Pure OR-combination, day granular.
    pub(crate) fn is_disabled(&self, date: NaiveDate) -> bool {
        self.disabled_dates.contains(&DayKey::from(date))
            || (self.no_weekends && is_weekend(date.weekday()))
            || self.min.date().is_some_and(|min| date < min)
            || self.max.date().is_some_and(|max| date > max)
            || self.disabler.as_ref().is_some_and(|disabler| disabler(date))
    }

    /// True when `date` carries an event marker.
    pub(crate) fn has_event(&self, date: NaiveDate) -> bool {
        self.events.contains(&DayKey::from(date))
    }

    /// Formats a selection for the anchor element.
    pub(crate) fn format(&self, date: NaiveDate) -> String {
        match &self.formatter {
            Some(formatter) => formatter(date),
            None => date.format("%Y-%m-%d").to_string(),
        }
    }

    pub(crate) fn bound_mut(&mut self, kind: BoundKind) -> &mut Bound {
        match kind {
            BoundKind::Min => &mut self.min,
            BoundKind::Max => &mut self.max,
        }
    }

    /// Moves the displayed month. Never alters the selection.
    pub(crate) fn navigate(&mut self, request: NavigateRequest, out: &mut Vec<PendingCall>) {
        let prev = self.current_date;
        let next = first_of_month(request.date);
        self.current_date = next;
        if next != prev && request.trigger_on_month_change {
            if let Some(callback) = &self.on_month_change {
                out.push(PendingCall::MonthChange(
                    callback.clone(),
                    MonthChange {
                        prev_date: prev,
                        new_date: next,
                    },
                ));
            }
        }
    }

    /// Selects or unselects a date. Returns true when the selection
    /// actually changed, so the caller can propagate to a pair sibling.
    pub(crate) fn select(&mut self, request: SelectDateRequest, out: &mut Vec<PendingCall>) -> bool {
        let Some(date) = request.date else {
            // The no-argument form always unselects, even on read-only
            // anchors.
            let prev = self.selected.take();
            if prev.is_none() {
                return false;
            }
            if request.trigger_on_select {
                if let Some(callback) = &self.on_select {
                    out.push(PendingCall::Select(
                        callback.clone(),
                        SelectionChange {
                            prev_date: prev,
                            new_date: None,
                        },
                    ));
                }
            }
            out.push(PendingCall::AnchorWrite(self.anchor.clone(), String::new()));
            return true;
        };

        if self.is_disabled(date) {
            warn!(%date, "ignoring selection of a disabled date");
            return false;
        }
        if self.respect_disabled_read_only
            && (self.anchor.is_disabled() || self.anchor.is_read_only())
        {
            warn!(%date, "ignoring selection, the anchor is disabled or read-only");
            return false;
        }

        // Navigation is applied first so a triggered month-change callback
        // fires before the selection callback.
        if request.change_calendar {
            self.navigate(
                NavigateRequest {
                    date,
                    trigger_on_month_change: request.trigger_on_month_change,
                },
                out,
            );
        }

        let prev = self.selected.replace(date);
        if request.trigger_on_select {
            if let Some(callback) = &self.on_select {
                out.push(PendingCall::Select(
                    callback.clone(),
                    SelectionChange {
                        prev_date: prev,
                        new_date: Some(date),
                    },
                ));
            }
        }
        out.push(PendingCall::AnchorWrite(
            self.anchor.clone(),
            self.format(date),
        ));
        true
    }

    /// Sets or clears a bound. Returns true when the bound changed.
    ///
    /// Tightening a bound past an existing selection does not unselect it:
    /// the selection predates the bound and stays observable. Only new
    /// selections are filtered.
    pub(crate) fn set_bound(&mut self, kind: BoundKind, date: Option<NaiveDate>) -> bool {
        let next = match date {
            Some(date) => {
                let inverted = match kind {
                    BoundKind::Min => self.max.date().is_some_and(|max| date > max),
                    BoundKind::Max => self.min.date().is_some_and(|min| date < min),
                };
                if inverted {
                    warn!(%date, "ignoring bound that would invert the min/max window");
                    return false;
                }
                Bound::Explicit(date)
            }
            None => Bound::Unset,
        };
        let bound = self.bound_mut(kind);
        if *bound == next {
            return false;
        }
        *bound = next;
        true
    }

    /// The derivations this instance's explicit bounds and selection would
    /// impose on a sibling, used to sync a pair when its second member
    /// joins.
    pub(crate) fn outgoing_derivations(&self, role: PairRole) -> Vec<(BoundKind, NaiveDate)> {
        let mut out = Vec::new();
        if let Bound::Explicit(date) = self.min {
            for kind in derived_targets(role, BoundKind::Min) {
                out.push((*kind, date));
            }
        }
        if let Bound::Explicit(date) = self.max {
            for kind in derived_targets(role, BoundKind::Max) {
                out.push((*kind, date));
            }
        }
        if let Some(date) = self.selected {
            out.push((selection_target(role), date));
        }
        out
    }

    /// Makes the calendar visible in its default view. Idempotent; the
    /// callback fires only on an actual transition.
    pub(crate) fn show(&mut self, mobile_env: bool, out: &mut Vec<PendingCall>) {
        if self.disable_mobile && mobile_env {
            warn!("not showing, the picker is disabled in mobile environments");
            return;
        }
        if self.visible {
            return;
        }
        self.visible = true;
        self.view = self.default_view;
        if let Some(callback) = &self.on_show {
            out.push(PendingCall::Visibility(callback.clone()));
        }
    }

    /// Hides the calendar. A no-op under `always_show` or when already
    /// hidden.
    pub(crate) fn hide(&mut self, out: &mut Vec<PendingCall>) {
        if self.always_show || !self.visible {
            return;
        }
        self.visible = false;
        self.view = self.default_view;
        if let Some(callback) = &self.on_hide {
            out.push(PendingCall::Visibility(callback.clone()));
        }
    }

    /// Switches between the month grid and the year overlay. A no-op while
    /// hidden or when the overlay is disabled.
    pub(crate) fn toggle_overlay(&mut self) {
        if !self.visible {
            return;
        }
        if self.disable_overlay {
            warn!("ignoring overlay toggle, the overlay is disabled");
            return;
        }
        self.view = match self.view {
            View::Calendar => View::Overlay,
            View::Overlay => View::Calendar,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anchor::PlainAnchor;
    use crate::options::PickerOptions;
    use parking_lot::Mutex;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 2, 15)
    }

    fn state_of(options: PickerOptions) -> PickerState {
        options
            .normalize(Arc::new(PlainAnchor::new()), today())
            .unwrap()
    }

    fn drain(out: &mut Vec<PendingCall>) {
        for call in out.drain(..) {
            call.invoke();
        }
    }

    /// A bounded window: start 2024-02-15, selectable 02-10..=02-20.
    fn window_options() -> PickerOptions {
        PickerOptions::new()
            .start_date(date(2024, 2, 15))
            .min_date(date(2024, 2, 10))
            .max_date(date(2024, 2, 20))
    }

    #[test]
    fn disabled_by_listed_date() {
        let state = state_of(PickerOptions::new().disabled_dates(vec![date(2024, 2, 10)]));
        assert!(state.is_disabled(date(2024, 2, 10)));
        assert!(!state.is_disabled(date(2024, 2, 11)));
    }

    #[test]
    fn disabled_by_weekend_only_when_enabled() {
        // 2024-02-10 Saturday, 2024-02-11 Sunday, 2024-02-12 Monday.
        let relaxed = state_of(PickerOptions::new());
        assert!(!relaxed.is_disabled(date(2024, 2, 10)));

        let strict = state_of(PickerOptions::new().no_weekends(true));
        assert!(strict.is_disabled(date(2024, 2, 10)));
        assert!(strict.is_disabled(date(2024, 2, 11)));
        assert!(!strict.is_disabled(date(2024, 2, 12)));
    }

    #[test]
    fn disabled_outside_bounds() {
        let state = state_of(window_options());
        assert!(state.is_disabled(date(2024, 2, 9)));
        assert!(!state.is_disabled(date(2024, 2, 10)));
        assert!(!state.is_disabled(date(2024, 2, 20)));
        assert!(state.is_disabled(date(2024, 2, 21)));
    }

    #[test]
    fn disabled_by_custom_predicate() {
        let state = state_of(PickerOptions::new().disabler(|d| d.day() == 13));
        assert!(state.is_disabled(date(2024, 2, 13)));
        assert!(!state.is_disabled(date(2024, 2, 14)));
    }

    #[test]
    fn event_membership_is_day_granular() {
        let state = state_of(PickerOptions::new().events(vec![date(2024, 2, 14)]));
        assert!(state.has_event(date(2024, 2, 14)));
        assert!(!state.has_event(date(2024, 2, 15)));
    }

    #[test]
    fn navigate_moves_to_first_of_month() {
        let mut state = state_of(PickerOptions::new().selected_date(date(2024, 2, 14)));
        let mut out = Vec::new();
        state.navigate(NavigateRequest::to(date(2024, 5, 23)), &mut out);
        assert_eq!(state.current_date, date(2024, 5, 1));
        assert_eq!(state.selected, Some(date(2024, 2, 14)));
        assert!(out.is_empty());
    }

    #[test]
    fn navigate_reports_month_change_only_when_it_changes() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let mut state = state_of(
            PickerOptions::new()
                .start_date(date(2024, 2, 15))
                .on_month_change(move |change| log.lock().push((change.prev_date, change.new_date))),
        );
        let mut out = Vec::new();

        // Same month: no callback even with the trigger set.
        state.navigate(
            NavigateRequest::to(date(2024, 2, 28)).trigger_on_month_change(true),
            &mut out,
        );
        drain(&mut out);
        assert!(seen.lock().is_empty());

        // Month changes but the trigger is off.
        state.navigate(NavigateRequest::to(date(2024, 3, 2)), &mut out);
        drain(&mut out);
        assert!(seen.lock().is_empty());

        // Month changes with the trigger set.
        state.navigate(
            NavigateRequest::to(date(2024, 4, 9)).trigger_on_month_change(true),
            &mut out,
        );
        drain(&mut out);
        assert_eq!(*seen.lock(), vec![(date(2024, 3, 1), date(2024, 4, 1))]);
    }

    #[test]
    fn select_inside_window_fires_callback() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let mut state = state_of(
            window_options().on_select(move |change| {
                log.lock().push((change.prev_date, change.new_date));
            }),
        );
        let mut out = Vec::new();
        let changed = state.select(
            SelectDateRequest::of(date(2024, 2, 12)).trigger_on_select(true),
            &mut out,
        );
        drain(&mut out);
        assert!(changed);
        assert_eq!(state.selected, Some(date(2024, 2, 12)));
        assert_eq!(*seen.lock(), vec![(None, Some(date(2024, 2, 12)))]);
    }

    #[test]
    fn select_outside_window_is_ignored() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let mut state = state_of(
            window_options().on_select(move |change| {
                log.lock().push((change.prev_date, change.new_date));
            }),
        );
        let mut out = Vec::new();
        let changed = state.select(
            SelectDateRequest::of(date(2024, 2, 25)).trigger_on_select(true),
            &mut out,
        );
        drain(&mut out);
        assert!(!changed);
        assert_eq!(state.selected, None);
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn select_disabled_date_keeps_previous_selection() {
        let mut state = state_of(
            PickerOptions::new()
                .selected_date(date(2024, 2, 14))
                .disabled_dates(vec![date(2024, 2, 16)]),
        );
        let mut out = Vec::new();
        assert!(!state.select(SelectDateRequest::of(date(2024, 2, 16)), &mut out));
        assert_eq!(state.selected, Some(date(2024, 2, 14)));
    }

    #[test]
    fn clear_always_unselects() {
        let mut state = state_of(PickerOptions::new().selected_date(date(2024, 2, 14)));
        let mut out = Vec::new();
        assert!(state.select(SelectDateRequest::clear(), &mut out));
        assert_eq!(state.selected, None);

        // Clearing again is a no-op.
        assert!(!state.select(SelectDateRequest::clear(), &mut out));
    }

    #[test]
    fn clear_ignores_read_only_anchor() {
        let anchor = Arc::new(PlainAnchor::new().read_only(true));
        let mut state = PickerOptions::new()
            .respect_disabled_read_only(true)
            .selected_date(date(2024, 2, 14))
            .normalize(anchor.clone(), today())
            .unwrap();
        let mut out = Vec::new();

        // New selections are refused...
        assert!(!state.select(SelectDateRequest::of(date(2024, 2, 16)), &mut out));
        // ...but the no-argument form still unselects.
        assert!(state.select(SelectDateRequest::clear(), &mut out));
        assert_eq!(state.selected, None);
    }

    #[test]
    fn selection_writes_through_the_anchor() {
        let anchor = Arc::new(PlainAnchor::new());
        let mut state = PickerOptions::new()
            .normalize(anchor.clone(), today())
            .unwrap();
        let mut out = Vec::new();

        state.select(SelectDateRequest::of(date(2024, 2, 12)), &mut out);
        drain(&mut out);
        assert_eq!(anchor.value(), "2024-02-12");

        state.select(SelectDateRequest::clear(), &mut out);
        drain(&mut out);
        assert_eq!(anchor.value(), "");
    }

    #[test]
    fn custom_formatter_shapes_the_anchor_value() {
        let anchor = Arc::new(PlainAnchor::new());
        let mut state = PickerOptions::new()
            .formatter(|d| d.format("%d.%m.%Y").to_string())
            .normalize(anchor.clone(), today())
            .unwrap();
        let mut out = Vec::new();
        state.select(SelectDateRequest::of(date(2024, 2, 12)), &mut out);
        drain(&mut out);
        assert_eq!(anchor.value(), "12.02.2024");
    }

    #[test]
    fn month_change_fires_before_select() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let select_log = seen.clone();
        let month_log = seen.clone();
        let mut state = state_of(
            PickerOptions::new()
                .start_date(date(2024, 2, 15))
                .on_select(move |_| select_log.lock().push("select"))
                .on_month_change(move |_| month_log.lock().push("month_change")),
        );
        let mut out = Vec::new();
        state.select(
            SelectDateRequest::of(date(2024, 4, 9))
                .change_calendar(true)
                .trigger_on_month_change(true)
                .trigger_on_select(true),
            &mut out,
        );
        drain(&mut out);
        assert_eq!(state.current_date, date(2024, 4, 1));
        assert_eq!(*seen.lock(), vec!["month_change", "select"]);
    }

    #[test]
    fn tightening_a_bound_keeps_the_selection() {
        let mut state = state_of(PickerOptions::new().selected_date(date(2024, 2, 14)));
        assert!(state.set_bound(BoundKind::Min, Some(date(2024, 2, 20))));
        assert_eq!(state.selected, Some(date(2024, 2, 14)));
        assert!(state.is_disabled(date(2024, 2, 14)));
    }

    #[test]
    fn inverting_bounds_is_ignored() {
        let mut state = state_of(window_options());
        assert!(!state.set_bound(BoundKind::Min, Some(date(2024, 2, 25))));
        assert_eq!(state.min.date(), Some(date(2024, 2, 10)));
        assert!(!state.set_bound(BoundKind::Max, Some(date(2024, 2, 5))));
        assert_eq!(state.max.date(), Some(date(2024, 2, 20)));
    }

    #[test]
    fn clearing_a_bound() {
        let mut state = state_of(window_options());
        assert!(state.set_bound(BoundKind::Min, None));
        assert_eq!(state.min, Bound::Unset);
        assert!(!state.set_bound(BoundKind::Min, None));
    }

    #[test]
    fn show_and_hide_are_idempotent() {
        let shows = Arc::new(Mutex::new(0u32));
        let hides = Arc::new(Mutex::new(0u32));
        let show_log = shows.clone();
        let hide_log = hides.clone();
        let mut state = state_of(
            PickerOptions::new()
                .on_show(move || *show_log.lock() += 1)
                .on_hide(move || *hide_log.lock() += 1),
        );
        let mut out = Vec::new();

        state.hide(&mut out);
        drain(&mut out);
        assert_eq!(*hides.lock(), 0);

        state.show(false, &mut out);
        state.show(false, &mut out);
        drain(&mut out);
        assert!(state.visible);
        assert_eq!(*shows.lock(), 1);

        state.hide(&mut out);
        state.hide(&mut out);
        drain(&mut out);
        assert!(!state.visible);
        assert_eq!(*hides.lock(), 1);
    }

    #[test]
    fn always_show_never_hides() {
        let mut state = state_of(PickerOptions::new().always_show(true));
        let mut out = Vec::new();
        assert!(state.visible);
        state.hide(&mut out);
        assert!(state.visible);
        assert!(out.is_empty());
    }

    #[test]
    fn show_honors_default_view() {
        let mut state = state_of(PickerOptions::new().default_view(View::Overlay));
        let mut out = Vec::new();
        state.show(false, &mut out);
        assert_eq!(state.view, View::Overlay);
    }

    #[test]
    fn overlay_toggle_needs_a_visible_calendar() {
        let mut state = state_of(PickerOptions::new());
        state.toggle_overlay();
        assert_eq!(state.view, View::Calendar);

        let mut out = Vec::new();
        state.show(false, &mut out);
        state.toggle_overlay();
        assert_eq!(state.view, View::Overlay);
        state.toggle_overlay();
        assert_eq!(state.view, View::Calendar);
    }

    #[test]
    fn disabled_overlay_never_toggles() {
        let mut state = state_of(PickerOptions::new().disable_year_overlay(true));
        let mut out = Vec::new();
        state.show(false, &mut out);
        state.toggle_overlay();
        assert_eq!(state.view, View::Calendar);
    }

    #[test]
    fn mobile_disabled_picker_refuses_to_show() {
        let mut state = state_of(PickerOptions::new().disable_mobile(true));
        let mut out = Vec::new();
        state.show(true, &mut out);
        assert!(!state.visible);
        state.show(false, &mut out);
        assert!(state.visible);
    }

    #[test]
    fn bound_provenance() {
        let mut bound = Bound::Unset;
        bound.derive(date(2024, 3, 10));
        assert_eq!(bound, Bound::Derived(date(2024, 3, 10)));
        assert_eq!(bound.date(), Some(date(2024, 3, 10)));

        // Derived values follow the latest derivation.
        bound.derive(date(2024, 3, 12));
        assert_eq!(bound, Bound::Derived(date(2024, 3, 12)));

        // Explicit values refuse derivation and derived clears.
        bound = Bound::Explicit(date(2024, 3, 1));
        bound.derive(date(2024, 3, 12));
        assert_eq!(bound, Bound::Explicit(date(2024, 3, 1)));
        bound.clear_derived();
        assert_eq!(bound, Bound::Explicit(date(2024, 3, 1)));

        bound = Bound::Derived(date(2024, 3, 12));
        bound.clear_derived();
        assert_eq!(bound, Bound::Unset);
    }
}
