//! Process-wide instance registry and the public picker handle.
//!
//! The registry is the redesigned form of the original's global listener
//! map: instances register on creation, deregister on removal, and the
//! shared document-click route exists exactly while at least one instance
//! is alive. Pair siblings are found by id lookup here, never through
//! owning references, so removing one member can never leave the other
//! dangling.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::anchor::{Anchor, Selector};
use crate::error::CreateError;
use crate::options::PickerOptions;
use crate::pair::{BoundKind, Pair, PairLink, PairRole, SelectedRange, derived_targets, selection_target};
use crate::picker::{NavigateRequest, PendingCall, PickerState, SelectDateRequest};
use crate::types::View;
use crate::view::{self, CalendarView};

/// Opaque id of one live instance inside a registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct PickerId(u64);

impl PickerId {
    #[cfg(test)]
    pub(crate) fn for_tests(raw: u64) -> Self {
        Self(raw)
    }
}

#[derive(Default)]
struct RegistryInner {
    pickers: HashMap<PickerId, PickerState>,
    anchors: HashMap<String, Arc<dyn Anchor>>,
    pairs: HashMap<String, Pair>,
    next_id: u64,
    document_listener: bool,
    mobile: bool,
}

impl RegistryInner {
    fn allocate_id(&mut self) -> PickerId {
        self.next_id += 1;
        PickerId(self.next_id)
    }

    fn teardown_if_empty(&mut self) {
        if self.pickers.is_empty() && self.document_listener {
            self.document_listener = false;
            debug!("last instance removed, tearing down the shared document-click route");
        }
    }
}

/// Unlinks the surviving member of `removed`'s pair, if any, and drops the
/// pair record. Derived bounds on the survivor are cleared since their
/// source is gone; explicit bounds stay.
fn unlink_pair(inner: &mut RegistryInner, key: &str, removed: PickerId) {
    let Some(pair) = inner.pairs.get(key) else {
        return;
    };
    if !pair.contains(removed) {
        return;
    }
    let survivor = if pair.start == removed {
        pair.end
    } else {
        Some(pair.start)
    };
    inner.pairs.remove(key);
    if let Some(survivor_id) = survivor {
        if let Some(survivor) = inner.pickers.get_mut(&survivor_id) {
            survivor.pair = None;
            survivor.min.clear_derived();
            survivor.max.clear_derived();
        }
    }
}

/// Applies both members' standing derivations to each other when a pair
/// completes, so bounds configured before the link behave like bounds set
/// after it.
fn sync_pair(inner: &mut RegistryInner, start_id: PickerId, end_id: PickerId) {
    let from_start = inner
        .pickers
        .get(&start_id)
        .map(|state| state.outgoing_derivations(PairRole::Start))
        .unwrap_or_default();
    let from_end = inner
        .pickers
        .get(&end_id)
        .map(|state| state.outgoing_derivations(PairRole::End))
        .unwrap_or_default();
    if let Some(state) = inner.pickers.get_mut(&end_id) {
        for (kind, date) in from_start {
            state.bound_mut(kind).derive(date);
        }
    }
    if let Some(state) = inner.pickers.get_mut(&start_id) {
        for (kind, date) in from_end {
            state.bound_mut(kind).derive(date);
        }
    }
}

fn invoke(pending: Vec<PendingCall>) {
    for call in pending {
        call.invoke();
    }
}

/// Owns every live picker instance.
///
/// Cloning is cheap and clones share the same instance table, so one
/// registry per application (or per document) is the expected shape.
#[derive(Clone, Default)]
pub struct Registry {
    shared: Arc<Mutex<RegistryInner>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an anchor under a name that selectors can resolve.
    /// Returns the anchor previously registered under that name, if any.
    pub fn register_anchor(
        &self,
        name: impl Into<String>,
        anchor: Arc<dyn Anchor>,
    ) -> Option<Arc<dyn Anchor>> {
        self.shared.lock().anchors.insert(name.into(), anchor)
    }

    /// Marks the environment as mobile. Instances created with
    /// `disable_mobile` refuse to show while this is set, letting the
    /// embedder fall back to a native control.
    pub fn set_mobile(&self, mobile: bool) {
        self.shared.lock().mobile = mobile;
    }

    /// True when the environment is marked mobile.
    pub fn is_mobile(&self) -> bool {
        self.shared.lock().mobile
    }

    /// True while the shared document-click route is installed, which is
    /// exactly while at least one instance is alive.
    pub fn has_document_listener(&self) -> bool {
        self.shared.lock().document_listener
    }

    /// Number of live instances.
    pub fn live_instances(&self) -> usize {
        self.shared.lock().pickers.len()
    }

    /// Creates a picker bound to the anchor `selector` resolves to.
    ///
    /// An instance created with a `pair_id` links up with the existing
    /// instance carrying the same id; the first is the start of the range,
    /// the second the end. A third instance on the same id is reported and
    /// created unpaired.
    ///
    /// # Errors
    ///
    /// Fails when the selector does not resolve ([`CreateError::AnchorNotFound`])
    /// or when the options are malformed ([`CreateError::Config`]).
    pub fn create(
        &self,
        selector: impl Into<Selector>,
        options: PickerOptions,
    ) -> Result<Picker, CreateError> {
        let selector = selector.into();
        let pair_key = options.pair_id.clone();
        let today = Local::now().date_naive();
        let mut pending = Vec::new();

        let picker = {
            let mut inner = self.shared.lock();
            let anchor = match selector {
                Selector::Name(name) => match inner.anchors.get(&name) {
                    Some(anchor) => Arc::clone(anchor),
                    None => return Err(CreateError::AnchorNotFound { selector: name }),
                },
                Selector::Handle(anchor) => anchor,
            };
            let mut state = options.normalize(anchor, today)?;

            let id = inner.allocate_id();
            let completed_pair = match pair_key {
                Some(key) => match inner.pairs.entry(key.clone()) {
                    Entry::Vacant(slot) => {
                        slot.insert(Pair::new(id));
                        state.pair = Some(PairLink {
                            key,
                            role: PairRole::Start,
                        });
                        None
                    }
                    Entry::Occupied(mut slot) => {
                        let pair = slot.get_mut();
                        if pair.is_full() {
                            warn!(key = %key, "pair id already has two instances, creating unpaired");
                            None
                        } else {
                            pair.end = Some(id);
                            let start = pair.start;
                            state.pair = Some(PairLink {
                                key,
                                role: PairRole::End,
                            });
                            Some(start)
                        }
                    }
                },
                None => None,
            };

            if let Some(selected) = state.selected {
                pending.push(PendingCall::AnchorWrite(
                    state.anchor.clone(),
                    state.format(selected),
                ));
            }

            inner.pickers.insert(id, state);
            if let Some(start_id) = completed_pair {
                sync_pair(&mut inner, start_id, id);
            }
            if !inner.document_listener {
                inner.document_listener = true;
                debug!("first instance created, installing the shared document-click route");
            }
            Picker {
                id,
                shared: Arc::clone(&self.shared),
            }
        };

        invoke(pending);
        Ok(picker)
    }

    /// Routes a document-level click to every live instance: visible
    /// calendars other than the one the click landed in are hidden, except
    /// always-shown ones. Skipped entirely when the consumer already
    /// stopped the event's propagation.
    pub fn document_click(&self, inside: Option<&Picker>, propagation_stopped: bool) {
        if propagation_stopped {
            return;
        }
        let inside_id = inside.map(|picker| picker.id);
        let mut pending = Vec::new();
        {
            let mut inner = self.shared.lock();
            for (id, state) in inner.pickers.iter_mut() {
                if Some(*id) == inside_id {
                    continue;
                }
                state.hide(&mut pending);
            }
        }
        invoke(pending);
    }
}

/// Handle to one live picker instance.
///
/// Handles are cheap to clone. After [`Picker::remove`] every transition
/// becomes a reported no-op and the observable fields return `None`.
#[derive(Clone)]
pub struct Picker {
    id: PickerId,
    shared: Arc<Mutex<RegistryInner>>,
}

impl Picker {
    fn read<R>(&self, f: impl FnOnce(&PickerState) -> R) -> Option<R> {
        let inner = self.shared.lock();
        inner.pickers.get(&self.id).map(f)
    }

    /// First day of the displayed month. `None` once removed.
    pub fn current_date(&self) -> Option<NaiveDate> {
        self.read(|state| state.current_date)
    }

    /// The selected date, if any.
    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.read(|state| state.selected).flatten()
    }

    /// The minimum selectable date, if any.
    pub fn min_date(&self) -> Option<NaiveDate> {
        self.read(|state| state.min.date()).flatten()
    }

    /// The maximum selectable date, if any.
    pub fn max_date(&self) -> Option<NaiveDate> {
        self.read(|state| state.max.date()).flatten()
    }

    /// The surface currently presented. `None` once removed.
    pub fn view(&self) -> Option<View> {
        self.read(|state| state.view)
    }

    /// True while the calendar is on screen.
    pub fn is_showing(&self) -> bool {
        self.read(|state| state.visible).unwrap_or(false)
    }

    /// True while this instance is one half of a range pair.
    pub fn is_paired(&self) -> bool {
        self.read(|state| state.pair.is_some()).unwrap_or(false)
    }

    /// True once [`Picker::remove`] has run.
    pub fn is_removed(&self) -> bool {
        self.read(|_| ()).is_none()
    }

    /// Immutable render snapshot of the current state; what a UI layer
    /// paints. `None` once removed.
    pub fn calendar_view(&self) -> Option<CalendarView> {
        let today = Local::now().date_naive();
        self.read(|state| view::build(state, today))
    }

    /// Moves the calendar to another month without touching the selection.
    pub fn navigate(&self, request: NavigateRequest) {
        let mut pending = Vec::new();
        {
            let mut inner = self.shared.lock();
            let Some(state) = inner.pickers.get_mut(&self.id) else {
                warn!("ignoring navigate on a removed picker");
                return;
            };
            state.navigate(request, &mut pending);
        }
        invoke(pending);
    }

    /// Selects or unselects a date; see [`SelectDateRequest`].
    ///
    /// On a paired instance a successful change also derives the sibling's
    /// bound (the start picker floors the end picker, the end picker caps
    /// the start picker) without ever overwriting a bound set explicitly
    /// on the sibling.
    pub fn select_date(&self, request: SelectDateRequest) {
        let mut pending = Vec::new();
        {
            let mut inner = self.shared.lock();
            let Some(state) = inner.pickers.get_mut(&self.id) else {
                warn!("ignoring select_date on a removed picker");
                return;
            };
            let changed = state.select(request, &mut pending);
            let link = state.pair.clone();
            let selected = state.selected;
            if changed {
                if let Some(link) = link {
                    let sibling_id = inner
                        .pairs
                        .get(&link.key)
                        .and_then(|pair| pair.sibling_of(self.id));
                    if let Some(sibling_id) = sibling_id {
                        if let Some(sibling) = inner.pickers.get_mut(&sibling_id) {
                            let target = selection_target(link.role);
                            match selected {
                                Some(date) => sibling.bound_mut(target).derive(date),
                                None => sibling.bound_mut(target).clear_derived(),
                            }
                        }
                    }
                }
            }
        }
        invoke(pending);
    }

    /// Sets or clears the minimum selectable date. Propagates to a pair
    /// sibling as a derived bound.
    pub fn set_min(&self, date: Option<NaiveDate>) {
        self.set_bound(BoundKind::Min, date);
    }

    /// Sets or clears the maximum selectable date. Propagates to a pair
    /// sibling as a derived bound.
    pub fn set_max(&self, date: Option<NaiveDate>) {
        self.set_bound(BoundKind::Max, date);
    }

    fn set_bound(&self, kind: BoundKind, date: Option<NaiveDate>) {
        let mut inner = self.shared.lock();
        let Some(state) = inner.pickers.get_mut(&self.id) else {
            warn!("ignoring bound change on a removed picker");
            return;
        };
        let changed = state.set_bound(kind, date);
        let link = state.pair.clone();
        if !changed {
            return;
        }
        if let Some(link) = link {
            let sibling_id = inner
                .pairs
                .get(&link.key)
                .and_then(|pair| pair.sibling_of(self.id));
            if let Some(sibling_id) = sibling_id {
                if let Some(sibling) = inner.pickers.get_mut(&sibling_id) {
                    for target in derived_targets(link.role, kind) {
                        match date {
                            Some(date) => sibling.bound_mut(*target).derive(date),
                            None => sibling.bound_mut(*target).clear_derived(),
                        }
                    }
                }
            }
        }
    }

    /// Shows the calendar in its default view.
    pub fn show(&self) {
        let mut pending = Vec::new();
        {
            let mut inner = self.shared.lock();
            let mobile = inner.mobile;
            let Some(state) = inner.pickers.get_mut(&self.id) else {
                warn!("ignoring show on a removed picker");
                return;
            };
            state.show(mobile, &mut pending);
        }
        invoke(pending);
    }

    /// Hides the calendar. A no-op for always-shown instances.
    pub fn hide(&self) {
        let mut pending = Vec::new();
        {
            let mut inner = self.shared.lock();
            let Some(state) = inner.pickers.get_mut(&self.id) else {
                warn!("ignoring hide on a removed picker");
                return;
            };
            state.hide(&mut pending);
        }
        invoke(pending);
    }

    /// Shows a hidden calendar, hides a visible one.
    pub fn toggle_calendar(&self) {
        if self.is_showing() {
            self.hide();
        } else {
            self.show();
        }
    }

    /// Switches between the month grid and the year overlay. Only works
    /// while the calendar is showing.
    pub fn toggle_overlay(&self) {
        let mut inner = self.shared.lock();
        let Some(state) = inner.pickers.get_mut(&self.id) else {
            warn!("ignoring overlay toggle on a removed picker");
            return;
        };
        state.toggle_overlay();
    }

    /// The selections of this instance's range pair, or `None` when the
    /// instance is not part of a complete pair.
    pub fn get_selected_range(&self) -> Option<SelectedRange> {
        let inner = self.shared.lock();
        let state = inner.pickers.get(&self.id)?;
        let link = state.pair.as_ref()?;
        let pair = inner.pairs.get(&link.key)?;
        let end_id = pair.end?;
        Some(SelectedRange {
            start: inner.pickers.get(&pair.start)?.selected,
            end: inner.pickers.get(&end_id)?.selected,
        })
    }

    /// Deregisters this instance only. A pair sibling is unlinked but kept
    /// alive; the shared document-click route is torn down with the last
    /// live instance.
    pub fn remove(&self) {
        let mut inner = self.shared.lock();
        let Some(state) = inner.pickers.remove(&self.id) else {
            return;
        };
        if let Some(link) = state.pair {
            unlink_pair(&mut inner, &link.key, self.id);
        }
        inner.teardown_if_empty();
    }

    /// Removes this instance and its pair sibling in one step.
    pub fn remove_pair(&self) {
        let mut inner = self.shared.lock();
        let link = inner
            .pickers
            .get(&self.id)
            .and_then(|state| state.pair.clone());
        let sibling_id = link
            .as_ref()
            .and_then(|link| inner.pairs.get(&link.key))
            .and_then(|pair| pair.sibling_of(self.id));
        if let Some(link) = &link {
            inner.pairs.remove(&link.key);
        }
        inner.pickers.remove(&self.id);
        if let Some(sibling_id) = sibling_id {
            inner.pickers.remove(&sibling_id);
        }
        inner.teardown_if_empty();
    }
}
