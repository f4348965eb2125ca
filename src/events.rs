//! Session event system.
//!
//! Callers subscribe to changes of a [`PlotSession`](crate::PlotSession) via
//! [`EventController`]. Each event carries a set of [`EventKind`] flags so one
//! occurrence can match several categories (a kind switch is also a
//! regeneration). Delivery is synchronous: by the time a session method
//! returns, its events are already queued on every matching receiver.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use crate::data::function::FunctionKind;
use crate::data::params::ParameterField;

// ─────────────────────────────────────────────────────────────────────────────
// EventKind – bitflags
// ─────────────────────────────────────────────────────────────────────────────

/// Bitflags describing the categories an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EventKind(pub u32);

impl EventKind {
    /// A single parameter field took a new value.
    pub const PARAMETER_CHANGED: Self = Self(1 << 0);
    /// A different function kind was selected.
    pub const KIND_CHANGED: Self = Self(1 << 1);
    /// The sample sequence was recomputed.
    pub const REGENERATED: Self = Self(1 << 2);
    /// Settings were written to disk.
    pub const SAVED: Self = Self(1 << 3);
    /// A save request failed validation or I/O.
    pub const SAVE_FAILED: Self = Self(1 << 4);
    /// A vector image was written.
    pub const EXPORTED: Self = Self(1 << 5);
    /// A vector export failed.
    pub const EXPORT_FAILED: Self = Self(1 << 6);

    /// Nothing.
    pub const NONE: Self = Self(0);
    /// Every category.
    pub const ALL: Self = Self(u32::MAX);

    /// True if every bit of `other` is set in `self`.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if `self` and `other` share at least one bit.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl std::ops::BitOr for EventKind {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for EventKind {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for EventKind {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const NAMES: [(EventKind, &str); 7] = [
            (EventKind::PARAMETER_CHANGED, "PARAMETER_CHANGED"),
            (EventKind::KIND_CHANGED, "KIND_CHANGED"),
            (EventKind::REGENERATED, "REGENERATED"),
            (EventKind::SAVED, "SAVED"),
            (EventKind::SAVE_FAILED, "SAVE_FAILED"),
            (EventKind::EXPORTED, "EXPORTED"),
            (EventKind::EXPORT_FAILED, "EXPORT_FAILED"),
        ];
        let names: Vec<&str> = NAMES
            .iter()
            .filter(|(k, _)| self.contains(*k))
            .map(|(_, n)| *n)
            .collect();
        if names.is_empty() {
            f.write_str("NONE")
        } else {
            f.write_str(&names.join(" | "))
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Event metadata
// ─────────────────────────────────────────────────────────────────────────────

/// A parameter field moved from `old` to `new`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterMeta {
    pub field: ParameterField,
    pub old: f64,
    pub new: f64,
}

/// Outcome of a save or export.
#[derive(Debug, Clone, PartialEq)]
pub struct FileMeta {
    pub path: PathBuf,
    /// User-facing error text when the operation failed.
    pub error: Option<String>,
}

/// A session event.
#[derive(Debug, Clone)]
pub struct SessionEvent {
    /// Bitflag set of categories this event belongs to.
    pub kinds: EventKind,
    /// Kind active after the event.
    pub function: FunctionKind,
    pub parameter: Option<ParameterMeta>,
    /// Number of samples after a regeneration.
    pub sample_count: Option<usize>,
    pub file: Option<FileMeta>,
}

impl SessionEvent {
    pub fn new(kinds: EventKind, function: FunctionKind) -> Self {
        Self {
            kinds,
            function,
            parameter: None,
            sample_count: None,
            file: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventFilter
// ─────────────────────────────────────────────────────────────────────────────

/// OR-mask selecting which event categories a subscriber receives.
#[derive(Debug, Clone, Copy)]
pub struct EventFilter {
    pub mask: EventKind,
}

impl EventFilter {
    /// Accept all events.
    pub const fn all() -> Self {
        Self {
            mask: EventKind::ALL,
        }
    }

    /// Accept only the specified event kinds.
    pub const fn only(mask: EventKind) -> Self {
        Self { mask }
    }

    #[inline]
    pub fn matches(&self, event: &SessionEvent) -> bool {
        event.kinds.intersects(self.mask)
    }
}

impl Default for EventFilter {
    fn default() -> Self {
        Self::all()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EventController
// ─────────────────────────────────────────────────────────────────────────────

struct Subscriber {
    filter: EventFilter,
    sender: Sender<SessionEvent>,
}

/// Collects and distributes session events to subscribers.
#[derive(Clone, Default)]
pub struct EventController {
    inner: Arc<Mutex<Vec<Subscriber>>>,
}

impl std::fmt::Debug for EventController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.inner.lock().map(|s| s.len()).unwrap_or(0);
        f.debug_struct("EventController")
            .field("subscribers", &count)
            .finish()
    }
}

impl EventController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to events matching the given filter.
    pub fn subscribe(&self, filter: EventFilter) -> Receiver<SessionEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        if let Ok(mut subs) = self.inner.lock() {
            subs.push(Subscriber { filter, sender: tx });
        }
        rx
    }

    /// Subscribe to all events.
    pub fn subscribe_all(&self) -> Receiver<SessionEvent> {
        self.subscribe(EventFilter::all())
    }

    /// Deliver `event` to matching subscribers, dropping closed channels.
    pub fn emit(&self, event: SessionEvent) {
        let Ok(mut subs) = self.inner.lock() else {
            return;
        };
        subs.retain(|sub| {
            if sub.filter.matches(&event) {
                sub.sender.send(event.clone()).is_ok()
            } else {
                true
            }
        });
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().map(|s| s.len()).unwrap_or(0)
    }
}
