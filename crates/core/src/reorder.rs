//! Drag-vs-click disambiguation and list reordering.
//!
//! A reorderable list receives one pointer gesture at a time. The
//! controller decides whether the gesture was a click (selection) or a
//! drag (reorder) and guarantees the two never both fire for one
//! gesture. Clicks on the same item are additionally debounced by a
//! quiescence window, suppressing rapid re-clicks and the trailing
//! click artifact a drag release can emit.
//!
//! Timestamps are supplied by the caller in milliseconds; the
//! controller holds no clock, which keeps the debounce behavior
//! directly testable.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::types::OrderableItem;

/// Minimum elapsed time between two accepted clicks on the same item.
pub const CLICK_QUIESCENCE_MS: u64 = 300;

/// Gesture state machine: `Idle → PointerDown → {Dragging | click} → Idle`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum GesturePhase {
    Idle,
    PointerDown { id: String },
    Dragging { id: String },
}

/// What a pointer event amounted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// The gesture was a click and the item was selected.
    Selected(String),
    /// The click path was suppressed: the gesture became a drag, or
    /// the quiescence window has not elapsed.
    Suppressed,
    /// No gesture was in flight; a stale or synthetic release.
    Ignored,
}

/// Serializes gestures over one ordered sequence of items.
///
/// The controller owns the sequence; `positions` form a contiguous
/// permutation of `[0, n)` after every committed operation, and ids
/// stay unique by construction.
#[derive(Debug, Clone, Default)]
pub struct ReorderController {
    items: Vec<OrderableItem>,
    phase: GesturePhase,
    last_click_ms: HashMap<String, u64>,
}

impl Default for GesturePhase {
    fn default() -> Self {
        Self::Idle
    }
}

impl ReorderController {
    /// An empty controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a controller over an initial ordering.
    pub fn with_items<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut controller = Self::new();
        for id in ids {
            controller.push(id)?;
        }
        Ok(controller)
    }

    /// Append an item at the end of the sequence.
    pub fn push(&mut self, id: impl Into<String>) -> Result<()> {
        let id = id.into();
        if self.items.iter().any(|item| item.id == id) {
            return Err(Error::DuplicateItemId(id));
        }
        let position = self.items.len();
        self.items.push(OrderableItem::new(id, position));
        Ok(())
    }

    /// The settled sequence, positions contiguous.
    pub fn items(&self) -> &[OrderableItem] {
        &self.items
    }

    /// Whether a gesture is currently in flight.
    pub fn gesture_active(&self) -> bool {
        self.phase != GesturePhase::Idle
    }

    /// Begin a gesture on `id`. Returns whether the gesture began.
    ///
    /// A new gesture may not begin while another is in flight: the
    /// prior commit must have produced a settled sequence first, so
    /// interleaved permutations cannot corrupt the order. A down event
    /// for an id the controller does not hold is likewise refused.
    pub fn pointer_down(&mut self, id: &str) -> bool {
        if self.phase != GesturePhase::Idle {
            return false;
        }
        if !self.items.iter().any(|item| item.id == id) {
            return false;
        }
        self.phase = GesturePhase::PointerDown { id: id.to_string() };
        true
    }

    /// The gesture recognizer reported a drag for the active pointer
    /// sequence. From here on the click path is fully suppressed,
    /// regardless of timing.
    pub fn drag_started(&mut self) {
        if let GesturePhase::PointerDown { id } = &self.phase {
            self.phase = GesturePhase::Dragging { id: id.clone() };
        }
    }

    /// End the gesture without a drop.
    ///
    /// If the gesture never became a drag, this is the click path: the
    /// item is selected only when at least [`CLICK_QUIESCENCE_MS`] has
    /// elapsed since its previous accepted click.
    pub fn pointer_up(&mut self, now_ms: u64) -> GestureOutcome {
        match std::mem::take(&mut self.phase) {
            GesturePhase::Idle => GestureOutcome::Ignored,
            GesturePhase::Dragging { id } => {
                // Drag wins; the drop arrives separately. A trailing
                // click event from the release is swallowed here.
                self.phase = GesturePhase::Dragging { id };
                GestureOutcome::Suppressed
            }
            GesturePhase::PointerDown { id } => {
                if let Some(&last) = self.last_click_ms.get(&id) {
                    if now_ms.saturating_sub(last) < CLICK_QUIESCENCE_MS {
                        return GestureOutcome::Suppressed;
                    }
                }
                self.last_click_ms.insert(id.clone(), now_ms);
                GestureOutcome::Selected(id)
            }
        }
    }

    /// Abandon the active gesture (drag cancelled, pointer lost).
    pub fn cancel(&mut self) {
        self.phase = GesturePhase::Idle;
    }

    /// Commit the active drag: remove the dragged item and reinsert it
    /// at `drop_index`, then renumber every item to its new index.
    ///
    /// The reassignment is total, so the contiguity invariant holds
    /// however the drag looked while in flight. Returns the settled
    /// sequence.
    pub fn drop_at(&mut self, drop_index: usize) -> Result<&[OrderableItem]> {
        let id = match std::mem::take(&mut self.phase) {
            GesturePhase::Dragging { id } => id,
            other => {
                self.phase = other;
                return Err(Error::NoActiveDrag);
            }
        };

        let from = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| Error::UnknownItem(id.clone()))?;

        let dragged = self.items.remove(from);
        let to = drop_index.min(self.items.len());
        self.items.insert(to, dragged);

        for (index, item) in self.items.iter_mut().enumerate() {
            item.position = index;
        }

        Ok(&self.items)
    }
}
