//! Pointer-to-placement conversion for one edited asset instance.
//!
//! Converts raw pointer coordinates into a percentage focus point,
//! holds the current fit mode, and gates both behind an explicit
//! focus-adjustment mode. Exiting that mode commits focus and fit
//! together as one saved unit, so a renderer never sees a mismatched
//! pair.

use crate::types::{ContainerRect, FitMode, FocusPoint, PlacementState};

/// Outcome of a pointer-driven focus update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FocusUpdate {
    /// The focus point was updated.
    Applied {
        focus: FocusPoint,
        /// Whether the pointer landed outside the container and the
        /// result was clamped into `[0, 100]`.
        clamped: bool,
    },
    /// The container rect was missing, zero-area, or non-finite (or
    /// the pointer coordinates were non-finite); the previous state
    /// was retained.
    Skipped,
}

/// The focus/fit pair to forward to the persistence collaborator.
///
/// Produced only when focus-adjustment mode is exited, never one half
/// at a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementCommit {
    pub focus: FocusPoint,
    pub fit: FitMode,
}

/// What a routed pointer click should do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Focus-adjustment mode consumed the click.
    FocusMoved(FocusUpdate),
    /// Normal activation: the click belongs to the asset itself.
    Activate,
}

/// Maintains the [`PlacementState`] for one edited asset instance.
#[derive(Debug, Clone, Default)]
pub struct PlacementMapper {
    state: PlacementState,
    focus_mode: bool,
}

impl PlacementMapper {
    /// Start from the defaults: centered focus, cover fit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a previously persisted placement.
    pub fn from_persisted(state: PlacementState) -> Self {
        Self {
            state,
            focus_mode: false,
        }
    }

    /// The current placement.
    pub fn state(&self) -> PlacementState {
        self.state
    }

    /// Whether pointer clicks are currently routed to focus updates.
    pub fn focus_mode_active(&self) -> bool {
        self.focus_mode
    }

    /// Convert a pointer position into a focus point relative to the
    /// container and store it.
    ///
    /// The result is always clamped to `[0, 100]` on both axes;
    /// pointer events firing at container edges or against a
    /// slightly-stale rect must never yield an out-of-range focus
    /// point. An unusable rect or non-finite pointer skips the update
    /// and retains the previous state.
    pub fn update_focus_from_pointer(
        &mut self,
        pointer_x: f64,
        pointer_y: f64,
        rect: &ContainerRect,
    ) -> FocusUpdate {
        if !rect.is_usable() || !pointer_x.is_finite() || !pointer_y.is_finite() {
            log::debug!("skipping focus update: unusable rect or pointer");
            return FocusUpdate::Skipped;
        }

        let raw_x = (pointer_x - rect.left) / rect.width * 100.0;
        let raw_y = (pointer_y - rect.top) / rect.height * 100.0;
        let x = raw_x.clamp(0.0, 100.0);
        let y = raw_y.clamp(0.0, 100.0);
        let clamped = x != raw_x || y != raw_y;

        self.state.focus = FocusPoint { x, y };
        FocusUpdate::Applied {
            focus: self.state.focus,
            clamped,
        }
    }

    /// Set the fit mode. Plain assignment; the enum makes invalid
    /// modes unrepresentable here, and the string boundary is policed
    /// by [`FitMode::from_str`](std::str::FromStr).
    pub fn set_fit(&mut self, fit: FitMode) {
        self.state.fit = fit;
    }

    /// Enter or leave focus-adjustment mode.
    ///
    /// Returns the committed focus/fit pair when leaving the mode;
    /// entering returns `None`.
    pub fn toggle_focus_mode(&mut self) -> Option<PlacementCommit> {
        if self.focus_mode {
            self.focus_mode = false;
            Some(self.commit())
        } else {
            self.focus_mode = true;
            None
        }
    }

    /// Route a pointer click: while focus-adjustment mode is active it
    /// moves the focus point, otherwise it is the asset's normal
    /// activation.
    pub fn route_pointer(
        &mut self,
        pointer_x: f64,
        pointer_y: f64,
        rect: &ContainerRect,
    ) -> PointerAction {
        if self.focus_mode {
            PointerAction::FocusMoved(self.update_focus_from_pointer(pointer_x, pointer_y, rect))
        } else {
            PointerAction::Activate
        }
    }

    fn commit(&self) -> PlacementCommit {
        PlacementCommit {
            focus: self.state.focus,
            fit: self.state.fit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> ContainerRect {
        ContainerRect {
            left: 100.0,
            top: 50.0,
            width: 400.0,
            height: 200.0,
        }
    }

    #[test]
    fn test_pointer_maps_to_relative_percentage() {
        let mut mapper = PlacementMapper::new();
        let update = mapper.update_focus_from_pointer(300.0, 150.0, &rect());
        assert_eq!(
            update,
            FocusUpdate::Applied {
                focus: FocusPoint { x: 50.0, y: 50.0 },
                clamped: false,
            }
        );
    }

    #[test]
    fn test_far_outside_pointer_is_clamped() {
        let mut mapper = PlacementMapper::new();
        let update = mapper.update_focus_from_pointer(-10_000.0, 99_999.0, &rect());
        match update {
            FocusUpdate::Applied { focus, clamped } => {
                assert!(clamped);
                assert_eq!(focus, FocusPoint { x: 0.0, y: 100.0 });
            }
            FocusUpdate::Skipped => panic!("expected clamped update"),
        }
    }

    #[test]
    fn test_edge_pointer_stays_in_range() {
        let mut mapper = PlacementMapper::new();
        // Exactly on the right/bottom edge.
        let update = mapper.update_focus_from_pointer(500.0, 250.0, &rect());
        assert_eq!(
            update,
            FocusUpdate::Applied {
                focus: FocusPoint { x: 100.0, y: 100.0 },
                clamped: false,
            }
        );
    }

    #[test]
    fn test_zero_area_rect_skips_and_retains_state() {
        let mut mapper = PlacementMapper::new();
        mapper.update_focus_from_pointer(300.0, 150.0, &rect());
        let before = mapper.state();

        let degenerate = ContainerRect {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
        };
        assert_eq!(
            mapper.update_focus_from_pointer(10.0, 10.0, &degenerate),
            FocusUpdate::Skipped
        );
        assert_eq!(mapper.state(), before);
    }

    #[test]
    fn test_non_finite_pointer_skips() {
        let mut mapper = PlacementMapper::new();
        let before = mapper.state();
        assert_eq!(
            mapper.update_focus_from_pointer(f64::NAN, 10.0, &rect()),
            FocusUpdate::Skipped
        );
        assert_eq!(mapper.state(), before);
        // Focus never becomes NaN.
        assert!(mapper.state().focus.x.is_finite());
    }

    #[test]
    fn test_toggle_commits_focus_and_fit_together() {
        let mut mapper = PlacementMapper::new();
        assert_eq!(mapper.toggle_focus_mode(), None);
        assert!(mapper.focus_mode_active());

        mapper.update_focus_from_pointer(200.0, 100.0, &rect());
        mapper.set_fit(FitMode::Contain);

        let commit = mapper.toggle_focus_mode().expect("exit commits");
        assert_eq!(commit.fit, FitMode::Contain);
        assert_eq!(commit.focus, FocusPoint { x: 25.0, y: 25.0 });
        assert!(!mapper.focus_mode_active());
    }

    #[test]
    fn test_pointer_routing_follows_mode() {
        let mut mapper = PlacementMapper::new();
        assert_eq!(
            mapper.route_pointer(300.0, 150.0, &rect()),
            PointerAction::Activate
        );

        mapper.toggle_focus_mode();
        match mapper.route_pointer(300.0, 150.0, &rect()) {
            PointerAction::FocusMoved(FocusUpdate::Applied { .. }) => {}
            other => panic!("expected focus move, got {:?}", other),
        }
    }

    #[test]
    fn test_seeding_from_persisted_state() {
        let persisted = PlacementState {
            focus: FocusPoint { x: 10.0, y: 90.0 },
            fit: FitMode::Fill,
        };
        let mapper = PlacementMapper::from_persisted(persisted);
        assert_eq!(mapper.state(), persisted);
        assert!(!mapper.focus_mode_active());
    }
}
