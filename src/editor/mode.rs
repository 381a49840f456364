//! The interaction mode state machine.
//!
//! Exactly one mode is active at a time; it decides what map clicks and
//! drags mean. Transitions only change which toolbar button is highlighted
//! and which input systems run - they never touch the annotation entities
//! themselves. The concrete placement/draw/edit systems do that.

use bevy::prelude::*;

use crate::route::SignKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Idle,
    /// One sign of the given kind will be placed on the next map click.
    PlaceSign(SignKind),
    DrawPath,
    EditPath,
    /// Entered after a save. All mutation entry points are disabled until
    /// the user re-enters edit mode.
    Locked,
}

#[derive(Resource, Default)]
pub struct CurrentMode {
    pub mode: EditorMode,
}

impl CurrentMode {
    /// Select a sign kind from the toolbar. Re-selecting the active kind
    /// toggles back to idle; selecting while drawing or editing cancels
    /// those. No-op while locked.
    pub fn toggle_place(&mut self, kind: SignKind) {
        self.mode = match self.mode {
            EditorMode::Locked => EditorMode::Locked,
            EditorMode::PlaceSign(current) if current == kind => EditorMode::Idle,
            _ => EditorMode::PlaceSign(kind),
        };
    }

    /// Activate or deactivate the path draw tool. Cancels sign placement
    /// and vertex editing. No-op while locked.
    pub fn toggle_draw(&mut self) {
        self.mode = match self.mode {
            EditorMode::Locked => EditorMode::Locked,
            EditorMode::DrawPath => EditorMode::Idle,
            _ => EditorMode::DrawPath,
        };
    }

    /// Activate or deactivate the vertex edit tool. This is also the only
    /// way out of the locked state.
    pub fn toggle_edit(&mut self) {
        self.mode = match self.mode {
            EditorMode::EditPath => EditorMode::Idle,
            _ => EditorMode::EditPath,
        };
    }

    /// Placement is single-shot: one successful placement returns to idle.
    pub fn finish_placement(&mut self) {
        if matches!(self.mode, EditorMode::PlaceSign(_)) {
            self.mode = EditorMode::Idle;
        }
    }

    /// A committed line ends the draw interaction.
    pub fn finish_drawing(&mut self) {
        if self.mode == EditorMode::DrawPath {
            self.mode = EditorMode::Idle;
        }
    }

    /// Entered on save from any state.
    pub fn lock(&mut self) {
        self.mode = EditorMode::Locked;
    }

    /// A confirmed clear-all drops the lock along with the annotation.
    pub fn unlock(&mut self) {
        if self.mode == EditorMode::Locked {
            self.mode = EditorMode::Idle;
        }
    }

    pub fn is_locked(&self) -> bool {
        self.mode == EditorMode::Locked
    }

    /// The sign kind armed for placement, if any.
    pub fn placing_kind(&self) -> Option<SignKind> {
        match self.mode {
            EditorMode::PlaceSign(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn is_drawing(&self) -> bool {
        self.mode == EditorMode::DrawPath
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditorMode::EditPath
    }

    /// Existing signs may be dragged while idle or editing, never while a
    /// placement or draw interaction owns the pointer, and never locked.
    pub fn allows_sign_drag(&self) -> bool {
        matches!(self.mode, EditorMode::Idle | EditorMode::EditPath)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_idle() {
        assert_eq!(CurrentMode::default().mode, EditorMode::Idle);
    }

    #[test]
    fn test_toggle_place_arms_and_disarms() {
        let mut mode = CurrentMode::default();
        mode.toggle_place(SignKind::Stop);
        assert_eq!(mode.mode, EditorMode::PlaceSign(SignKind::Stop));

        // Re-selecting the same kind toggles back to idle
        mode.toggle_place(SignKind::Stop);
        assert_eq!(mode.mode, EditorMode::Idle);
    }

    #[test]
    fn test_selecting_other_kind_switches() {
        let mut mode = CurrentMode::default();
        mode.toggle_place(SignKind::Stop);
        mode.toggle_place(SignKind::Priority);
        assert_eq!(mode.mode, EditorMode::PlaceSign(SignKind::Priority));
    }

    #[test]
    fn test_placement_is_single_shot() {
        let mut mode = CurrentMode::default();
        mode.toggle_place(SignKind::Zone30);
        mode.finish_placement();
        assert_eq!(mode.mode, EditorMode::Idle);
    }

    #[test]
    fn test_finish_placement_noop_outside_placing() {
        let mut mode = CurrentMode::default();
        mode.toggle_draw();
        mode.finish_placement();
        assert_eq!(mode.mode, EditorMode::DrawPath);
    }

    #[test]
    fn test_draw_and_place_are_mutually_exclusive() {
        let mut mode = CurrentMode::default();
        mode.toggle_place(SignKind::Stop);
        mode.toggle_draw();
        assert_eq!(mode.mode, EditorMode::DrawPath);
        assert!(mode.placing_kind().is_none());

        mode.toggle_place(SignKind::Stop);
        assert_eq!(mode.mode, EditorMode::PlaceSign(SignKind::Stop));
        assert!(!mode.is_drawing());
    }

    #[test]
    fn test_drawing_finishes_to_idle() {
        let mut mode = CurrentMode::default();
        mode.toggle_draw();
        mode.finish_drawing();
        assert_eq!(mode.mode, EditorMode::Idle);
    }

    #[test]
    fn test_edit_toggles() {
        let mut mode = CurrentMode::default();
        mode.toggle_edit();
        assert!(mode.is_editing());
        mode.toggle_edit();
        assert_eq!(mode.mode, EditorMode::Idle);
    }

    #[test]
    fn test_lock_from_any_state() {
        for initial in [
            EditorMode::Idle,
            EditorMode::PlaceSign(SignKind::Stop),
            EditorMode::DrawPath,
            EditorMode::EditPath,
        ] {
            let mut mode = CurrentMode { mode: initial };
            mode.lock();
            assert!(mode.is_locked(), "lock should win from {:?}", initial);
        }
    }

    #[test]
    fn test_locked_rejects_place_and_draw() {
        let mut mode = CurrentMode::default();
        mode.lock();

        mode.toggle_place(SignKind::Stop);
        assert!(mode.is_locked());

        mode.toggle_draw();
        assert!(mode.is_locked());
    }

    #[test]
    fn test_edit_is_the_only_unlock() {
        let mut mode = CurrentMode::default();
        mode.lock();
        mode.toggle_edit();
        assert_eq!(mode.mode, EditorMode::EditPath);
    }

    #[test]
    fn test_unlock_after_confirmed_clear() {
        let mut mode = CurrentMode::default();
        mode.lock();
        mode.unlock();
        assert_eq!(mode.mode, EditorMode::Idle);

        // Not locked: unlock leaves the mode alone
        mode.toggle_draw();
        mode.unlock();
        assert_eq!(mode.mode, EditorMode::DrawPath);
    }

    #[test]
    fn test_sign_drag_gating() {
        let mut mode = CurrentMode::default();
        assert!(mode.allows_sign_drag());

        mode.toggle_edit();
        assert!(mode.allows_sign_drag());

        mode.toggle_draw();
        assert!(!mode.allows_sign_drag());

        mode.toggle_place(SignKind::Stop);
        assert!(!mode.allows_sign_drag());

        mode.lock();
        assert!(!mode.allows_sign_drag());
    }

    #[test]
    fn test_at_most_one_interaction_active() {
        // Walk through a sequence of toggles; the mode enum itself
        // guarantees exclusivity, this documents the property.
        let mut mode = CurrentMode::default();
        mode.toggle_place(SignKind::Priority);
        mode.toggle_edit();
        assert!(mode.is_editing() && mode.placing_kind().is_none() && !mode.is_drawing());
        mode.toggle_draw();
        assert!(mode.is_drawing() && !mode.is_editing());
    }
}
