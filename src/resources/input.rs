//! Per-frame input state.
//!
//! The host shell samples hardware (touch, keys, gamepad) once per frame
//! and feeds the result in here; behaviours only ever consume boolean
//! "did this fire this frame" signals through [`InputState::check_gesture`]
//! and [`InputState::check_action`]. Gesture capture itself is outside the
//! core.

/// Boolean action state with edge tracking.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolState {
    /// Whether the action is currently held this frame.
    pub active: bool,
    /// Whether the action was just pressed this frame.
    pub just_pressed: bool,
    /// Whether the action was just released this frame.
    pub just_released: bool,
}

/// Discrete actions the core reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// The primary confirm button (controller A / space / enter).
    Primary,
    /// Back out of the current screen.
    Back,
}

/// One-shot touch gestures recognised by the host shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Tap,
    Hold,
}

/// Resource capturing the per-frame input relevant to gameplay.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    action_primary: BoolState,
    action_back: BoolState,
    tap: bool,
    hold: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame edges and gestures. The host calls this at the top
    /// of every frame, before feeding the new samples.
    pub fn begin_frame(&mut self) {
        for state in [&mut self.action_primary, &mut self.action_back] {
            state.just_pressed = false;
            state.just_released = false;
        }
        self.tap = false;
        self.hold = false;
    }

    /// Feed a pressed/released transition for an action.
    pub fn set_action(&mut self, action: InputAction, pressed: bool) {
        let state = self.action_state_mut(action);
        if pressed && !state.active {
            state.just_pressed = true;
        }
        if !pressed && state.active {
            state.just_released = true;
        }
        state.active = pressed;
    }

    /// Feed a recognised one-shot gesture for this frame.
    pub fn set_gesture(&mut self, kind: GestureKind) {
        match kind {
            GestureKind::Tap => self.tap = true,
            GestureKind::Hold => self.hold = true,
        }
    }

    /// Did this gesture fire this frame?
    pub fn check_gesture(&self, kind: GestureKind) -> bool {
        match kind {
            GestureKind::Tap => self.tap,
            GestureKind::Hold => self.hold,
        }
    }

    /// Query an action. With `edge_triggered` the check only fires on the
    /// frame the action was pressed; otherwise it reports held state.
    pub fn check_action(&self, action: InputAction, edge_triggered: bool) -> bool {
        let state = self.action_state(action);
        if edge_triggered {
            state.just_pressed
        } else {
            state.active
        }
    }

    fn action_state(&self, action: InputAction) -> &BoolState {
        match action {
            InputAction::Primary => &self.action_primary,
            InputAction::Back => &self.action_back,
        }
    }

    fn action_state_mut(&mut self, action: InputAction) -> &mut BoolState {
        match action {
            InputAction::Primary => &mut self.action_primary,
            InputAction::Back => &mut self.action_back,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_all_inactive() {
        let input = InputState::new();
        assert!(!input.check_action(InputAction::Primary, false));
        assert!(!input.check_action(InputAction::Primary, true));
        assert!(!input.check_gesture(GestureKind::Tap));
        assert!(!input.check_gesture(GestureKind::Hold));
    }

    #[test]
    fn test_edge_fires_only_on_press_frame() {
        let mut input = InputState::new();
        input.set_action(InputAction::Primary, true);
        assert!(input.check_action(InputAction::Primary, true));
        assert!(input.check_action(InputAction::Primary, false));

        input.begin_frame();
        input.set_action(InputAction::Primary, true); // still held
        assert!(!input.check_action(InputAction::Primary, true));
        assert!(input.check_action(InputAction::Primary, false));
    }

    #[test]
    fn test_release_edge() {
        let mut input = InputState::new();
        input.set_action(InputAction::Back, true);
        input.begin_frame();
        input.set_action(InputAction::Back, false);
        assert!(!input.check_action(InputAction::Back, false));
    }

    #[test]
    fn test_gestures_clear_each_frame() {
        let mut input = InputState::new();
        input.set_gesture(GestureKind::Tap);
        assert!(input.check_gesture(GestureKind::Tap));
        input.begin_frame();
        assert!(!input.check_gesture(GestureKind::Tap));
    }
}
