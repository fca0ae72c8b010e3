//! Keyboard, touch and mouse normalization.
//!
//! Continuous intents (left, right, up, down, jump, pause) are read through
//! [`InputHandler::state`]. Discrete actions fire once per press: they are
//! queued for the engine and delivered to registered callbacks.

use crate::input::event::{InputEvent, Key};

/// Share of the viewport width claimed by each side zone.
const SIDE_ZONE: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    pub pause: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Jump,
    Pause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchZone {
    Left,
    Middle,
    Right,
}

impl TouchZone {
    /// Left 30% moves left, right 30% moves right, the middle 40% jumps.
    pub fn for_x(x: f32, viewport_width: f32) -> Self {
        if !(viewport_width > 0.0) || !x.is_finite() {
            return TouchZone::Middle;
        }
        let t = x / viewport_width;
        if t < SIDE_ZONE {
            TouchZone::Left
        } else if t >= 1.0 - SIDE_ZONE {
            TouchZone::Right
        } else {
            TouchZone::Middle
        }
    }
}

pub type ActionListenerId = u64;

type ActionListener = Box<dyn FnMut(InputAction)>;

pub struct InputHandler {
    attached: bool,
    viewport_width: f32,
    held: [bool; Key::COUNT],
    touches: Vec<(u32, TouchZone)>,
    pointer_down: bool,
    pending: Vec<InputAction>,
    gesture: bool,
    listeners: Vec<(ActionListenerId, InputAction, ActionListener)>,
    next_listener: ActionListenerId,
}

impl InputHandler {
    pub fn new(viewport_width: f32) -> Self {
        Self {
            attached: false,
            viewport_width,
            held: [false; Key::COUNT],
            touches: Vec::new(),
            pointer_down: false,
            pending: Vec::new(),
            gesture: false,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Start accepting events. Returns false if already attached.
    pub fn initialize(&mut self) -> bool {
        if self.attached {
            return false;
        }
        self.attached = true;
        log::info!("input: attached");
        true
    }

    /// Stop accepting events and drop every callback.
    pub fn destroy(&mut self) {
        if self.attached {
            log::info!("input: detached");
        }
        self.attached = false;
        self.reset();
        self.listeners.clear();
    }

    /// Clear held keys, touches and queued actions. Stays attached and keeps
    /// callbacks.
    pub fn reset(&mut self) {
        self.held = [false; Key::COUNT];
        self.touches.clear();
        self.pointer_down = false;
        self.pending.clear();
        self.gesture = false;
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn set_viewport(&mut self, width: f32) {
        self.viewport_width = width;
    }

    /// Feed one host event. Returns whether it was consumed.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        if !self.attached {
            return false;
        }
        if event.is_gesture() {
            self.gesture = true;
        }
        match event {
            InputEvent::KeyDown { key } => {
                // Auto-repeat: a held key never re-fires its action.
                if self.held[key.index()] {
                    return true;
                }
                self.held[key.index()] = true;
                match key {
                    Key::Jump | Key::Up => self.fire(InputAction::Jump),
                    Key::Pause => self.fire(InputAction::Pause),
                    Key::Left | Key::Right | Key::Down => {}
                }
            }
            InputEvent::KeyUp { key } => self.held[key.index()] = false,
            InputEvent::TouchStart { id, x, .. } => {
                let zone = TouchZone::for_x(x, self.viewport_width);
                self.touches.retain(|(t, _)| *t != id);
                self.touches.push((id, zone));
                if zone == TouchZone::Middle {
                    self.fire(InputAction::Jump);
                }
            }
            InputEvent::TouchEnd { id: Some(id) } => self.touches.retain(|(t, _)| *t != id),
            InputEvent::TouchEnd { id: None } => self.touches.clear(),
            InputEvent::PointerDown { .. } => {
                if !self.pointer_down {
                    self.pointer_down = true;
                    self.fire(InputAction::Jump);
                }
            }
            InputEvent::PointerUp { .. } => self.pointer_down = false,
            InputEvent::Blur => {
                self.held = [false; Key::COUNT];
                self.touches.clear();
                self.pointer_down = false;
            }
        }
        true
    }

    pub fn state(&self) -> InputState {
        let touching = |zone| self.touches.iter().any(|(_, z)| *z == zone);
        InputState {
            left: self.held[Key::Left.index()] || touching(TouchZone::Left),
            right: self.held[Key::Right.index()] || touching(TouchZone::Right),
            up: self.held[Key::Up.index()],
            down: self.held[Key::Down.index()],
            jump: self.held[Key::Jump.index()]
                || self.held[Key::Up.index()]
                || touching(TouchZone::Middle)
                || self.pointer_down,
            pause: self.held[Key::Pause.index()],
        }
    }

    /// Actions fired since the last call, in order.
    pub fn drain_actions(&mut self) -> Vec<InputAction> {
        std::mem::take(&mut self.pending)
    }

    /// Whether a user gesture arrived since the last call.
    pub fn take_gesture(&mut self) -> bool {
        std::mem::take(&mut self.gesture)
    }

    pub fn on_action(
        &mut self,
        action: InputAction,
        listener: impl FnMut(InputAction) + 'static,
    ) -> ActionListenerId {
        let id = self.next_listener;
        self.next_listener += 1;
        self.listeners.push((id, action, Box::new(listener)));
        id
    }

    pub fn off_action(&mut self, id: ActionListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _, _)| *l != id);
        self.listeners.len() != before
    }

    fn fire(&mut self, action: InputAction) {
        self.pending.push(action);
        for (_, wanted, listener) in self.listeners.iter_mut() {
            if *wanted == action {
                listener(action);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn attached() -> InputHandler {
        let mut h = InputHandler::new(800.0);
        h.initialize();
        h
    }

    #[test]
    fn ignores_events_until_initialized() {
        let mut h = InputHandler::new(800.0);
        assert!(!h.handle_event(InputEvent::KeyDown { key: Key::Left }));
        assert!(!h.state().left);
        assert!(h.initialize());
        assert!(!h.initialize());
        assert!(h.handle_event(InputEvent::KeyDown { key: Key::Left }));
        assert!(h.state().left);
    }

    #[test]
    fn double_initialize_does_not_double_fire() {
        let mut h = InputHandler::new(800.0);
        h.initialize();
        h.initialize();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        h.on_action(InputAction::Jump, move |_| c.set(c.get() + 1));
        h.handle_event(InputEvent::KeyDown { key: Key::Jump });
        assert_eq!(count.get(), 1);
        assert_eq!(h.drain_actions(), vec![InputAction::Jump]);
    }

    #[test]
    fn key_repeat_is_suppressed() {
        let mut h = attached();
        h.handle_event(InputEvent::KeyDown { key: Key::Jump });
        h.handle_event(InputEvent::KeyDown { key: Key::Jump });
        assert_eq!(h.drain_actions().len(), 1);
        h.handle_event(InputEvent::KeyUp { key: Key::Jump });
        h.handle_event(InputEvent::KeyDown { key: Key::Jump });
        assert_eq!(h.drain_actions().len(), 1);
    }

    #[test]
    fn touch_zones() {
        assert_eq!(TouchZone::for_x(100.0, 800.0), TouchZone::Left);
        assert_eq!(TouchZone::for_x(239.0, 800.0), TouchZone::Left);
        assert_eq!(TouchZone::for_x(241.0, 800.0), TouchZone::Middle);
        assert_eq!(TouchZone::for_x(559.0, 800.0), TouchZone::Middle);
        assert_eq!(TouchZone::for_x(561.0, 800.0), TouchZone::Right);
        assert_eq!(TouchZone::for_x(10.0, 0.0), TouchZone::Middle);
    }

    #[test]
    fn multi_touch_tracks_ids() {
        let mut h = attached();
        h.handle_event(InputEvent::TouchStart { id: 1, x: 50.0, y: 0.0 });
        h.handle_event(InputEvent::TouchStart { id: 2, x: 400.0, y: 0.0 });
        let s = h.state();
        assert!(s.left && s.jump && !s.right);
        assert_eq!(h.drain_actions(), vec![InputAction::Jump]);

        h.handle_event(InputEvent::TouchEnd { id: Some(1) });
        assert!(!h.state().left);
        assert!(h.state().jump);
    }

    #[test]
    fn touch_end_without_id_clears_everything() {
        let mut h = attached();
        h.handle_event(InputEvent::TouchStart { id: 1, x: 50.0, y: 0.0 });
        h.handle_event(InputEvent::TouchStart { id: 2, x: 700.0, y: 0.0 });
        h.handle_event(InputEvent::TouchEnd { id: None });
        assert_eq!(h.state(), InputState::default());
    }

    #[test]
    fn mouse_down_jumps() {
        let mut h = attached();
        h.handle_event(InputEvent::PointerDown { x: 10.0, y: 10.0 });
        assert!(h.state().jump);
        assert_eq!(h.drain_actions(), vec![InputAction::Jump]);
        h.handle_event(InputEvent::PointerUp { x: 10.0, y: 10.0 });
        assert!(!h.state().jump);
    }

    #[test]
    fn pause_action_and_gesture() {
        let mut h = attached();
        h.handle_event(InputEvent::KeyDown { key: Key::Pause });
        assert!(h.state().pause);
        assert!(h.take_gesture());
        assert!(!h.take_gesture());
        assert_eq!(h.drain_actions(), vec![InputAction::Pause]);
    }

    #[test]
    fn reset_keeps_listeners_and_attachment() {
        let mut h = attached();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        h.on_action(InputAction::Jump, move |_| c.set(c.get() + 1));
        h.handle_event(InputEvent::KeyDown { key: Key::Jump });
        h.reset();
        assert_eq!(h.state(), InputState::default());
        assert!(h.drain_actions().is_empty());
        assert!(h.is_attached());

        // Held state was cleared, so the next press fires again.
        h.handle_event(InputEvent::KeyDown { key: Key::Jump });
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn destroy_detaches_and_drops_listeners() {
        let mut h = attached();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        h.on_action(InputAction::Pause, move |_| c.set(c.get() + 1));
        h.destroy();
        assert!(!h.handle_event(InputEvent::KeyDown { key: Key::Pause }));
        h.initialize();
        h.handle_event(InputEvent::KeyDown { key: Key::Pause });
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn off_action_unregisters() {
        let mut h = attached();
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let id = h.on_action(InputAction::Jump, move |_| c.set(c.get() + 1));
        assert!(h.off_action(id));
        assert!(!h.off_action(id));
        h.handle_event(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn blur_releases_held_input() {
        let mut h = attached();
        h.handle_event(InputEvent::KeyDown { key: Key::Right });
        h.handle_event(InputEvent::PointerDown { x: 0.0, y: 0.0 });
        h.handle_event(InputEvent::Blur);
        assert_eq!(h.state(), InputState::default());
    }
}
