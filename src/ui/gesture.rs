// src/ui/gesture.rs
//! Horizontal drag recognition with a touch-slop threshold
//!
//! A press is undecided until the pointer travels further than the slop
//! along the x axis. Past that point the gesture belongs to the container
//! for the rest of its lifetime; before it, events keep flowing to children
//! so a tap still reaches them.

use log::debug;

use crate::ui::core::TouchEvent;

/// Baseline touch slop in density-independent pixels
pub const DEFAULT_TOUCH_SLOP_DP: u32 = 8;

/// Minimum horizontal travel, in physical pixels, before a press becomes a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchSlop(pub u32);

impl TouchSlop {
    /// Scale a slop given in dp by the display density (1.0 = 160 dpi)
    pub fn scaled(slop_dp: u32, density: f32) -> Self {
        let px = libm::roundf(slop_dp as f32 * density.max(0.0));
        Self(px as u32)
    }

    pub fn pixels(&self) -> u32 {
        self.0
    }
}

impl Default for TouchSlop {
    fn default() -> Self {
        Self(DEFAULT_TOUCH_SLOP_DP)
    }
}

/// Recogniser state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    /// No gesture in progress
    Idle,
    /// Pressed, not yet far enough to count as a drag
    Undecided { start_x: i32, prev_x: i32 },
    /// Gesture claimed; `prev_x` is the last seen position
    Dragging { prev_x: i32 },
}

/// What the recogniser made of one event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureUpdate {
    /// Event does not belong to a gesture the recogniser tracks
    Ignored,
    /// Gesture still undecided; children should see the event
    Pending,
    /// This move crossed the slop; the container now owns the gesture
    Claimed,
    /// Scroll the content by this many pixels (positive moves content left)
    Scroll(i32),
    /// Gesture finished; `was_dragging` tells whether the container owned it
    Finished { was_dragging: bool },
}

/// Touch-slop drag recogniser for the horizontal axis
#[derive(Debug, Clone, Copy)]
pub struct DragGesture {
    slop: TouchSlop,
    state: DragState,
}

impl DragGesture {
    pub fn new(slop: TouchSlop) -> Self {
        Self {
            slop,
            state: DragState::Idle,
        }
    }

    pub fn slop(&self) -> TouchSlop {
        self.slop
    }

    pub fn set_slop(&mut self, slop: TouchSlop) {
        self.slop = slop;
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// True once the current gesture has been claimed
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// Feed one touch event through the state machine
    pub fn on_event(&mut self, event: TouchEvent) -> GestureUpdate {
        match event {
            TouchEvent::Press(point) => {
                let x = point.x as i32;
                self.state = DragState::Undecided {
                    start_x: x,
                    prev_x: x,
                };
                GestureUpdate::Pending
            }
            TouchEvent::Move(point) => {
                let x = point.x as i32;
                match self.state {
                    DragState::Idle => GestureUpdate::Ignored,
                    DragState::Undecided { start_x, .. } => {
                        if (x - start_x).unsigned_abs() > self.slop.0 {
                            debug!("drag claimed at x={} (start {})", x, start_x);
                            self.state = DragState::Dragging { prev_x: x };
                            GestureUpdate::Claimed
                        } else {
                            self.state = DragState::Undecided { start_x, prev_x: x };
                            GestureUpdate::Pending
                        }
                    }
                    DragState::Dragging { prev_x } => {
                        self.state = DragState::Dragging { prev_x: x };
                        GestureUpdate::Scroll(prev_x - x)
                    }
                }
            }
            TouchEvent::Release(_) | TouchEvent::Cancel => {
                let update = match self.state {
                    DragState::Idle => GestureUpdate::Ignored,
                    DragState::Undecided { .. } => GestureUpdate::Finished {
                        was_dragging: false,
                    },
                    DragState::Dragging { .. } => GestureUpdate::Finished { was_dragging: true },
                };
                self.state = DragState::Idle;
                update
            }
        }
    }

    /// Drop any gesture in progress
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
    }
}

impl Default for DragGesture {
    fn default() -> Self {
        Self::new(TouchSlop::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::core::TouchPoint;

    fn press(x: u16) -> TouchEvent {
        TouchEvent::Press(TouchPoint::new(x, 10))
    }

    fn move_to(x: u16) -> TouchEvent {
        TouchEvent::Move(TouchPoint::new(x, 10))
    }

    #[test]
    fn test_slop_scales_with_density() {
        assert_eq!(TouchSlop::scaled(8, 1.0), TouchSlop(8));
        assert_eq!(TouchSlop::scaled(8, 2.75), TouchSlop(22));
        assert_eq!(TouchSlop::scaled(8, -1.0), TouchSlop(0));
    }

    #[test]
    fn test_movement_within_slop_stays_pending() {
        let mut gesture = DragGesture::new(TouchSlop(8));
        assert_eq!(gesture.on_event(press(0)), GestureUpdate::Pending);
        assert_eq!(gesture.on_event(move_to(7)), GestureUpdate::Pending);
        // Exactly the slop is still a tap.
        assert_eq!(gesture.on_event(move_to(8)), GestureUpdate::Pending);
        assert!(!gesture.is_dragging());
    }

    #[test]
    fn test_crossing_slop_claims_then_scrolls_by_delta() {
        let mut gesture = DragGesture::new(TouchSlop(8));
        gesture.on_event(press(0));
        assert_eq!(gesture.on_event(move_to(7)), GestureUpdate::Pending);
        assert_eq!(gesture.on_event(move_to(9)), GestureUpdate::Claimed);
        assert!(gesture.is_dragging());

        assert_eq!(gesture.on_event(move_to(20)), GestureUpdate::Scroll(-11));
        assert_eq!(gesture.on_event(move_to(15)), GestureUpdate::Scroll(5));
        assert_eq!(gesture.on_event(move_to(15)), GestureUpdate::Scroll(0));
    }

    #[test]
    fn test_leftward_drag_claims_on_absolute_distance() {
        let mut gesture = DragGesture::new(TouchSlop(8));
        gesture.on_event(press(100));
        assert_eq!(gesture.on_event(move_to(91)), GestureUpdate::Claimed);
        assert_eq!(gesture.on_event(move_to(81)), GestureUpdate::Scroll(10));
    }

    #[test]
    fn test_release_and_cancel_reset_to_idle() {
        let mut gesture = DragGesture::new(TouchSlop(8));
        gesture.on_event(press(0));
        gesture.on_event(move_to(30));
        assert_eq!(
            gesture.on_event(TouchEvent::Release(TouchPoint::new(30, 10))),
            GestureUpdate::Finished { was_dragging: true }
        );
        assert_eq!(gesture.state(), DragState::Idle);

        gesture.on_event(press(50));
        assert_eq!(
            gesture.on_event(TouchEvent::Cancel),
            GestureUpdate::Finished {
                was_dragging: false
            }
        );
        assert_eq!(gesture.state(), DragState::Idle);
    }

    #[test]
    fn test_new_press_ignores_previous_history() {
        let mut gesture = DragGesture::new(TouchSlop(8));
        gesture.on_event(press(0));
        gesture.on_event(move_to(40));
        gesture.on_event(TouchEvent::Cancel);

        gesture.on_event(press(200));
        assert_eq!(
            gesture.state(),
            DragState::Undecided {
                start_x: 200,
                prev_x: 200
            }
        );
        assert_eq!(gesture.on_event(move_to(205)), GestureUpdate::Pending);
    }

    #[test]
    fn test_moves_without_press_are_ignored() {
        let mut gesture = DragGesture::default();
        assert_eq!(gesture.on_event(move_to(100)), GestureUpdate::Ignored);
        assert_eq!(gesture.on_event(TouchEvent::Cancel), GestureUpdate::Ignored);
    }
}
