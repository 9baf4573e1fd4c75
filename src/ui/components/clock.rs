// src/ui/components/clock.rs
//! Analog clock face with hour, minute and second hands
//!
//! Each hand is a line from the center of the clock's bounds. A hand with
//! period `P` at wall-clock time `t` points at
//! `θ = 2π·(t mod P)/P − π/2`, so zero elapsed time points straight up.
//!
//! The clock animates itself: once a frame has been presented
//! ([`Drawable::mark_clean`]) it schedules the next one a fixed interval
//! later. The chain stops when the clock is detached or dropped.

use core::f64::consts::PI;

use embassy_time::{Duration, Instant};
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::{IntoStorage, Rgb565};
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::redraw::{CancelToken, DEFAULT_REDRAW_INTERVAL, RedrawSchedule};
use crate::time::{MILLIS_IN_12_HOURS, MILLIS_IN_HOUR, MILLIS_IN_MINUTE, TimeSource};
use crate::ui::core::{DirtyRegion, Drawable};
use crate::ui::measure::{Layout, MeasureMode, MeasureSpec};
use crate::ui::styling::{Attributes, Style};

/// Angle of a hand, in radians, `time_ms` into a cycle of `period_ms`.
///
/// Zero elapsed time gives `-π/2` (straight up in screen coordinates).
pub fn hand_angle(period_ms: u64, time_ms: u64) -> f64 {
    if period_ms == 0 {
        return -PI / 2.0;
    }
    2.0 * PI * (time_ms % period_ms) as f64 / period_ms as f64 - PI / 2.0
}

/// Middle of `bounds`, rounded down
fn face_center(bounds: Rectangle) -> Point {
    bounds.top_left
        + Point::new(
            (bounds.size.width / 2) as i32,
            (bounds.size.height / 2) as i32,
        )
}

/// One clock hand: length, stroke width and the period of a full turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockHand {
    pub radius: u32,
    pub width: u32,
    pub period_ms: u64,
}

impl ClockHand {
    pub const fn new(radius: u32, width: u32, period_ms: u64) -> Self {
        Self {
            radius,
            width,
            period_ms,
        }
    }

    pub fn angle(&self, time_ms: u64) -> f64 {
        hand_angle(self.period_ms, time_ms)
    }

    /// Pixel the hand reaches at `time_ms` when drawn from `center`
    pub fn tip(&self, center: Point, time_ms: u64) -> Point {
        let angle = self.angle(time_ms);
        let radius = self.radius as f64;
        center
            + Point::new(
                libm::round(libm::cos(angle) * radius) as i32,
                libm::round(libm::sin(angle) * radius) as i32,
            )
    }

    pub fn is_visible(&self) -> bool {
        self.radius > 0 && self.width > 0
    }
}

/// Hand geometry and color, as read from styling attributes or config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockStyle {
    pub hour_radius: u32,
    pub hour_width: u32,
    pub minute_radius: u32,
    pub minute_width: u32,
    pub second_radius: u32,
    pub second_width: u32,
    /// Packed RGB565
    pub arrow_color: u16,
}

impl ClockStyle {
    /// Read the clock attributes; anything missing reads as zero
    pub fn from_attributes(attrs: &Attributes<'_>) -> Self {
        Self {
            hour_radius: attrs.dimension_px("hour_radius"),
            hour_width: attrs.dimension_px("hour_width"),
            minute_radius: attrs.dimension_px("minute_radius"),
            minute_width: attrs.dimension_px("minute_width"),
            second_radius: attrs.dimension_px("second_radius"),
            second_width: attrs.dimension_px("second_width"),
            arrow_color: attrs.color("arrow_color").into_storage(),
        }
    }

    pub fn color(&self) -> Rgb565 {
        Rgb565::from(RawU16::new(self.arrow_color))
    }
}

/// Per-frame snapshot taken at the start of a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderState {
    pub center: Point,
    pub wall_ms: u64,
    pub frame: Instant,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            center: Point::zero(),
            wall_ms: 0,
            frame: Instant::from_millis(0),
        }
    }
}

/// Analog clock widget
pub struct ClockView {
    bounds: Rectangle,
    measured: Size,
    hour: ClockHand,
    minute: ClockHand,
    second: ClockHand,
    color: Rgb565,
    face: Style,
    min_size: Option<Size>,
    state: RenderState,
    schedule: RedrawSchedule,
    dirty: bool,
}

impl ClockView {
    pub fn new(style: &ClockStyle) -> Self {
        Self {
            bounds: Rectangle::zero(),
            measured: Size::zero(),
            hour: ClockHand::new(style.hour_radius, style.hour_width, MILLIS_IN_12_HOURS),
            minute: ClockHand::new(style.minute_radius, style.minute_width, MILLIS_IN_HOUR),
            second: ClockHand::new(style.second_radius, style.second_width, MILLIS_IN_MINUTE),
            color: style.color(),
            face: Style::new(),
            min_size: None,
            state: RenderState::default(),
            schedule: RedrawSchedule::new(DEFAULT_REDRAW_INTERVAL),
            dirty: true,
        }
    }

    pub fn from_attributes(attrs: &Attributes<'_>) -> Self {
        Self::new(&ClockStyle::from_attributes(attrs))
    }

    /// Background/border drawn behind the hands
    pub fn with_face(mut self, face: Style) -> Self {
        self.face = face;
        self
    }

    /// Size used when the parent leaves both dimensions unspecified
    pub fn with_min_size(mut self, size: Size) -> Self {
        self.min_size = Some(size);
        self
    }

    pub fn with_redraw_interval(mut self, interval: Duration) -> Self {
        self.schedule = RedrawSchedule::new(interval);
        self
    }

    /// Hour, minute and second hands in that order
    pub fn hands(&self) -> [ClockHand; 3] {
        [self.hour, self.minute, self.second]
    }

    pub fn color(&self) -> Rgb565 {
        self.color
    }

    pub fn render_state(&self) -> RenderState {
        self.state
    }

    /// Line segments `(from, to, stroke width)` for the current frame
    pub fn hand_segments(&self) -> [(Point, Point, u32); 3] {
        let center = self.state.center;
        let segment = |hand: ClockHand| (center, hand.tip(center, self.state.wall_ms), hand.width);
        [segment(self.hour), segment(self.minute), segment(self.second)]
    }

    fn minimum_size(&self) -> Size {
        self.min_size.unwrap_or_else(|| {
            let longest = self
                .hands()
                .iter()
                .map(|hand| hand.radius)
                .max()
                .unwrap_or(0);
            Size::new(longest * 2, longest * 2)
        })
    }

    /// Start a new frame: take the center and current time
    pub fn update<T: TimeSource>(&mut self, time: &T) {
        self.state = RenderState {
            center: face_center(self.bounds),
            wall_ms: time.wall_clock_ms(),
            frame: time.now(),
        };
        self.dirty = true;
    }

    /// Start a new frame if the scheduled redraw is due.
    ///
    /// Returns true when the clock needs to be drawn.
    pub fn poll_redraw<T: TimeSource>(&mut self, time: &T) -> bool {
        if self.schedule.poll(time.now()) {
            self.update(time);
            true
        } else {
            false
        }
    }

    /// Next time the clock wants to be drawn
    pub fn next_redraw(&self) -> Option<Instant> {
        self.schedule.next_due()
    }

    /// Token to hand to an async redraw driver
    pub fn redraw_token(&self) -> CancelToken {
        self.schedule.token()
    }

    /// Remove the clock from the render tree; no more redraws are scheduled
    pub fn detach(&mut self) {
        if !self.schedule.is_cancelled() {
            debug!("clock detached, stopping redraws");
        }
        self.schedule.cancel();
    }

    pub fn is_detached(&self) -> bool {
        self.schedule.is_cancelled()
    }
}

impl Drop for ClockView {
    fn drop(&mut self) {
        self.schedule.cancel();
    }
}

impl Layout for ClockView {
    fn measure(&mut self, width: MeasureSpec, height: MeasureSpec) -> Size {
        use MeasureMode::*;

        let (w, h) = (width.size, height.size);
        self.measured = match (width.mode, height.mode) {
            (Exact, Exact) => Size::new(w, h),
            (Exact, AtMost) => Size::new(w, w.min(h)),
            (Exact, Unspecified) => Size::new(w, w),
            (AtMost, Exact) => Size::new(w.min(h), h),
            (AtMost, AtMost) => {
                let side = w.min(h);
                Size::new(side, side)
            }
            (AtMost, Unspecified) => Size::new(w, w),
            (Unspecified, Unspecified) => self.minimum_size(),
            (Unspecified, _) => Size::new(h, h),
        };
        self.measured
    }

    fn measured_size(&self) -> Size {
        self.measured
    }

    fn place(&mut self, bounds: Rectangle) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.state.center = face_center(bounds);
            self.dirty = true;
        }
    }
}

impl Drawable for ClockView {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        if self.face.has_fill_or_border() {
            self.bounds
                .into_styled(self.face.to_primitive_style())
                .draw(display)?;
        }

        let center = self.state.center;
        for hand in self.hands() {
            if !hand.is_visible() {
                continue;
            }
            Line::new(center, hand.tip(center, self.state.wall_ms))
                .into_styled(PrimitiveStyle::with_stroke(self.color, hand.width))
                .draw(display)?;
        }

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Called once the frame is on screen; queues the next one
    fn mark_clean(&mut self) {
        self.dirty = false;
        self.schedule.request_after(self.state.frame);
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn dirty_region(&self) -> Option<DirtyRegion> {
        if self.dirty {
            Some(DirtyRegion::new(self.bounds))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::ManualClock;
    use crate::ui::styling::AttrValue;
    use embedded_graphics::mock_display::MockDisplay;

    const EPSILON: f64 = 1e-9;

    fn style() -> ClockStyle {
        ClockStyle {
            hour_radius: 10,
            hour_width: 3,
            minute_radius: 20,
            minute_width: 2,
            second_radius: 25,
            second_width: 1,
            arrow_color: Rgb565::RED.into_storage(),
        }
    }

    fn placed_clock() -> ClockView {
        let mut clock = ClockView::new(&style());
        clock.measure(MeasureSpec::exact(60), MeasureSpec::exact(60));
        clock.place(Rectangle::new(Point::zero(), Size::new(60, 60)));
        clock
    }

    #[test]
    fn test_hand_angle_starts_straight_up() {
        for period in [MILLIS_IN_12_HOURS, MILLIS_IN_HOUR, MILLIS_IN_MINUTE] {
            assert!((hand_angle(period, 0) + PI / 2.0).abs() < EPSILON);
            // Exactly one period later the hand is back at the start
            assert!((hand_angle(period, period) + PI / 2.0).abs() < EPSILON);
            assert!((hand_angle(period, 5 * period) + PI / 2.0).abs() < EPSILON);
        }
    }

    #[test]
    fn test_hand_angle_quarters() {
        assert!(hand_angle(MILLIS_IN_12_HOURS, 3 * MILLIS_IN_HOUR).abs() < EPSILON);
        assert!((hand_angle(MILLIS_IN_HOUR, 30 * MILLIS_IN_MINUTE) - PI / 2.0).abs() < EPSILON);
        assert!((hand_angle(MILLIS_IN_MINUTE, 45_000) - PI).abs() < EPSILON);
    }

    #[test]
    fn test_hand_angle_increases_within_period() {
        let mut last = hand_angle(MILLIS_IN_MINUTE, 0);
        for t in (1_000..MILLIS_IN_MINUTE).step_by(1_000) {
            let angle = hand_angle(MILLIS_IN_MINUTE, t);
            assert!(angle > last);
            last = angle;
        }
    }

    #[test]
    fn test_tips_follow_the_clock_face() {
        let center = Point::new(30, 30);
        let hand = ClockHand::new(10, 1, MILLIS_IN_MINUTE);
        assert_eq!(hand.tip(center, 0), Point::new(30, 20));
        assert_eq!(hand.tip(center, 15_000), Point::new(40, 30));
        assert_eq!(hand.tip(center, 30_000), Point::new(30, 40));
        assert_eq!(hand.tip(center, 45_000), Point::new(20, 30));
    }

    #[test]
    fn test_measure_table() {
        let mut clock = ClockView::new(&style());
        let e = MeasureSpec::exact;
        let a = MeasureSpec::at_most;
        let u = MeasureSpec::unspecified;

        assert_eq!(clock.measure(e(80), e(50)), Size::new(80, 50));
        assert_eq!(clock.measure(e(80), a(50)), Size::new(80, 50));
        assert_eq!(clock.measure(e(40), a(50)), Size::new(40, 40));
        assert_eq!(clock.measure(e(40), u()), Size::new(40, 40));
        assert_eq!(clock.measure(a(80), e(50)), Size::new(50, 50));
        assert_eq!(clock.measure(a(80), a(50)), Size::new(50, 50));
        assert_eq!(clock.measure(a(80), u()), Size::new(80, 80));
        assert_eq!(clock.measure(u(), e(70)), Size::new(70, 70));
        assert_eq!(clock.measure(u(), a(70)), Size::new(70, 70));
        // Longest hand is 25px
        assert_eq!(clock.measure(u(), u()), Size::new(50, 50));

        let mut clock = ClockView::new(&style()).with_min_size(Size::new(12, 9));
        assert_eq!(clock.measure(u(), u()), Size::new(12, 9));
    }

    #[test]
    fn test_attributes_default_to_invisible_hands() {
        let clock = ClockView::from_attributes(&Attributes::empty());
        assert!(clock.hands().iter().all(|hand| !hand.is_visible()));
        assert_eq!(clock.color(), Rgb565::BLACK);

        let entries = [
            ("second_radius", AttrValue::Dimension(12.0)),
            ("second_width", AttrValue::Dimension(1.0)),
        ];
        let clock = ClockView::from_attributes(&Attributes::new(&entries));
        let [hour, minute, second] = clock.hands();
        assert!(!hour.is_visible());
        assert!(!minute.is_visible());
        assert_eq!(second, ClockHand::new(12, 1, MILLIS_IN_MINUTE));
    }

    #[test]
    fn test_segments_use_frame_time() {
        let mut clock = placed_clock();
        // 03:00:00 -> hour right, minute and second up
        let time = ManualClock::new(3 * MILLIS_IN_HOUR);
        clock.update(&time);

        let [hour, minute, second] = clock.hand_segments();
        assert_eq!(hour, (Point::new(30, 30), Point::new(40, 30), 3));
        assert_eq!(minute, (Point::new(30, 30), Point::new(30, 10), 2));
        assert_eq!(second, (Point::new(30, 30), Point::new(30, 5), 1));
    }

    #[test]
    fn test_redraw_every_interval_after_present() {
        let mut clock = placed_clock();
        let mut time = ManualClock::new(0);

        clock.update(&time);
        assert!(clock.is_dirty());
        clock.mark_clean();
        assert_eq!(clock.next_redraw(), Some(Instant::from_millis(100)));

        time.advance_ms(99);
        assert!(!clock.poll_redraw(&time));
        time.advance_ms(1);
        assert!(clock.poll_redraw(&time));
        assert!(clock.is_dirty());
        assert_eq!(clock.render_state().wall_ms, 100);

        // Nothing new is queued until this frame is presented
        time.advance_ms(500);
        assert!(!clock.poll_redraw(&time));
        clock.mark_clean();
        assert_eq!(clock.next_redraw(), Some(Instant::from_millis(200)));
    }

    #[test]
    fn test_detach_stops_redraw_chain() {
        let mut clock = placed_clock();
        let mut time = ManualClock::new(0);
        let token = clock.redraw_token();

        clock.update(&time);
        clock.mark_clean();
        clock.detach();

        time.advance_ms(1_000);
        assert!(!clock.poll_redraw(&time));
        clock.mark_clean();
        assert_eq!(clock.next_redraw(), None);
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_drop_cancels_token() {
        let clock = placed_clock();
        let token = clock.redraw_token();
        drop(clock);
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_draw_puts_hands_on_screen() {
        let mut display = MockDisplay::<Rgb565>::new();
        display.set_allow_overdraw(true);

        let mut clock = placed_clock();
        clock.update(&ManualClock::new(0));
        clock.draw(&mut display).unwrap();

        // All three hands point up at midnight; the second hand reaches y = 5
        assert_eq!(display.get_pixel(Point::new(30, 5)), Some(Rgb565::RED));
        assert_eq!(display.get_pixel(Point::new(30, 31)), None);
    }

    #[test]
    fn test_invisible_hands_draw_nothing() {
        let mut display = MockDisplay::<Rgb565>::new();
        let mut clock = ClockView::new(&ClockStyle::default());
        clock.measure(MeasureSpec::exact(40), MeasureSpec::exact(40));
        clock.place(Rectangle::new(Point::zero(), Size::new(40, 40)));
        clock.update(&ManualClock::new(12_345));
        clock.draw(&mut display).unwrap();

        assert!(display.affected_area().is_zero_sized());
    }
}
