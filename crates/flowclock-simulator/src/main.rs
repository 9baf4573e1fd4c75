//! Desktop simulator for the flowclock widgets.
//!
//! Shows an analog clock above a sideways-scrolling flow of buttons and
//! labels in an SDL2 window via `embedded-graphics-simulator`.
//!
//! # Key bindings
//!
//! | Key | Action                          |
//! |-----|---------------------------------|
//! | D   | Detach the clock (stops redraws) |
//! | R   | Reset the scroll offset         |
//! | Q   | Quit                            |
//!
//! Mouse drags are forwarded as touch events. Pass the path of a
//! postcard-encoded `WidgetConfig` as the first argument to override the
//! built-in settings.

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use embassy_futures::block_on;
use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{info, warn};

use flowclock::config::WidgetConfig;
use flowclock::redraw::{REDRAW_CHANNEL, RedrawRequest, redraw_task};
use flowclock::time::EmbassyClock;
use flowclock::ui::components::ClockStyle;
use flowclock::ui::styling::{COLOR_BACKGROUND, COLOR_STROKE, COLOR_SURFACE, Padding};
use flowclock::ui::{
    Action, Button, ButtonVariant, ClockView, Drawable, Element, FlowLayout, Label,
    ScrollingFlowLayout,
    SizeConstraint, Style, TextSize, TouchEvent, TouchPoint, TouchResult, Touchable, layout_in,
};

// ---------------------------------------------------------------------------
// Display constants
// ---------------------------------------------------------------------------

const DISPLAY_WIDTH_PX: u32 = 320;
const DISPLAY_HEIGHT_PX: u32 = 240;

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 2;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Id the clock's redraw task reports under.
const CLOCK_WIDGET_ID: u16 = 1;

const CLOCK_AREA: Rectangle = Rectangle::new(Point::new(0, 0), Size::new(DISPLAY_WIDTH_PX, 150));
const STRIP_AREA: Rectangle = Rectangle::new(
    Point::new(0, 150),
    Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX - 150),
);

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn demo_config() -> WidgetConfig {
    WidgetConfig {
        clock: ClockStyle {
            hour_radius: 40,
            hour_width: 5,
            minute_radius: 58,
            minute_width: 3,
            second_radius: 64,
            second_width: 1,
            arrow_color: Rgb565::CSS_ORANGE.into_storage(),
        },
        ..WidgetConfig::default()
    }
}

/// Load the config named on the command line, falling back to the demo one.
fn load_config() -> WidgetConfig {
    let Some(path) = std::env::args().nth(1) else {
        return demo_config();
    };

    match std::fs::read(&path) {
        Ok(bytes) => match WidgetConfig::from_bytes(&bytes) {
            Ok(config) => {
                info!("Loaded config from {}", path);
                config
            }
            Err(e) => {
                warn!("{}: {}; using built-in config", path, e);
                demo_config()
            }
        },
        Err(e) => {
            warn!("Cannot read {}: {}; using built-in config", path, e);
            demo_config()
        }
    }
}

fn epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Strip of buttons and labels that can be dragged sideways
fn create_strip(config: &WidgetConfig) -> ScrollingFlowLayout<16> {
    let mut flow = FlowLayout::new().with_style(
        Style::new()
            .with_background(COLOR_SURFACE)
            .with_border(COLOR_STROKE, 1)
            .with_padding(Padding::all(6)),
    );

    let items: [Element; 8] = [
        Element::label("Alarms", TextSize::Large),
        Button::new("06:30", Action::Tap(1)).into(),
        Button::new("07:15", Action::Tap(2))
            .with_variant(ButtonVariant::Secondary)
            .into(),
        Button::new("Weekend", Action::Tap(3))
            .with_variant(ButtonVariant::Outline)
            .into(),
        Label::new("Drag sideways to scroll the strip", TextSize::Medium).into(),
        Button::new("Snooze", Action::Tap(4)).into(),
        Button::new("Off", Action::Tap(5))
            .with_variant(ButtonVariant::Text)
            .into(),
        Element::spacer(Size::new(120, 4)),
    ];

    for item in items {
        if let Err(e) = flow.add_child(item, SizeConstraint::Fit) {
            warn!("Dropping strip item: {}", e);
        }
    }

    // A small clock riding along in the strip
    let mini = ClockStyle {
        hour_radius: 9,
        hour_width: 3,
        minute_radius: 14,
        minute_width: 2,
        second_radius: 16,
        second_width: 1,
        ..config.clock
    };
    let clock = ClockView::new(&mini).with_redraw_interval(config.redraw_interval());
    if let Err(e) = flow.add_child(clock, SizeConstraint::Fixed(40)) {
        warn!("Dropping strip clock: {}", e);
    }

    ScrollingFlowLayout::from_flow(flow, config.touch_slop())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();
    info!("Starting flowclock simulator");
    info!(
        "Display: {}×{} (scale {}×)",
        DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX, WINDOW_SCALE
    );
    info!("Keys: D=Detach clock  R=Reset scroll  Q=Quit");

    let config = load_config();
    let time = EmbassyClock::new(epoch_ms());

    let mut clock = ClockView::new(&config.clock)
        .with_face(Style::new().with_background(COLOR_BACKGROUND))
        .with_redraw_interval(config.redraw_interval());
    layout_in(&mut clock, CLOCK_AREA);
    clock.update(&time);

    let mut strip = create_strip(&config);
    layout_in(&mut strip, STRIP_AREA);

    // Redraw requests for the clock arrive through the shared channel
    let token = clock.redraw_token();
    let interval = config.redraw_interval();
    std::thread::spawn(move || {
        block_on(redraw_task(
            token,
            interval,
            CLOCK_WIDGET_ID,
            REDRAW_CHANNEL.sender(),
        ))
    });

    // SDL2 display and window
    let mut display = SimulatorDisplay::<Rgb565>::new(Size::new(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Flowclock Simulator", &output_settings);

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = display.clear(Rgb565::BLACK);
    window.update(&display);

    let mut mouse_down = false;

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            let touch = match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown { keycode, .. } => {
                    match keycode {
                        Keycode::Q | Keycode::Escape => break 'running,
                        Keycode::D => {
                            info!("Detaching clock");
                            clock.detach();
                        }
                        Keycode::R => strip.set_scroll_x(0),
                        _ => {}
                    }
                    None
                }

                SimulatorEvent::MouseButtonDown { point, .. } => {
                    mouse_down = true;
                    Some(TouchEvent::Press(TouchPoint::from_point(point)))
                }
                SimulatorEvent::MouseMove { point } if mouse_down => {
                    Some(TouchEvent::Move(TouchPoint::from_point(point)))
                }
                SimulatorEvent::MouseButtonUp { point, .. } if mouse_down => {
                    mouse_down = false;
                    Some(TouchEvent::Release(TouchPoint::from_point(point)))
                }

                _ => None,
            };

            if let Some(touch) = touch
                && let TouchResult::Action(action) = strip.handle_touch(touch)
            {
                info!("Touch → action {:?}", action);
            }
        }

        // --- Clock frames ---------------------------------------------------
        while let Ok(RedrawRequest::Widget(id)) = REDRAW_CHANNEL.try_receive() {
            if id == CLOCK_WIDGET_ID && !clock.is_detached() {
                clock.update(&time);
            }
        }

        strip.flow_mut().poll_redraw(&time);

        // --- Render -------------------------------------------------------
        if clock.is_dirty() {
            if let Err(e) = clock.draw(&mut display) {
                log::error!("Draw error: {:?}", e);
            }
            clock.mark_clean();
        }

        if strip.is_dirty() {
            let _ = STRIP_AREA
                .into_styled(PrimitiveStyle::with_fill(Rgb565::BLACK))
                .draw(&mut display);
            if let Err(e) = strip.draw(&mut display) {
                log::error!("Draw error: {:?}", e);
            }
            strip.mark_clean();
        }

        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    clock.detach();
    info!("Simulator exiting");
}
