//! Self-rescheduling redraws
//!
//! Animated widgets ask to be drawn again a fixed delay after each frame.
//! The request chain lives until its [`CancelToken`] is cancelled, which
//! happens when the owning widget is detached or dropped.
//!
//! Two drivers are provided. [`RedrawSchedule`] is polled from a render
//! loop that already runs (the simulator, or a firmware display task).
//! [`redraw_task`] is an embassy task that pushes [`RedrawRequest`]s into a
//! channel on its own timer.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, Sender};
use embassy_time::{Duration, Instant, Timer};
use log::debug;

/// Delay between animation frames
pub const DEFAULT_REDRAW_INTERVAL: Duration = Duration::from_millis(100);

/// Channel capacity for redraw requests
pub const REDRAW_CHANNEL_CAPACITY: usize = 4;

/// Shared flag that stops a redraw chain
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Request sent to the render loop by [`redraw_task`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawRequest {
    /// Redraw the widget registered under this id
    Widget(u16),
}

/// Global channel for redraw requests
pub static REDRAW_CHANNEL: Channel<CriticalSectionRawMutex, RedrawRequest, REDRAW_CHANNEL_CAPACITY> =
    Channel::new();

/// Pull-based redraw timer
#[derive(Debug, Clone)]
pub struct RedrawSchedule {
    interval: Duration,
    next_due: Option<Instant>,
    token: CancelToken,
}

impl RedrawSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
            token: CancelToken::new(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Token shared by every driver of this schedule
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Next time a redraw is due, if one is pending
    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    /// Ask for a redraw one interval after `frame`
    pub fn request_after(&mut self, frame: Instant) {
        if self.token.is_cancelled() {
            return;
        }
        self.next_due = Some(frame + self.interval);
    }

    /// Returns true (once) when the pending redraw is due at `now`
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.token.is_cancelled() {
            self.next_due = None;
            return false;
        }
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = None;
                true
            }
            _ => false,
        }
    }

    /// Stop the chain for good
    pub fn cancel(&mut self) {
        self.token.cancel();
        self.next_due = None;
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Push a redraw request for `widget` every `interval` until `token` is
/// cancelled.
pub async fn redraw_task(
    token: CancelToken,
    interval: Duration,
    widget: u16,
    sender: Sender<'static, CriticalSectionRawMutex, RedrawRequest, REDRAW_CHANNEL_CAPACITY>,
) {
    debug!("redraw task for widget {} started", widget);
    loop {
        Timer::after(interval).await;
        if token.is_cancelled() {
            break;
        }
        sender.send(RedrawRequest::Widget(widget)).await;
    }
    debug!("redraw task for widget {} stopped", widget);
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_futures::select::{Either, select};

    #[test]
    fn test_poll_fires_once_after_interval() {
        let mut schedule = RedrawSchedule::new(DEFAULT_REDRAW_INTERVAL);
        assert!(!schedule.poll(Instant::from_millis(1_000)));

        schedule.request_after(Instant::from_millis(1_000));
        assert!(!schedule.poll(Instant::from_millis(1_099)));
        assert!(schedule.poll(Instant::from_millis(1_100)));
        assert!(!schedule.poll(Instant::from_millis(1_200)));
    }

    #[test]
    fn test_cancel_stops_chain() {
        let mut schedule = RedrawSchedule::new(DEFAULT_REDRAW_INTERVAL);
        schedule.request_after(Instant::from_millis(0));
        let token = schedule.token();

        token.cancel();
        assert!(schedule.is_cancelled());
        assert!(!schedule.poll(Instant::from_millis(500)));

        schedule.request_after(Instant::from_millis(500));
        assert_eq!(schedule.next_due(), None);
    }

    #[test]
    fn test_task_sends_until_cancelled() {
        static CHANNEL: Channel<CriticalSectionRawMutex, RedrawRequest, REDRAW_CHANNEL_CAPACITY> =
            Channel::new();
        let token = CancelToken::new();

        let first = block_on(async {
            match select(
                redraw_task(token.clone(), Duration::from_millis(1), 7, CHANNEL.sender()),
                CHANNEL.receive(),
            )
            .await
            {
                Either::First(()) => None,
                Either::Second(request) => Some(request),
            }
        });
        assert_eq!(first, Some(RedrawRequest::Widget(7)));

        // A cancelled task returns after its current sleep without sending
        token.cancel();
        block_on(redraw_task(token, Duration::from_millis(1), 7, CHANNEL.sender()));
        assert!(CHANNEL.try_receive().is_err());
    }

    #[test]
    fn test_cloned_tokens_share_state() {
        let token = CancelToken::new();
        let clone = token.clone();
        clone.cancel();
        assert!(token.is_cancelled());
    }
}
