use std::thread;
use std::time::{Duration, Instant};

use log::info;

use crate::arbiter::drain_input;
use crate::error::GameError;
use crate::game::{GameState, GameStatus};
use crate::input::InputSource;
use crate::renderer::RenderSink;

/// Decides when the next tick may begin.
pub trait TickScheduler {
    /// Blocks until the next tick boundary.
    fn wait_for_tick(&mut self);
}

/// Sleeps on the monotonic clock so each tick starts at least one period
/// after the previous one began. The first tick starts immediately.
#[derive(Debug, Clone)]
pub struct SleepScheduler {
    period: Duration,
    next_tick: Option<Instant>,
}

impl SleepScheduler {
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_tick: None,
        }
    }
}

impl TickScheduler for SleepScheduler {
    fn wait_for_tick(&mut self) {
        if let Some(deadline) = self.next_tick {
            let now = Instant::now();
            if deadline > now {
                thread::sleep(deadline - now);
            }
        }

        self.next_tick = Some(Instant::now() + self.period);
    }
}

/// Never waits; for replays and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateScheduler;

impl TickScheduler for ImmediateScheduler {
    fn wait_for_tick(&mut self) {}
}

/// Drives input, simulation and rendering until the run is over.
///
/// Every iteration drains input, steps the simulation only while running,
/// then renders unconditionally so the pause label can blink and the final
/// board stays visible.
pub fn run<I, R, T>(
    state: &mut GameState,
    input: &mut I,
    sink: &mut R,
    scheduler: &mut T,
) -> Result<(), GameError>
where
    I: InputSource + ?Sized,
    R: RenderSink + ?Sized,
    T: TickScheduler + ?Sized,
{
    let settings = state.settings();
    info!(
        "game started on {} board, delay {}ms, opponent {}, no-clip {}",
        state.bounds(),
        settings.tick_delay_ms,
        settings.opponent_enabled,
        settings.no_clip
    );

    while !state.is_over() {
        scheduler.wait_for_tick();

        drain_input(state, input)?;
        if state.status == GameStatus::Running {
            state.step()?;
        }

        sink.draw(state)?;
        state.frame_count += 1;
    }

    info!(
        "game loop finished after {} frames ({:?})",
        state.frame_count, state.end_reason
    );
    Ok(())
}
