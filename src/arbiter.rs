//! Per-tick reconciliation of buffered key presses.

use std::io;

use log::debug;

use crate::game::GameState;
use crate::input::{direction_change_is_valid, GameInput, InputSource};

/// Drains every pending input from `source` and applies it to `state`.
///
/// The first accepted direction change wins for this tick; later direction
/// keys are still consumed but ignored. Direction keys are ignored while
/// paused. Quit ends the run immediately and leaves the rest of the queue
/// unread. A reversal is accepted unless the settings reject it, in which
/// case the snake runs straight into its own body on the next step.
pub fn drain_input<S: InputSource + ?Sized>(
    state: &mut GameState,
    source: &mut S,
) -> io::Result<()> {
    let mut direction_taken = false;

    while let Some(input) = source.poll_input()? {
        match input {
            GameInput::Direction(direction) => {
                if direction_taken || state.is_paused() || direction == state.direction {
                    continue;
                }
                if state.settings().reject_reversal
                    && !direction_change_is_valid(state.direction, direction)
                {
                    debug!("rejected reversal from {:?} to {direction:?}", state.direction);
                    continue;
                }

                state.direction = direction;
                direction_taken = true;
            }
            GameInput::Pause => state.toggle_pause(),
            GameInput::Quit => {
                state.quit();
                return Ok(());
            }
        }
    }

    Ok(())
}
