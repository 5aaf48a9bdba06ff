use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Sender, TrySendError};
use crossterm::event::{self, Event};

use crate::board::BoardState;
use crate::render::RenderState;
use crate::tea::{update, Command, Message, Model};
use crate::{klog_debug, klog_warn, Result};

/// How long one poll for terminal input may block.
const POLL_TIMEOUT: Duration = Duration::from_millis(4);
/// Upper bound on events handled before a snapshot goes out.
const MAX_EVENTS_PER_TICK: usize = 64;
/// Render loop frame budget (60fps).
pub const FRAME_DURATION: Duration = Duration::from_micros(16_666);

pub struct LogicThread;

impl LogicThread {
    /// Drive `model` from terminal input until quit or shutdown.
    ///
    /// Returns the board as it stood when the loop ended.
    pub fn run(
        mut model: Model,
        state_tx: Sender<RenderState>,
        shutdown: Arc<AtomicBool>,
    ) -> Result<BoardState> {
        klog_debug!(
            "LogicThread::run columns={} tasks={}",
            model.board.columns().len(),
            model.board.tasks().len()
        );
        send_state(&state_tx, &mut model);

        'outer: loop {
            if shutdown.load(Ordering::Relaxed) {
                break;
            }

            if event::poll(POLL_TIMEOUT)? {
                for _ in 0..MAX_EVENTS_PER_TICK {
                    let Some(msg) = to_message(event::read()?) else {
                        if !event::poll(Duration::ZERO)? {
                            break;
                        }
                        continue;
                    };
                    if step(&mut model, msg) {
                        shutdown.store(true, Ordering::Relaxed);
                        break 'outer;
                    }
                    if !event::poll(Duration::ZERO)? {
                        break;
                    }
                }
            }

            if model.dirty {
                send_state(&state_tx, &mut model);
            }
        }

        klog_debug!("LogicThread exiting");
        Ok(model.board)
    }
}

/// Apply one message and execute its commands. Returns true on quit.
pub fn step(model: &mut Model, msg: Message) -> bool {
    update(model, msg)
        .into_iter()
        .any(execute_command)
}

/// Map a terminal event to a message; focus and paste events are dropped.
pub fn to_message(event: Event) -> Option<Message> {
    match event {
        Event::Key(key) => Some(Message::Key(key)),
        Event::Mouse(mouse) => Some(Message::Mouse(mouse)),
        Event::Resize(width, height) => Some(Message::Resize(width, height)),
        _ => None,
    }
}

fn execute_command(cmd: Command) -> bool {
    match cmd {
        Command::Bell => {
            let mut stdout = std::io::stdout();
            if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
                klog_warn!("Command::Bell failed: {}", e);
            }
            false
        }

        Command::Quit => {
            klog_debug!("Command::Quit");
            true
        }
    }
}

/// Offer a snapshot to the render thread. A full channel keeps the model
/// dirty so the next tick retries with fresher state.
fn send_state(state_tx: &Sender<RenderState>, model: &mut Model) {
    match state_tx.try_send(model.snapshot()) {
        Ok(()) => model.dirty = false,
        Err(TrySendError::Full(_)) => model.dirty = true,
        Err(TrySendError::Disconnected(_)) => {
            klog_debug!("Render channel closed");
            model.dirty = false;
        }
    }
}
