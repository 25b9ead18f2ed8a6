//! Line-oriented console front end.
//!
//! ```rust,ignore
//! use std::io;
//! use ixibot_command::BoxedEvent;
//! use ixibot_runtime::{CommandRegistry, ConsoleListener};
//!
//! let registry = CommandRegistry::new(".");
//! registry.register_builtins()?;
//!
//! let listener = ConsoleListener::from_registry(&registry);
//! let dispatched = listener.run(io::stdin().lock(), io::stdout(), |event: BoxedEvent| {
//!     println!("{event:?}");
//! })?;
//! ```

use std::io::{BufRead, Write};

use ixibot_command::BoxedEvent;
use tracing::{debug, debug_span, info, trace};

use crate::error::RuntimeResult;
use crate::registry::{CommandRegistry, SharedRepository};

/// Input that ends the loop.
pub const QUIT_COMMAND: &str = "quit";

/// Lifecycle notifications sent to an [`EventSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerSignal {
    /// The user asked the listener to stop.
    Stop,
}

/// Receives events produced by the listener.
pub trait EventSink {
    /// Handles one parsed, non-help event.
    fn dispatch(&mut self, event: BoxedEvent);

    /// Called on lifecycle changes.
    fn signal(&mut self, _signal: ListenerSignal) {}
}

impl<F> EventSink for F
where
    F: FnMut(BoxedEvent),
{
    fn dispatch(&mut self, event: BoxedEvent) {
        self(event)
    }
}

enum Outcome {
    Event(BoxedEvent),
    Reply(String),
}

/// Reads command lines and forwards the resulting events.
#[derive(Debug, Clone)]
pub struct ConsoleListener {
    repository: SharedRepository,
}

impl ConsoleListener {
    /// Creates a listener over a shared repository.
    pub fn new(repository: SharedRepository) -> Self {
        Self { repository }
    }

    /// Creates a listener sharing the registry's commands.
    pub fn from_registry(registry: &CommandRegistry) -> Self {
        Self::new(registry.repository())
    }

    /// Runs until EOF or [`QUIT_COMMAND`].
    ///
    /// Help text and parse errors are written to `output`. Returns the number
    /// of events handed to `sink`.
    ///
    /// # Errors
    ///
    /// Only I/O failures end the loop with an error.
    pub fn run<R, W, S>(&self, input: R, mut output: W, mut sink: S) -> RuntimeResult<usize>
    where
        R: BufRead,
        W: Write,
        S: EventSink,
    {
        let mut dispatched = 0;

        for (number, line) in input.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            let _span = debug_span!("console_line", line = number + 1).entered();

            if line.is_empty() {
                continue;
            }

            if line == QUIT_COMMAND {
                info!("Quit requested, stopping console listener");
                sink.signal(ListenerSignal::Stop);
                return Ok(dispatched);
            }

            let outcome = {
                let repository = self.repository.read();
                if !repository.is_command(line) {
                    trace!(%line, "Ignoring non-command input");
                    continue;
                }
                match repository.parse(line) {
                    Ok(event) if event.is_help() => {
                        Outcome::Reply(repository.help_message(line).unwrap_or_default())
                    }
                    Ok(event) => Outcome::Event(event),
                    Err(error) => {
                        debug!(%error, "Command rejected");
                        Outcome::Reply(format!("{error}\n"))
                    }
                }
            };

            match outcome {
                Outcome::Event(event) => {
                    debug!(event = event.event_name(), "Dispatching event");
                    sink.dispatch(event);
                    dispatched += 1;
                }
                Outcome::Reply(text) => {
                    output.write_all(text.as_bytes())?;
                    output.flush()?;
                }
            }
        }

        info!(dispatched, "Console input closed");
        Ok(dispatched)
    }
}
