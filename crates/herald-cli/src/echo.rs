//! `herald echo`: a tick-driven prompt loop wired entirely through events.
//!
//! [`EchoApplication`] listens for `QUIT` and owns a [`KeyboardController`]
//! that listens for `TICK`. The run loop only sends ticks; everything else
//! happens inside handlers, including the reentrant `QuitEvent` send.

use std::fmt;
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use anyhow::Result;
use herald_core::standard::{QUIT, QuitEvent, TICK, TickEvent};
use herald_core::{Event, HandlerResult};
use herald_events::EventManager;
use herald_listen::{Binding, Listener, Listening, bindings};
use tracing::{debug, info};

/// Reason recorded when input runs out before a quit word.
const EOF_REASON: &str = "end of input";

/// Settings for one echo session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoSettings {
    /// Text written before each read.
    pub prompt: String,
    /// Lowercased words that end the session.
    pub quit_words: Vec<String>,
    /// Tick limit, `0` for unlimited.
    pub max_ticks: u64,
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoSummary {
    /// Ticks sent.
    pub ticks: u64,
    /// Reason carried by the `QuitEvent`, if one arrived.
    pub quit_reason: Option<String>,
}

type Input = Box<dyn BufRead + Send>;
type Output = Box<dyn Write + Send>;

/// Reads one line per tick and turns quit words into `QuitEvent`s.
pub struct KeyboardController {
    manager: Weak<EventManager>,
    input: Mutex<Input>,
    output: Mutex<Output>,
    prompt: String,
    quit_words: Vec<String>,
}

impl KeyboardController {
    fn new(manager: &Arc<EventManager>, settings: &EchoSettings, input: Input, output: Output) -> Self {
        Self {
            manager: Arc::downgrade(manager),
            input: Mutex::new(input),
            output: Mutex::new(output),
            prompt: settings.prompt.clone(),
            quit_words: settings.quit_words.clone(),
        }
    }

    fn on_tick(&self, _event: &dyn Event) -> HandlerResult {
        let mut output = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        write!(output, "{}", self.prompt)?;
        output.flush()?;

        let mut line = String::new();
        let read = self
            .input
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .read_line(&mut line)?;

        if read == 0 {
            writeln!(output)?;
            return self.quit(EOF_REASON);
        }

        let command = line.trim().to_lowercase();
        if self.quit_words.contains(&command) {
            return self.quit(&command);
        }

        writeln!(output, "{}", line.trim_end_matches(['\r', '\n']))?;
        Ok(())
    }

    fn quit(&self, reason: &str) -> HandlerResult {
        let Some(manager) = self.manager.upgrade() else {
            return Ok(());
        };
        debug!(reason, "Requesting quit");
        manager.send(QuitEvent::new().with_reason(reason))?;
        Ok(())
    }
}

impl Listener for KeyboardController {
    fn bindings() -> Vec<Binding<Self>> {
        bindings![TICK => Self::on_tick]
    }
}

impl fmt::Debug for KeyboardController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyboardController")
            .field("prompt", &self.prompt)
            .field("quit_words", &self.quit_words)
            .finish_non_exhaustive()
    }
}

/// The application: runs until a `QuitEvent` arrives.
#[derive(Debug)]
pub struct EchoApplication {
    running: AtomicBool,
    quit_reason: Mutex<Option<String>>,
    _controller: Listening<KeyboardController>,
}

impl EchoApplication {
    /// Build the application and attach its controller to `manager`.
    pub fn new(manager: &Arc<EventManager>, settings: &EchoSettings, input: Input, output: Output) -> Self {
        let controller = KeyboardController::new(manager, settings, input, output);
        Self {
            running: AtomicBool::new(false),
            quit_reason: Mutex::new(None),
            _controller: Listening::new(manager, controller),
        }
    }

    /// Whether the loop should keep ticking.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn on_quit(&self, event: &dyn Event) -> HandlerResult {
        self.running.store(false, Ordering::SeqCst);
        let reason = event.downcast_ref::<QuitEvent>().and_then(|quit| quit.reason.clone());
        info!(reason = reason.as_deref().unwrap_or("none"), "Quit received");
        *self.quit_reason.lock().unwrap_or_else(PoisonError::into_inner) = reason;
        Ok(())
    }

    fn take_quit_reason(&self) -> Option<String> {
        self.quit_reason.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

impl Listener for EchoApplication {
    fn bindings() -> Vec<Binding<Self>> {
        bindings![QUIT => Self::on_quit]
    }
}

/// Run an echo session until a quit word, end of input, or the tick limit.
///
/// # Errors
///
/// Returns an error if a handler fault halts dispatch.
pub fn run<I, O>(manager: &Arc<EventManager>, settings: &EchoSettings, input: I, output: O) -> Result<EchoSummary>
where
    I: BufRead + Send + 'static,
    O: Write + Send + 'static,
{
    let app = Listening::new(manager, EchoApplication::new(manager, settings, Box::new(input), Box::new(output)));
    app.running.store(true, Ordering::SeqCst);

    let mut ticks: u64 = 0;
    while app.is_running() {
        if settings.max_ticks != 0 && ticks >= settings.max_ticks {
            debug!(max_ticks = settings.max_ticks, "Tick limit reached");
            break;
        }
        ticks = ticks.saturating_add(1);
        manager.send(TickEvent::new(ticks))?;
    }

    Ok(EchoSummary {
        ticks,
        quit_reason: app.take_quit_reason(),
    })
}
