//! Terminal setup and event plumbing.
//!
//! The `Tui` wrapper owns the ratatui terminal: raw mode and the alternate
//! screen are entered on init and left again on drop (and from a panic hook,
//! so a crashed wizard never leaves the shell unusable). Redraws go through a
//! [`FrameRequester`] whose requests are coalesced, so a burst of build
//! output lines still produces a single draw.

use anyhow::Result;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::Event;
use crossterm::event::KeyEvent;
use crossterm::execute;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::stdout;
use std::io::Stdout;
use std::pin::Pin;
use std::time::Duration;
use std::time::Instant;
use tokio::select;
use tokio_stream::Stream;
use tokio_stream::StreamExt;

/// Type alias for the terminal backend we're using.
pub type TerminalBackend = CrosstermBackend<Stdout>;

/// Input and draw events the wizard loop consumes.
#[derive(Debug)]
pub enum TuiEvent {
    /// Keyboard event.
    Key(KeyEvent),
    /// Bracketed paste, delivered as a whole string.
    Paste(String),
    /// Time to redraw (scheduled frame or terminal resize).
    Draw,
}

/// Owns the terminal for the lifetime of the wizard.
pub struct Tui {
    terminal: Terminal<TerminalBackend>,
    /// Frame requests land here; a background task coalesces them.
    frame_tx: tokio::sync::mpsc::UnboundedSender<Instant>,
    /// Fan-out for coalesced draw ticks.
    draw_tx: tokio::sync::broadcast::Sender<()>,
}

impl Tui {
    /// Enters raw mode and the alternate screen, and installs the panic hook.
    pub fn init() -> Result<Self> {
        enable_raw_mode()?;
        execute!(stdout(), EnableBracketedPaste)?;
        execute!(stdout(), EnterAlternateScreen)?;

        set_panic_hook();

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;

        let (frame_tx, frame_rx) = tokio::sync::mpsc::unbounded_channel();
        let (draw_tx, _) = tokio::sync::broadcast::channel(1);

        tokio::spawn(coalesce_frames(frame_rx, draw_tx.clone()));

        Ok(Self {
            terminal,
            frame_tx,
            draw_tx,
        })
    }

    /// Leaves raw mode and the alternate screen.
    pub fn restore(&mut self) -> Result<()> {
        restore_terminal()
    }

    /// Handle for scheduling redraws from anywhere in the app.
    pub fn frame_requester(&self) -> FrameRequester {
        FrameRequester {
            frame_tx: self.frame_tx.clone(),
        }
    }

    /// Merges crossterm input with coalesced draw ticks into one stream.
    ///
    /// Resize events surface as [`TuiEvent::Draw`]; the next render reads the
    /// new frame size on its own.
    pub fn event_stream(&self) -> Pin<Box<dyn Stream<Item = TuiEvent> + Send + 'static>> {
        let mut crossterm_events = crossterm::event::EventStream::new();
        let mut draw_rx = self.draw_tx.subscribe();

        let event_stream = async_stream::stream! {
            loop {
                select! {
                    Some(Ok(event)) = crossterm_events.next() => {
                        match event {
                            Event::Key(key_event) => yield TuiEvent::Key(key_event),
                            Event::Paste(pasted) => yield TuiEvent::Paste(pasted),
                            Event::Resize(_, _) => yield TuiEvent::Draw,
                            _ => {}
                        }
                    }
                    result = draw_rx.recv() => {
                        match result {
                            Ok(()) => yield TuiEvent::Draw,
                            Err(tokio::sync::broadcast::error::RecvError::Lagged(_)) => {
                                // Missed ticks collapse into one draw.
                                yield TuiEvent::Draw;
                            }
                            Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                        }
                    }
                }
            }
        };

        Box::pin(event_stream)
    }

    /// Draw the UI with the provided function.
    pub fn draw<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Handle for scheduling frame redraws.
#[derive(Clone, Debug)]
pub struct FrameRequester {
    frame_tx: tokio::sync::mpsc::UnboundedSender<Instant>,
}

impl FrameRequester {
    /// Schedule a frame to be drawn as soon as possible.
    pub fn schedule_frame(&self) {
        let _ = self.frame_tx.send(Instant::now());
    }
}

/// Collapses a burst of frame requests into single draw ticks.
///
/// Each request carries its desired deadline; the task sleeps until the
/// earliest one, sends one tick, and starts over. Requests arriving while a
/// deadline is pending only move the deadline earlier.
async fn coalesce_frames(
    mut frame_rx: tokio::sync::mpsc::UnboundedReceiver<Instant>,
    draw_tx: tokio::sync::broadcast::Sender<()>,
) {
    use tokio::time::sleep_until;
    use tokio::time::Instant as TokioInstant;

    let mut next_deadline: Option<Instant> = None;

    loop {
        let target = next_deadline.unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));
        let sleep_fut = sleep_until(TokioInstant::from_std(target));
        tokio::pin!(sleep_fut);

        select! {
            recv = frame_rx.recv() => {
                match recv {
                    Some(at) => {
                        next_deadline = Some(match next_deadline {
                            Some(current) => current.min(at),
                            None => at,
                        });
                    }
                    None => break,
                }
            }
            _ = &mut sleep_fut => {
                if next_deadline.take().is_some() {
                    let _ = draw_tx.send(());
                }
            }
        }
    }
}

/// Undo everything `init` did to the terminal. Safe to call twice.
fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), DisableBracketedPaste)?;
    execute!(stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Restore the terminal before the default panic output, so the message is
/// readable instead of smeared across the alternate screen.
fn set_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}
