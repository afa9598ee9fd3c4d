use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseEventKind,
};
use crossterm::execute;
use futures_util::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::application::{ConversationWidget, RelayClient, RoundTripOutcome};

use super::view;

/// Drives banner expiry and notification timeouts.
const TICK_RATE: Duration = Duration::from_millis(250);
const WHEEL_STEP: usize = 3;

/// Event loop hosting one [`ConversationWidget`] session in the terminal.
pub struct ChatApp {
    widget: ConversationWidget,
    client: Arc<dyn RelayClient>,
    running: bool,
    /// Height of the message viewport at the last draw, for paging.
    page_size: usize,
}

impl ChatApp {
    pub fn new(widget: ConversationWidget, client: Arc<dyn RelayClient>) -> Self {
        Self {
            widget,
            client,
            running: true,
            page_size: 10,
        }
    }

    /// Run until the user quits. Returns how many messages the session held.
    pub async fn run(mut self) -> Result<usize> {
        let mut terminal = ratatui::init();
        execute!(std::io::stdout(), EnableMouseCapture)?;

        let result = self.event_loop(&mut terminal).await;

        execute!(std::io::stdout(), DisableMouseCapture)?;
        ratatui::restore();

        result.map(|_| self.widget.transcript().len())
    }

    async fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let mut events = EventStream::new();
        let mut revisions = self.widget.subscribe();
        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel::<RoundTripOutcome>();
        let mut ticker = tokio::time::interval(TICK_RATE);
        let mut dirty = true;

        info!("Chat session started");

        while self.running {
            if dirty {
                let mut page_size = self.page_size;
                terminal.draw(|frame| page_size = view::render(frame, &mut self.widget))?;
                self.page_size = page_size.max(1);
                dirty = false;
            }

            tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => {
                        self.handle_event(event, &outcome_tx);
                        dirty = true;
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                Some(outcome) = outcome_rx.recv() => {
                    self.widget.finish_round_trip(outcome);
                }
                _ = ticker.tick() => {
                    self.widget.tick(Instant::now());
                }
                Ok(()) = revisions.changed() => {
                    revisions.borrow_and_update();
                    dirty = true;
                }
            }
        }

        if self.widget.is_pending() {
            debug!("Leaving with a round trip still in flight");
        }
        info!("Chat session ended");
        Ok(())
    }

    fn handle_event(&mut self, event: Event, outcomes: &mpsc::UnboundedSender<RoundTripOutcome>) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key, outcomes),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => self.widget.scroll_mut().scroll_up(WHEEL_STEP),
                MouseEventKind::ScrollDown => self.widget.scroll_mut().scroll_down(WHEEL_STEP),
                _ => {}
            },
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent, outcomes: &mpsc::UnboundedSender<RoundTripOutcome>) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }
            KeyCode::Esc => self.running = false,
            KeyCode::Enter => self.submit(outcomes),
            KeyCode::Backspace => {
                self.widget.pop_char();
            }
            KeyCode::Up => self.widget.scroll_mut().scroll_up(1),
            KeyCode::Down => self.widget.scroll_mut().scroll_down(1),
            KeyCode::PageUp => self.widget.scroll_mut().scroll_up(self.page_size),
            KeyCode::PageDown => self.widget.scroll_mut().scroll_down(self.page_size),
            KeyCode::End => self.widget.scroll_mut().scroll_to_bottom(),
            KeyCode::Char(c) => {
                self.widget.push_char(c);
            }
            _ => {}
        }
    }

    /// Start a round trip in the background; its outcome comes back through
    /// `outcomes` so drawing continues while the relay works.
    fn submit(&mut self, outcomes: &mpsc::UnboundedSender<RoundTripOutcome>) {
        let Some(round_trip) = self.widget.submit() else {
            return;
        };

        let client = Arc::clone(&self.client);
        let outcomes = outcomes.clone();
        tokio::spawn(async move {
            let outcome = round_trip.execute(client.as_ref()).await;
            // The receiver is gone once the session has ended.
            let _ = outcomes.send(outcome);
        });
    }
}
