use std::time::{Duration, Instant};

use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::application::RelayClient;
use crate::domain::{DomainError, Message, MessageId, Transcript};

/// Upper bound on how many messages are rendered at once.
pub const MAX_VISIBLE_MESSAGES: usize = 50;
/// How long the disclaimer banner stays up after the widget is mounted.
pub const BANNER_DURATION: Duration = Duration::from_secs(5);
/// How long an error notification stays up.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);
pub const BANNER_TEXT: &str = "Feel free to chat! Your messages will not be saved.";

/// A user-visible error toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    title: String,
    description: String,
    raised_at: Instant,
}

impl Notification {
    pub fn error(description: impl Into<String>, raised_at: Instant) -> Self {
        Self {
            title: "Error".to_string(),
            description: description.into(),
            raised_at,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= NOTIFICATION_TTL
    }
}

/// An in-flight request to the relay endpoint.
///
/// Owns the candidate transcript so the network call can run without
/// borrowing the widget; hand the outcome back through
/// [`ConversationWidget::finish_round_trip`].
#[derive(Debug)]
pub struct RoundTrip {
    candidate: Vec<Message>,
}

impl RoundTrip {
    pub fn candidate(&self) -> &[Message] {
        &self.candidate
    }

    pub async fn execute(self, client: &dyn RelayClient) -> RoundTripOutcome {
        let result = client.send(&self.candidate).await;
        RoundTripOutcome {
            candidate: self.candidate,
            result,
        }
    }
}

#[derive(Debug)]
pub struct RoundTripOutcome {
    candidate: Vec<Message>,
    result: Result<String, DomainError>,
}

impl RoundTripOutcome {
    pub fn new(candidate: Vec<Message>, result: Result<String, DomainError>) -> Self {
        Self { candidate, result }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Scroll position of the message list, in lines from the bottom.
///
/// While `auto_scroll` is on the view follows the newest line. Scrolling up
/// suspends it; getting back to offset 0 resumes it.
///
/// `anchor` is the newest message seen by the last [`ScrollState::sync`].
/// Lines rendered below it since then are new content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollState {
    offset: usize,
    auto_scroll: bool,
    anchor: Option<MessageId>,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset: 0,
            auto_scroll: true,
            anchor: None,
        }
    }
}

impl ScrollState {
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_auto_scroll(&self) -> bool {
        self.auto_scroll
    }

    pub fn scroll_up(&mut self, lines: usize) {
        if lines == 0 {
            return;
        }
        self.offset = self.offset.saturating_add(lines);
        self.auto_scroll = false;
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
        if self.offset == 0 {
            self.auto_scroll = true;
        }
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = 0;
        self.auto_scroll = true;
    }

    /// Reconcile with the rendered content and return the index of the first
    /// line to draw.
    ///
    /// `blocks` lists every rendered message, oldest first, with the number of
    /// lines it takes.
    pub fn sync(&mut self, blocks: &[(MessageId, usize)], viewport: usize) -> usize {
        // Keep the same lines on screen while the user is reading history.
        // Messages dropped off the top of the window do not move the bottom.
        if !self.auto_scroll {
            let anchor_pos = self
                .anchor
                .and_then(|anchor| blocks.iter().position(|(id, _)| *id == anchor));
            if let Some(pos) = anchor_pos {
                let added: usize = blocks[pos + 1..].iter().map(|(_, lines)| lines).sum();
                self.offset = self.offset.saturating_add(added);
            }
        }
        self.anchor = blocks.last().map(|(id, _)| *id);

        let total_lines: usize = blocks.iter().map(|(_, lines)| lines).sum();
        let max_offset = total_lines.saturating_sub(viewport);
        self.offset = self.offset.min(max_offset);
        if self.offset == 0 {
            self.auto_scroll = true;
        }

        max_offset - self.offset
    }
}

/// Client-side owner of one chat session.
///
/// The transcript only ever advances by a whole round trip: the user message
/// and the assistant reply are committed together once the relay answers.
/// A failed round trip leaves the transcript exactly as it was.
///
/// Every state change bumps a revision counter; renderers subscribe through
/// [`ConversationWidget::subscribe`] and redraw when it moves.
pub struct ConversationWidget {
    transcript: Transcript,
    pending: bool,
    draft_input: String,
    mounted_at: Instant,
    banner_visible: bool,
    notification: Option<Notification>,
    scroll: ScrollState,
    revision: watch::Sender<u64>,
}

impl ConversationWidget {
    pub fn new() -> Self {
        Self::mounted_at(Instant::now())
    }

    pub fn mounted_at(now: Instant) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            transcript: Transcript::new(),
            pending: false,
            draft_input: String::new(),
            mounted_at: now,
            banner_visible: true,
            notification: None,
            scroll: ScrollState::default(),
            revision,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn draft_input(&self) -> &str {
        &self.draft_input
    }

    pub fn banner_visible(&self) -> bool {
        self.banner_visible
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }

    /// The bounded tail of the transcript that gets rendered. The full
    /// transcript is always kept.
    pub fn visible_messages(&self) -> &[Message] {
        self.transcript.recent(MAX_VISIBLE_MESSAGES)
    }

    /// Replace the draft. Input is locked while a round trip is pending.
    pub fn set_draft(&mut self, text: impl Into<String>) -> bool {
        if self.pending {
            return false;
        }
        self.draft_input = text.into();
        self.notify();
        true
    }

    pub fn push_char(&mut self, c: char) -> bool {
        if self.pending {
            return false;
        }
        self.draft_input.push(c);
        self.notify();
        true
    }

    pub fn pop_char(&mut self) -> bool {
        if self.pending || self.draft_input.pop().is_none() {
            return false;
        }
        self.notify();
        true
    }

    /// Start a round trip for the current draft.
    ///
    /// Returns `None` without touching any state while another round trip is
    /// pending or the draft is blank.
    pub fn submit(&mut self) -> Option<RoundTrip> {
        if self.pending {
            debug!("Ignoring submit while a round trip is pending");
            return None;
        }
        if self.draft_input.trim().is_empty() {
            debug!("Ignoring submit of a blank draft");
            return None;
        }

        let user_message = Message::user(self.draft_input.clone());
        let candidate = self.transcript.with_appended(user_message);
        Some(self.send_round_trip(candidate))
    }

    /// Mark the widget pending and hand out the request for `candidate`.
    pub fn send_round_trip(&mut self, candidate: Vec<Message>) -> RoundTrip {
        debug_assert!(self.transcript.is_prefix_of(&candidate));

        self.pending = true;
        self.notify();
        RoundTrip { candidate }
    }

    /// Apply the result of a round trip and return to idle.
    pub fn finish_round_trip(&mut self, outcome: RoundTripOutcome) {
        if !self.pending {
            warn!("Discarding round trip outcome received while idle");
            return;
        }

        if !self.transcript.is_prefix_of(&outcome.candidate) {
            warn!("Discarding round trip outcome that does not extend the transcript");
            return;
        }

        match outcome.result {
            Ok(content) => {
                let mut transcript = Transcript::from(outcome.candidate);
                transcript.push(Message::assistant(content));
                self.transcript = transcript;
                self.draft_input.clear();
                info!("Round trip complete, transcript has {} messages", self.transcript.len());
            }
            Err(e) => {
                error!("Failed to send message: {}", e);
                self.notification = Some(Notification::error(e.to_string(), Instant::now()));
            }
        }

        self.pending = false;
        self.notify();
    }

    /// Submit the draft and wait for the relay in place.
    ///
    /// Returns `false` when the submit was rejected or the round trip failed.
    pub async fn round_trip(&mut self, client: &dyn RelayClient) -> bool {
        let Some(round_trip) = self.submit() else {
            return false;
        };

        let outcome = round_trip.execute(client).await;
        let success = outcome.is_success();
        self.finish_round_trip(outcome);
        success
    }

    /// Advance time-based presentation state.
    pub fn tick(&mut self, now: Instant) {
        let mut changed = false;

        if self.banner_visible && now.saturating_duration_since(self.mounted_at) >= BANNER_DURATION
        {
            self.banner_visible = false;
            changed = true;
        }

        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now))
        {
            self.notification = None;
            changed = true;
        }

        if changed {
            self.notify();
        }
    }

    fn notify(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }
}

impl Default for ConversationWidget {
    fn default() -> Self {
        Self::new()
    }
}
