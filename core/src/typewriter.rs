//! The typewriter: reveals one bot reply at a time, a character per tick.
//!
//! The controller is a plain state machine. Whoever owns it delivers ticks
//! from whatever interval primitive the platform has, via [`Scheduler`].

use std::time::Duration;

use log::{debug, trace};

use crate::links::LinkExtractor;
use crate::models::{Message, Transcript};

pub const DEFAULT_TYPING_INTERVAL: Duration = Duration::from_millis(20);
pub const MIN_TYPING_INTERVAL: Duration = Duration::from_millis(1);

/// Starts repeating timers that call back into [`Typewriter::tick`].
pub trait Scheduler {
    /// Dropping the handle must stop the timer.
    type Handle;

    fn every(&mut self, period: Duration) -> Self::Handle;
}

/// Where the transcript is displayed.
pub trait Viewport {
    /// Pins the view to the newest content. Returns `false` when there is
    /// nothing to scroll, which callers ignore.
    fn scroll_to_bottom(&mut self) -> bool;
}

/// A viewport for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoViewport;

impl Viewport for NoViewport {
    fn scroll_to_bottom(&mut self) -> bool {
        false
    }
}

/// The one reply currently being revealed.
struct StreamingSession<H> {
    target: String,
    full_text: String,
    total_chars: usize,
    revealed_chars: usize,
    revealed_bytes: usize,
    _timer: H,
}

impl<H> StreamingSession<H> {
    /// Reveals one more character.
    fn advance(&mut self) {
        if let Some(c) = self.full_text[self.revealed_bytes..].chars().next() {
            self.revealed_bytes += c.len_utf8();
            self.revealed_chars += 1;
        }
    }

    fn visible(&self) -> &str {
        &self.full_text[..self.revealed_bytes]
    }

    fn is_complete(&self) -> bool {
        self.revealed_chars >= self.total_chars
    }
}

/// What a tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tick {
    /// No reply is streaming.
    Idle,
    Advanced { id: String, revealed: usize },
    /// The reply is fully revealed and the timer has stopped.
    Completed { id: String },
    /// The target message left the transcript; the session was dropped.
    Abandoned { id: String },
}

pub struct Typewriter<S: Scheduler> {
    scheduler: S,
    interval: Duration,
    extractor: LinkExtractor,
    session: Option<StreamingSession<S::Handle>>,
}

impl<S: Scheduler> Typewriter<S> {
    pub fn new(scheduler: S, interval: Duration, extractor: LinkExtractor) -> Self {
        Self {
            scheduler,
            interval: interval.max(MIN_TYPING_INTERVAL),
            extractor,
            session: None,
        }
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn is_streaming(&self) -> bool {
        self.session.is_some()
    }

    /// Id of the message being revealed, if any.
    pub fn streaming_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.target.as_str())
    }

    /// Starts typing `full_text` as a new bot message and returns its id.
    ///
    /// A reply already in flight is snapped to its full text first. Blank
    /// text creates no message.
    pub fn begin(&mut self, transcript: &mut Transcript, full_text: &str) -> Option<String> {
        self.finish_now(transcript);

        let text = full_text.trim();
        if text.is_empty() {
            return None;
        }

        let links = self.extractor.extract(text);
        let id = transcript.push(Message::streaming_bot(links));
        debug!("typing reply {id} ({} chars)", text.chars().count());

        let timer = self.scheduler.every(self.interval);
        self.session = Some(StreamingSession {
            target: id.clone(),
            full_text: text.to_string(),
            total_chars: text.chars().count(),
            revealed_chars: 0,
            revealed_bytes: 0,
            _timer: timer,
        });
        Some(id)
    }

    /// Reveals the next character of the streaming message.
    pub fn tick(&mut self, transcript: &mut Transcript, viewport: &mut dyn Viewport) -> Tick {
        let Some(session) = self.session.as_mut() else {
            return Tick::Idle;
        };

        session.advance();
        if !transcript.set_text(&session.target, session.visible()) {
            let id = session.target.clone();
            debug!("reply {id} is gone from the transcript, stopping");
            self.session = None;
            return Tick::Abandoned { id };
        }

        if !viewport.scroll_to_bottom() {
            trace!("no scroll container for tick");
        }

        if session.is_complete() {
            let id = session.target.clone();
            self.session = None;
            debug!("reply {id} fully typed");
            Tick::Completed { id }
        } else {
            Tick::Advanced { id: session.target.clone(), revealed: session.revealed_chars }
        }
    }

    /// Ends the current session (if any), leaving its message at full text.
    pub fn finish_now(&mut self, transcript: &mut Transcript) -> Option<String> {
        let session = self.session.take()?;
        transcript.set_text(&session.target, &session.full_text);
        debug!("finalized reply {} early", session.target);
        Some(session.target)
    }

    /// Stops the timer without touching the transcript. Call on teardown.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.take() {
            debug!("cancelled typing of {}", session.target);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{CountingViewport, ManualScheduler};
    use super::*;
    use crate::links::{AllowedDomains, PromotionPolicy};
    use crate::models::Link;

    fn typewriter(interval: Duration) -> Typewriter<ManualScheduler> {
        let extractor =
            LinkExtractor::new(AllowedDomains::new(["atdigital.io"]), PromotionPolicy::default());
        Typewriter::new(ManualScheduler::default(), interval, extractor)
    }

    fn text_of<'a>(transcript: &'a Transcript, id: &str) -> &'a str {
        transcript.get(id).map(|m| m.text.as_str()).unwrap_or_default()
    }

    fn run_to_end(tw: &mut Typewriter<ManualScheduler>, transcript: &mut Transcript) -> usize {
        let mut ticks = 0;
        loop {
            ticks += 1;
            if let Tick::Completed { .. } = tw.tick(transcript, &mut NoViewport) {
                return ticks;
            }
        }
    }

    #[test]
    fn reply_is_revealed_one_char_per_tick() {
        let mut tw = typewriter(DEFAULT_TYPING_INTERVAL);
        let mut transcript = Transcript::new();
        let id = tw.begin(&mut transcript, "  Héllo  ").expect("message created");

        assert_eq!(text_of(&transcript, &id), "");
        assert_eq!(tw.tick(&mut transcript, &mut NoViewport), Tick::Advanced { id: id.clone(), revealed: 1 });
        tw.tick(&mut transcript, &mut NoViewport);
        assert_eq!(text_of(&transcript, &id), "Hé");
        assert_eq!(tw.streaming_id(), Some(id.as_str()));
    }

    #[test]
    fn completed_reply_matches_full_text_exactly() {
        let mut tw = typewriter(DEFAULT_TYPING_INTERVAL);
        let mut transcript = Transcript::new();
        let full = "See [Pricing](https://atdigital.io/pricing) ✨";
        let id = tw.begin(&mut transcript, full).expect("message created");

        let ticks = run_to_end(&mut tw, &mut transcript);

        assert_eq!(ticks, full.chars().count());
        assert_eq!(text_of(&transcript, &id), full);
        assert!(!tw.is_streaming());
        assert_eq!(tw.scheduler().live_timers(), 0);
        assert_eq!(tw.tick(&mut transcript, &mut NoViewport), Tick::Idle);
    }

    #[test]
    fn links_are_extracted_once_up_front() {
        let mut tw = typewriter(DEFAULT_TYPING_INTERVAL);
        let mut transcript = Transcript::new();
        let id = tw
            .begin(&mut transcript, "Book via [Contact](https://atdigital.io/contact).")
            .expect("message created");

        let message = transcript.get(&id).expect("present");
        assert_eq!(message.links, vec![Link::new("https://atdigital.io/contact", "Contact")]);
        assert_eq!(message.text, "");
    }

    #[test]
    fn second_begin_finalizes_the_first_message() {
        let mut tw = typewriter(DEFAULT_TYPING_INTERVAL);
        let mut transcript = Transcript::new();
        let first = tw.begin(&mut transcript, "First reply").expect("first");
        for _ in 0..3 {
            tw.tick(&mut transcript, &mut NoViewport);
        }
        assert_eq!(text_of(&transcript, &first), "Fir");

        let second = tw.begin(&mut transcript, "Second").expect("second");

        assert_eq!(text_of(&transcript, &first), "First reply");
        assert_eq!(text_of(&transcript, &second), "");
        assert_eq!(tw.streaming_id(), Some(second.as_str()));
        assert_eq!(tw.scheduler().started().len(), 2);
        assert_eq!(tw.scheduler().live_timers(), 1);
    }

    #[test]
    fn blank_text_creates_no_bubble_but_still_finalizes() {
        let mut tw = typewriter(DEFAULT_TYPING_INTERVAL);
        let mut transcript = Transcript::new();
        let first = tw.begin(&mut transcript, "Typing").expect("first");
        tw.tick(&mut transcript, &mut NoViewport);

        assert_eq!(tw.begin(&mut transcript, " \n\t "), None);
        assert_eq!(transcript.len(), 1);
        assert_eq!(text_of(&transcript, &first), "Typing");
        assert!(!tw.is_streaming());
    }

    #[test]
    fn every_tick_requests_a_scroll() {
        let mut tw = typewriter(DEFAULT_TYPING_INTERVAL);
        let mut transcript = Transcript::new();
        let mut viewport = CountingViewport::default();
        tw.begin(&mut transcript, "abc");
        while tw.tick(&mut transcript, &mut viewport) != Tick::Idle {}

        assert_eq!(viewport.scrolls, 3);
    }

    #[test]
    fn interval_is_clamped_to_one_millisecond() {
        let mut tw = typewriter(Duration::ZERO);
        let mut transcript = Transcript::new();
        tw.begin(&mut transcript, "x");
        assert_eq!(tw.scheduler().started(), vec![MIN_TYPING_INTERVAL]);
    }

    #[test]
    fn cancel_stops_the_timer_and_leaves_text() {
        let mut tw = typewriter(DEFAULT_TYPING_INTERVAL);
        let mut transcript = Transcript::new();
        let id = tw.begin(&mut transcript, "Hello").expect("created");
        tw.tick(&mut transcript, &mut NoViewport);

        tw.cancel();

        assert_eq!(tw.scheduler().live_timers(), 0);
        assert_eq!(tw.tick(&mut transcript, &mut NoViewport), Tick::Idle);
        assert_eq!(text_of(&transcript, &id), "H");
    }

    #[test]
    fn dropping_the_typewriter_stops_the_timer() {
        let scheduler = ManualScheduler::default();
        let mut tw = Typewriter::new(scheduler.clone(), DEFAULT_TYPING_INTERVAL, LinkExtractor::default());
        let mut transcript = Transcript::new();
        tw.begin(&mut transcript, "Hello");
        assert_eq!(scheduler.live_timers(), 1);

        drop(tw);

        assert_eq!(scheduler.live_timers(), 0);
    }

    #[test]
    fn missing_target_abandons_the_session() {
        let mut tw = typewriter(DEFAULT_TYPING_INTERVAL);
        let mut transcript = Transcript::new();
        let id = tw.begin(&mut transcript, "Hello").expect("created");
        let mut other = Transcript::new();

        assert_eq!(tw.tick(&mut other, &mut NoViewport), Tick::Abandoned { id });
        assert!(!tw.is_streaming());
    }
}
