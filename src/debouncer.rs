use log::debug;
use std::time::Duration;
use tokio::time::Instant;

pub const QUIET_PERIOD: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    SearchTriggered(String),
    UnfilteredRequested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Idle,
    Armed { text: String, deadline: Instant },
}

/// Coalesces search-bar edits into at most one search per quiet period.
///
/// There is a single deadline; re-arming replaces it. The owner is expected
/// to wait for [`SearchDebouncer::deadline`] and then call
/// [`SearchDebouncer::poll`].
#[derive(Debug)]
pub struct SearchDebouncer {
    quiet_period: Duration,
    state: State,
}

impl SearchDebouncer {
    pub fn new(quiet_period: Duration) -> Self {
        SearchDebouncer {
            quiet_period,
            state: State::Idle,
        }
    }

    /// Returns true if the change armed the debouncer.
    pub fn on_text_change(&mut self, text: &str, now: Instant) -> bool {
        if text.is_empty() {
            return false;
        }
        if let State::Armed { text: previous, .. } = &self.state {
            debug!("Search for {:?} superseded by {:?}", previous, text);
        }
        self.state = State::Armed {
            text: text.to_string(),
            deadline: now + self.quiet_period,
        };
        true
    }

    pub fn on_cancel_button(&mut self) -> SearchEvent {
        if let State::Armed { text, .. } = &self.state {
            debug!("Search for {:?} cancelled", text);
        }
        self.state = State::Idle;
        SearchEvent::UnfilteredRequested
    }

    pub fn poll(&mut self, now: Instant) -> Option<SearchEvent> {
        if !matches!(&self.state, State::Armed { deadline, .. } if *deadline <= now) {
            return None;
        }
        match std::mem::replace(&mut self.state, State::Idle) {
            State::Armed { text, .. } => Some(SearchEvent::SearchTriggered(text)),
            State::Idle => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            State::Armed { deadline, .. } => Some(*deadline),
            State::Idle => None,
        }
    }

    pub fn disarm(&mut self) {
        self.state = State::Idle;
    }
}

#[cfg(test)]
impl SearchDebouncer {
    fn pending_text(&self) -> Option<&str> {
        match &self.state {
            State::Armed { text, .. } => Some(text.as_str()),
            State::Idle => None,
        }
    }

    fn is_armed(&self) -> bool {
        matches!(self.state, State::Armed { .. })
    }
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(QUIET_PERIOD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn rapid_changes_fire_once_with_last_text() {
        let t0 = Instant::now();
        let mut d = SearchDebouncer::default();

        assert!(d.on_text_change("h", t0));
        assert!(d.on_text_change("hu", t0 + ms(300)));
        assert_eq!(Some(t0 + ms(1100)), d.deadline());

        // the first arm's deadline has passed but was superseded
        assert_eq!(None, d.poll(t0 + ms(800)));
        assert_eq!(None, d.poll(t0 + ms(1099)));
        assert_eq!(
            Some(SearchEvent::SearchTriggered("hu".into())),
            d.poll(t0 + ms(1100))
        );
        assert_eq!(None, d.poll(t0 + ms(5000)));
        assert!(!d.is_armed());
    }

    #[test]
    fn each_quiet_period_fires_once() {
        let t0 = Instant::now();
        let mut d = SearchDebouncer::default();

        d.on_text_change("spi", t0);
        assert_eq!(
            Some(SearchEvent::SearchTriggered("spi".into())),
            d.poll(t0 + ms(900))
        );
        d.on_text_change("spider", t0 + ms(1000));
        assert_eq!(
            Some(SearchEvent::SearchTriggered("spider".into())),
            d.poll(t0 + ms(1800))
        );
    }

    #[test]
    fn empty_text_never_arms() {
        let t0 = Instant::now();
        let mut d = SearchDebouncer::default();

        assert!(!d.on_text_change("", t0));
        assert!(!d.is_armed());
        assert_eq!(None, d.deadline());
        assert_eq!(None, d.poll(t0 + ms(10_000)));
    }

    #[test]
    fn empty_text_leaves_existing_arm_alone() {
        let t0 = Instant::now();
        let mut d = SearchDebouncer::default();

        d.on_text_change("x", t0);
        assert!(!d.on_text_change("", t0 + ms(500)));
        assert_eq!(Some("x"), d.pending_text());
        assert_eq!(Some(t0 + ms(800)), d.deadline());
    }

    #[test]
    fn cancel_disarms_and_requests_listing() {
        let t0 = Instant::now();
        let mut d = SearchDebouncer::default();

        d.on_text_change("x", t0);
        assert_eq!(SearchEvent::UnfilteredRequested, d.on_cancel_button());
        assert!(!d.is_armed());
        assert_eq!(None, d.poll(t0 + ms(2000)));
    }

    #[test]
    fn cancel_while_idle_still_requests_listing() {
        let mut d = SearchDebouncer::default();
        assert_eq!(SearchEvent::UnfilteredRequested, d.on_cancel_button());
    }

    #[test]
    fn custom_quiet_period() {
        let t0 = Instant::now();
        let mut d = SearchDebouncer::new(ms(100));

        d.on_text_change("thor", t0);
        assert_eq!(Some(t0 + ms(100)), d.deadline());
    }

    proptest! {
        /// Replays arbitrary edit sequences, polling just before each edit.
        #[test]
        fn prop_one_search_per_quiet_period(
            steps in prop::collection::vec((0u64..2000, "[a-z]{0,3}"), 1..40)
        ) {
            let mut now = Instant::now();
            let mut d = SearchDebouncer::default();
            let mut last_text: Option<String> = None;
            let mut last_change = now;
            let mut unfired = false;

            for (gap, text) in steps {
                now += ms(gap);
                let due = unfired && now - last_change >= QUIET_PERIOD;
                match d.poll(now) {
                    Some(SearchEvent::SearchTriggered(fired)) => {
                        prop_assert!(due, "fired inside a quiet period or twice in one");
                        prop_assert_eq!(Some(&fired), last_text.as_ref());
                        unfired = false;
                    }
                    Some(other) => prop_assert!(false, "unexpected {:?}", other),
                    None => prop_assert!(!due, "quiet period elapsed without a search"),
                }

                let armed = d.on_text_change(&text, now);
                prop_assert_eq!(armed, !text.is_empty());
                if armed {
                    last_text = Some(text);
                    last_change = now;
                    unfired = true;
                }
            }

            let tail = d.poll(now + QUIET_PERIOD);
            if unfired {
                prop_assert_eq!(tail, last_text.map(SearchEvent::SearchTriggered));
            } else {
                prop_assert_eq!(tail, None);
            }
            prop_assert_eq!(d.poll(now + QUIET_PERIOD * 10), None);
        }
    }
}
