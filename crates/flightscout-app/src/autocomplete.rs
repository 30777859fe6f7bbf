//! Destination autocomplete engine
//!
//! Turns keystrokes in the destination field into at most one remote lookup
//! per pause in typing. Each query change invalidates whatever came before
//! it: the pending debounce timer is cancelled, the in-flight lookup is
//! aborted, and a new [`LookupTicket`] is issued. Completions carrying any
//! other ticket are dropped, so suggestions always belong to the last query
//! the user typed.
//!
//! The engine is synchronous. Timers and network calls are described by the
//! returned [`ScheduledLookup`] / [`LookupRequest`] values and executed by the
//! action layer, which reports back through messages.

use std::time::Duration;

use flightscout_core::prelude::*;
use flightscout_core::{valid_refs, AirportRecord, AirportRef, Notification};
use flightscout_gateway::CancelToken;

/// Quiet period after the last keystroke before a lookup is issued
pub const DESTINATION_DEBOUNCE: Duration = Duration::from_millis(500);

pub const LOOKUP_FAILED_MESSAGE: &str = "Error searching destination";
pub const INVALID_DESTINATION_MESSAGE: &str =
    "Selected destination does not have valid identifiers.";

/// Identifies one query change. Strictly increasing per engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LookupTicket(u64);

impl LookupTicket {
    fn next(self) -> Self {
        LookupTicket(self.0 + 1)
    }
}

/// Debounce timer to arm on behalf of the engine
#[derive(Debug, Clone)]
pub struct ScheduledLookup {
    pub ticket: LookupTicket,
    pub query: String,
    pub delay: Duration,
    /// Cancelled when the timer is superseded
    pub timer: CancelToken,
}

/// Remote lookup to run on behalf of the engine
#[derive(Debug, Clone)]
pub struct LookupRequest {
    pub ticket: LookupTicket,
    pub query: String,
    pub cancel: CancelToken,
}

/// How a destination lookup ended
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Found(Vec<AirportRecord>),
    Cancelled,
    Failed(String),
}

impl From<Result<Vec<AirportRecord>>> for LookupOutcome {
    fn from(result: Result<Vec<AirportRecord>>) -> Self {
        match result {
            Ok(records) => LookupOutcome::Found(records),
            Err(e) if e.is_cancelled() => LookupOutcome::Cancelled,
            Err(e) => LookupOutcome::Failed(e.to_string()),
        }
    }
}

/// Owned cancellation handles for the current lookup.
///
/// Arming a handle always cancels its predecessor first. Dropping the
/// handles cancels everything still pending.
#[derive(Debug, Default)]
pub struct LookupHandles {
    ticket: LookupTicket,
    timer: Option<CancelToken>,
    request: Option<CancelToken>,
}

impl LookupHandles {
    pub fn current(&self) -> LookupTicket {
        self.ticket
    }

    /// True if no timer is armed and no request is in flight
    #[cfg(test)]
    pub(crate) fn is_idle(&self) -> bool {
        self.timer.is_none() && self.request.is_none()
    }

    pub fn timer_armed(&self) -> bool {
        self.timer.is_some()
    }

    /// Cancel everything and move to a fresh ticket
    fn invalidate(&mut self) -> LookupTicket {
        self.cancel_all();
        self.ticket = self.ticket.next();
        self.ticket
    }

    fn arm_timer(&mut self) -> CancelToken {
        if let Some(old) = self.timer.take() {
            old.cancel();
        }
        let token = CancelToken::new();
        self.timer = Some(token.clone());
        token
    }

    fn start_request(&mut self) -> CancelToken {
        if let Some(old) = self.request.take() {
            old.cancel();
        }
        let token = CancelToken::new();
        self.request = Some(token.clone());
        token
    }

    fn cancel_all(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
        }
        if let Some(request) = self.request.take() {
            request.cancel();
        }
    }
}

impl Drop for LookupHandles {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// State of the destination input and its suggestion dropdown
#[derive(Debug, Default)]
pub struct DestinationSearch {
    query: String,
    suggestions: Vec<AirportRef>,
    highlighted: usize,
    loading: bool,
    lookup: LookupHandles,
}

impl DestinationSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[AirportRef] {
        &self.suggestions
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn highlighted_suggestion(&self) -> Option<&AirportRef> {
        self.suggestions.get(self.highlighted)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn lookup(&self) -> &LookupHandles {
        &self.lookup
    }

    /// Record a new query. Returns the debounce timer to arm, or `None` for
    /// an empty query (suggestions are cleared immediately).
    pub fn on_query_change(&mut self, text: impl Into<String>) -> Option<ScheduledLookup> {
        self.query = text.into();
        let ticket = self.lookup.invalidate();
        self.loading = false;

        if self.query.is_empty() {
            self.clear_suggestions();
            return None;
        }

        let timer = self.lookup.arm_timer();
        trace!("destination lookup {:?} scheduled for {:?}", ticket, self.query);
        Some(ScheduledLookup {
            ticket,
            query: self.query.clone(),
            delay: DESTINATION_DEBOUNCE,
            timer,
        })
    }

    /// The debounce window for `ticket` closed. Returns the lookup to run if
    /// the ticket is still current.
    pub fn on_debounce_elapsed(&mut self, ticket: LookupTicket) -> Option<LookupRequest> {
        if ticket != self.lookup.current() || !self.lookup.timer_armed() {
            trace!("ignoring stale debounce {:?}", ticket);
            return None;
        }
        self.lookup.timer = None;
        let cancel = self.lookup.start_request();
        self.loading = true;
        Some(LookupRequest {
            ticket,
            query: self.query.clone(),
            cancel,
        })
    }

    /// Apply a lookup result. Stale tickets are ignored; a failure clears the
    /// dropdown and yields an error notification.
    pub fn on_lookup_completed(
        &mut self,
        ticket: LookupTicket,
        outcome: LookupOutcome,
    ) -> Option<Notification> {
        if ticket != self.lookup.current() {
            trace!("discarding superseded lookup {:?}", ticket);
            return None;
        }
        self.lookup.request = None;
        self.loading = false;

        match outcome {
            LookupOutcome::Found(records) => {
                let total = records.len();
                self.suggestions = valid_refs(&records);
                self.highlighted = 0;
                debug!(
                    "destination lookup {:?}: {} of {} records usable",
                    ticket,
                    self.suggestions.len(),
                    total
                );
                None
            }
            LookupOutcome::Cancelled => None,
            LookupOutcome::Failed(reason) => {
                warn!("destination lookup for {:?} failed: {}", self.query, reason);
                self.clear_suggestions();
                Some(Notification::error(LOOKUP_FAILED_MESSAGE))
            }
        }
    }

    /// Accept a suggestion. Candidates missing an identifier are rejected
    /// without touching any state.
    pub fn on_suggestion_select(
        &mut self,
        candidate: &AirportRef,
    ) -> std::result::Result<AirportRef, Notification> {
        if !candidate.has_identifiers() {
            return Err(Notification::warning(INVALID_DESTINATION_MESSAGE));
        }
        self.lookup.invalidate();
        self.loading = false;
        self.clear_suggestions();
        self.query = candidate.name().to_string();
        Ok(candidate.clone())
    }

    pub fn highlight_next(&mut self) {
        if !self.suggestions.is_empty() {
            self.highlighted = (self.highlighted + 1) % self.suggestions.len();
        }
    }

    pub fn highlight_prev(&mut self) {
        if !self.suggestions.is_empty() {
            self.highlighted = self
                .highlighted
                .checked_sub(1)
                .unwrap_or(self.suggestions.len() - 1);
        }
    }

    fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.highlighted = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flightscout_gateway::test_utils::{airport_record, bare_record};

    fn heathrow() -> AirportRef {
        AirportRef::new("London Heathrow", "LHR", "95565050")
    }

    #[test]
    fn test_query_change_schedules_lookup() {
        let mut search = DestinationSearch::new();
        let scheduled = search.on_query_change("Lon").expect("scheduled");

        assert_eq!(scheduled.query, "Lon");
        assert_eq!(scheduled.delay, DESTINATION_DEBOUNCE);
        assert_eq!(scheduled.ticket, search.lookup().current());
        assert!(search.lookup().timer_armed());
        assert!(!search.is_loading());
    }

    #[test]
    fn test_new_query_cancels_previous_timer() {
        let mut search = DestinationSearch::new();
        let first = search.on_query_change("L").unwrap();
        let second = search.on_query_change("Lo").unwrap();

        assert!(first.timer.is_cancelled());
        assert!(!second.timer.is_cancelled());
        assert!(second.ticket > first.ticket);
    }

    #[test]
    fn test_empty_query_clears_immediately() {
        let mut search = DestinationSearch::new();
        let scheduled = search.on_query_change("Lon").unwrap();
        let request = search.on_debounce_elapsed(scheduled.ticket).unwrap();
        search.on_lookup_completed(
            request.ticket,
            LookupOutcome::Found(vec![airport_record("Heathrow", "LHR", "95565050")]),
        );
        assert_eq!(search.suggestions().len(), 1);

        assert!(search.on_query_change("").is_none());
        assert!(search.suggestions().is_empty());
        assert!(search.lookup().is_idle());
    }

    #[test]
    fn test_clearing_mid_debounce_cancels_timer() {
        let mut search = DestinationSearch::new();
        let scheduled = search.on_query_change("Par").unwrap();

        assert!(search.on_query_change("").is_none());
        assert!(scheduled.timer.is_cancelled());
        // The old timer firing anyway must not start a lookup.
        assert!(search.on_debounce_elapsed(scheduled.ticket).is_none());
        assert!(!search.is_loading());
    }

    #[test]
    fn test_stale_debounce_is_ignored() {
        let mut search = DestinationSearch::new();
        let first = search.on_query_change("L").unwrap();
        let second = search.on_query_change("Lo").unwrap();

        assert!(search.on_debounce_elapsed(first.ticket).is_none());
        let request = search.on_debounce_elapsed(second.ticket).unwrap();
        assert_eq!(request.query, "Lo");
        assert!(search.is_loading());
        // Firing twice does not issue a second lookup.
        assert!(search.on_debounce_elapsed(second.ticket).is_none());
    }

    #[test]
    fn test_typing_aborts_in_flight_lookup() {
        let mut search = DestinationSearch::new();
        let scheduled = search.on_query_change("Lon").unwrap();
        let request = search.on_debounce_elapsed(scheduled.ticket).unwrap();

        search.on_query_change("Lond");
        assert!(request.cancel.is_cancelled());
        assert!(!search.is_loading());
    }

    #[test]
    fn test_superseded_lookup_never_writes_suggestions() {
        let mut search = DestinationSearch::new();
        let a = search.on_query_change("Par").unwrap();
        let request_a = search.on_debounce_elapsed(a.ticket).unwrap();

        let b = search.on_query_change("Pari").unwrap();
        let request_b = search.on_debounce_elapsed(b.ticket).unwrap();

        // B resolves first, then A's late response arrives.
        search.on_lookup_completed(
            request_b.ticket,
            LookupOutcome::Found(vec![airport_record("Paris", "PARI", "27539733")]),
        );
        let late = search.on_lookup_completed(
            request_a.ticket,
            LookupOutcome::Found(vec![airport_record("Parma", "PMF", "95673553")]),
        );

        assert!(late.is_none());
        assert_eq!(search.suggestions().len(), 1);
        assert_eq!(search.suggestions()[0].name(), "Paris");
    }

    #[test]
    fn test_lookup_filters_records_without_identifiers() {
        let mut search = DestinationSearch::new();
        let scheduled = search.on_query_change("Lon").unwrap();
        let request = search.on_debounce_elapsed(scheduled.ticket).unwrap();

        let mut city_only = bare_record("London City");
        city_only.sky_id = Some("LCY".into());
        let records = vec![
            bare_record("London Any"),
            city_only,
            airport_record("Heathrow", "LHR", "95565050"),
        ];
        search.on_lookup_completed(request.ticket, LookupOutcome::Found(records));

        assert_eq!(
            search.suggestions(),
            &[AirportRef::new("Heathrow", "LHR", "95565050")]
        );
        assert!(!search.is_loading());
    }

    #[test]
    fn test_failed_lookup_clears_and_notifies() {
        let mut search = DestinationSearch::new();
        let scheduled = search.on_query_change("Lon").unwrap();
        let request = search.on_debounce_elapsed(scheduled.ticket).unwrap();

        let notification = search
            .on_lookup_completed(request.ticket, LookupOutcome::Failed("HTTP 500".into()))
            .expect("notification");

        assert_eq!(notification, Notification::error(LOOKUP_FAILED_MESSAGE));
        assert!(search.suggestions().is_empty());
        assert!(!search.is_loading());
    }

    #[test]
    fn test_cancelled_lookup_is_silent() {
        let mut search = DestinationSearch::new();
        let scheduled = search.on_query_change("Lon").unwrap();
        let request = search.on_debounce_elapsed(scheduled.ticket).unwrap();

        assert!(search
            .on_lookup_completed(request.ticket, LookupOutcome::Cancelled)
            .is_none());
        assert!(!search.is_loading());
    }

    #[test]
    fn test_select_valid_suggestion() {
        let mut search = DestinationSearch::new();
        search.on_query_change("Heath");

        let selected = search.on_suggestion_select(&heathrow()).unwrap();
        assert_eq!(selected, heathrow());
        assert_eq!(search.query(), "London Heathrow");
        assert!(search.suggestions().is_empty());
        assert!(search.lookup().is_idle());
    }

    #[test]
    fn test_select_invalid_suggestion_changes_nothing() {
        let mut search = DestinationSearch::new();
        search.on_query_change("Lon");

        let err = search
            .on_suggestion_select(&AirportRef::new("London", "", "27544008"))
            .unwrap_err();
        assert_eq!(err, Notification::warning(INVALID_DESTINATION_MESSAGE));
        assert_eq!(search.query(), "Lon");
        assert!(search.lookup().timer_armed());
    }

    #[test]
    fn test_highlight_wraps() {
        let mut search = DestinationSearch::new();
        let scheduled = search.on_query_change("a").unwrap();
        let request = search.on_debounce_elapsed(scheduled.ticket).unwrap();
        search.on_lookup_completed(
            request.ticket,
            LookupOutcome::Found(vec![
                airport_record("A", "AAA", "1"),
                airport_record("B", "BBB", "2"),
            ]),
        );

        search.highlight_prev();
        assert_eq!(search.highlighted(), 1);
        search.highlight_next();
        assert_eq!(search.highlighted(), 0);
        assert_eq!(search.highlighted_suggestion().map(|s| s.sky_id()), Some("AAA"));
    }

    #[test]
    fn test_dropping_engine_cancels_pending_work() {
        let mut search = DestinationSearch::new();
        let scheduled = search.on_query_change("Lon").unwrap();
        drop(search);
        assert!(scheduled.timer.is_cancelled());
    }

    #[test]
    fn test_outcome_from_result() {
        assert_eq!(
            LookupOutcome::from(Err(Error::Cancelled)),
            LookupOutcome::Cancelled
        );
        assert!(matches!(
            LookupOutcome::from(Err(Error::http_status("searchAirport", 429))),
            LookupOutcome::Failed(_)
        ));
    }
}
