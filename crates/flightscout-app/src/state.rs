//! Application state (Model in TEA pattern)

use std::num::NonZeroU32;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};

use flightscout_core::{AirportRecord, AirportRef, CabinClass, Itinerary, Notification, SearchCriteria};

use crate::autocomplete::DestinationSearch;
use crate::config::Settings;

/// Tags a request so late completions can be recognised and dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestId(u64);

/// Which part of the airport screen receives typing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AirportFocus {
    #[default]
    Query,
    List,
}

/// Origin airport selection screen
#[derive(Debug, Default)]
pub struct AirportSearch {
    pub query: String,
    pub results: Vec<AirportRecord>,
    pub highlighted: usize,
    pub loading: bool,
    pub request: Option<RequestId>,
    pub focus: AirportFocus,
}

impl AirportSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn highlighted_record(&self) -> Option<&AirportRecord> {
        self.results.get(self.highlighted)
    }

    /// Start a request, superseding any in flight
    pub fn begin_request(&mut self, request: RequestId) {
        self.request = Some(request);
        self.loading = true;
    }

    /// Finish `request` if it is the current one. Returns false for stale
    /// completions.
    pub fn finish_request(&mut self, request: RequestId) -> bool {
        if self.request != Some(request) {
            return false;
        }
        self.request = None;
        self.loading = false;
        true
    }

    pub fn set_results(&mut self, results: Vec<AirportRecord>) {
        self.results = results;
        self.highlighted = 0;
    }

    pub fn highlight_next(&mut self) {
        if !self.results.is_empty() {
            self.highlighted = (self.highlighted + 1).min(self.results.len() - 1);
        }
    }

    pub fn highlight_prev(&mut self) {
        self.highlighted = self.highlighted.saturating_sub(1);
    }
}

/// Flight search form fields, in focus order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Destination,
    Date,
    Adults,
    Cabin,
}

impl FormField {
    const ORDER: [FormField; 4] = [
        FormField::Destination,
        FormField::Date,
        FormField::Adults,
        FormField::Cabin,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Where the destination selection stands
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchPhase {
    /// No destination picked yet (or the pick was edited away)
    #[default]
    Editing,
    /// A validated suggestion was picked
    Selected { destination: AirportRef },
    /// Flight search in flight
    Submitting {
        criteria: SearchCriteria,
        request: RequestId,
    },
    /// Flight search finished; the list may be empty
    Results {
        criteria: SearchCriteria,
        itineraries: Vec<Itinerary>,
    },
}

impl SearchPhase {
    pub fn destination(&self) -> Option<&AirportRef> {
        match self {
            SearchPhase::Editing => None,
            SearchPhase::Selected { destination } => Some(destination),
            SearchPhase::Submitting { criteria, .. } | SearchPhase::Results { criteria, .. } => {
                Some(criteria.destination())
            }
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, SearchPhase::Submitting { .. })
    }

    pub fn itineraries(&self) -> &[Itinerary] {
        match self {
            SearchPhase::Results { itineraries, .. } => itineraries,
            _ => &[],
        }
    }
}

/// Flight search screen. Exists only while an origin is selected; dropping it
/// cancels any pending destination lookup.
#[derive(Debug)]
pub struct FlightSearch {
    pub origin: AirportRef,
    pub destination: DestinationSearch,
    pub phase: SearchPhase,
    /// Travel date as typed, `YYYY-MM-DD`
    pub date_input: String,
    pub adults: NonZeroU32,
    pub cabin_class: CabinClass,
    pub focus: FormField,
    pub results_scroll: usize,
}

impl FlightSearch {
    pub fn new(origin: AirportRef) -> Self {
        Self::with_date(origin, Local::now().date_naive())
    }

    pub fn with_date(origin: AirportRef, date: NaiveDate) -> Self {
        Self {
            origin,
            destination: DestinationSearch::new(),
            phase: SearchPhase::Editing,
            date_input: date.format("%Y-%m-%d").to_string(),
            adults: NonZeroU32::MIN,
            cabin_class: CabinClass::default(),
            focus: FormField::default(),
            results_scroll: 0,
        }
    }

    pub fn selected_destination(&self) -> Option<&AirportRef> {
        self.phase.destination()
    }

    /// Parse the date field, rejecting anything before `today`
    pub fn travel_date(&self, today: NaiveDate) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date_input.trim(), "%Y-%m-%d")
            .ok()
            .filter(|date| *date >= today)
    }

    pub fn increment_adults(&mut self) {
        self.adults = self.adults.saturating_add(1);
    }

    pub fn decrement_adults(&mut self) {
        if let Some(n) = NonZeroU32::new(self.adults.get() - 1) {
            self.adults = n;
        }
    }
}

/// Top-level screen
#[derive(Debug)]
pub enum Screen {
    /// No origin selected yet
    AirportSelection(AirportSearch),
    /// Origin selected; destination and flight search
    FlightSearch(Box<FlightSearch>),
}

/// A notification currently on screen
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub notification: Notification,
    pub shown_at: Instant,
}

/// Application phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Complete application state (the Model in TEA)
#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,

    /// Most recent notification, cleared on expiry
    pub toast: Option<Toast>,

    pub settings: Settings,

    pub phase: AppPhase,

    /// Spinner frame, advanced on every tick
    pub animation_frame: u64,

    next_request: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            screen: Screen::AirportSelection(AirportSearch::new()),
            toast: None,
            settings,
            phase: AppPhase::Running,
            animation_frame: 0,
            next_request: 0,
        }
    }

    pub fn next_request_id(&mut self) -> RequestId {
        self.next_request += 1;
        RequestId(self.next_request)
    }

    pub fn airport_search(&self) -> Option<&AirportSearch> {
        match &self.screen {
            Screen::AirportSelection(search) => Some(search),
            Screen::FlightSearch(_) => None,
        }
    }

    pub fn airport_search_mut(&mut self) -> Option<&mut AirportSearch> {
        match &mut self.screen {
            Screen::AirportSelection(search) => Some(search),
            Screen::FlightSearch(_) => None,
        }
    }

    pub fn flight_search(&self) -> Option<&FlightSearch> {
        match &self.screen {
            Screen::FlightSearch(search) => Some(search),
            Screen::AirportSelection(_) => None,
        }
    }

    pub fn flight_search_mut(&mut self) -> Option<&mut FlightSearch> {
        match &mut self.screen {
            Screen::FlightSearch(search) => Some(search),
            Screen::AirportSelection(_) => None,
        }
    }

    /// Selected origin, if the flight search screen is active
    pub fn origin(&self) -> Option<&AirportRef> {
        self.flight_search().map(|search| &search.origin)
    }

    pub fn show_notification(&mut self, notification: Notification, now: Instant) {
        self.toast = Some(Toast {
            notification,
            shown_at: now,
        });
    }

    /// Drop the toast once it has been visible for `ui.notification_ms`
    pub fn expire_toast(&mut self, now: Instant) {
        let ttl = Duration::from_millis(self.settings.ui.notification_ms);
        if let Some(toast) = &self.toast {
            if now.saturating_duration_since(toast.shown_at) >= ttl {
                self.toast = None;
            }
        }
    }

    pub fn request_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }
}
