//! Key event handlers for each screen

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AirportFocus, AirportSearch, AppState, FlightSearch, FormField, Screen};

/// Convert key events to messages based on the current screen
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }

    match &state.screen {
        Screen::AirportSelection(search) => handle_key_airport_selection(search, key),
        Screen::FlightSearch(search) => handle_key_flight_search(search, key),
    }
}

fn handle_key_airport_selection(search: &AirportSearch, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => Some(Message::Quit),
        InputKey::Tab | InputKey::BackTab => Some(Message::AirportFocusToggle),
        InputKey::Up => Some(Message::AirportHighlightPrev),
        InputKey::Down => Some(Message::AirportHighlightNext),
        InputKey::Enter => match search.focus {
            AirportFocus::Query => Some(Message::SearchAirports),
            AirportFocus::List => search
                .highlighted_record()
                .cloned()
                .map(Message::SelectOrigin),
        },
        InputKey::Backspace if search.focus == AirportFocus::Query => {
            let mut query = search.query.clone();
            query.pop();
            Some(Message::AirportQueryChanged(query))
        }
        _ if search.focus == AirportFocus::Query => key.text_char().map(|c| {
            let mut query = search.query.clone();
            query.push(c);
            Message::AirportQueryChanged(query)
        }),
        _ => None,
    }
}

fn handle_key_flight_search(search: &FlightSearch, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Esc => return Some(Message::Back),
        InputKey::Tab => return Some(Message::FocusNext),
        InputKey::BackTab => return Some(Message::FocusPrev),
        InputKey::PageDown => return Some(Message::ResultsScrollDown),
        InputKey::PageUp => return Some(Message::ResultsScrollUp),
        _ => {}
    }

    match search.focus {
        FormField::Destination => handle_key_destination(search, key),
        FormField::Date => handle_key_date(search, key),
        FormField::Adults => match key {
            InputKey::Char('+') | InputKey::Up | InputKey::Right => Some(Message::AdultsIncrement),
            InputKey::Char('-') | InputKey::Down | InputKey::Left => Some(Message::AdultsDecrement),
            InputKey::Enter => Some(Message::SubmitSearch),
            _ => None,
        },
        FormField::Cabin => match key {
            InputKey::Right | InputKey::Down => Some(Message::CabinClassNext),
            InputKey::Left | InputKey::Up => Some(Message::CabinClassPrev),
            InputKey::Enter => Some(Message::SubmitSearch),
            _ => None,
        },
    }
}

fn handle_key_destination(search: &FlightSearch, key: InputKey) -> Option<Message> {
    let destination = &search.destination;
    match key {
        InputKey::Up => Some(Message::SuggestionHighlightPrev),
        InputKey::Down => Some(Message::SuggestionHighlightNext),
        // With the dropdown open Enter picks; otherwise it submits.
        InputKey::Enter => match destination.highlighted_suggestion() {
            Some(candidate) => Some(Message::SelectDestination(candidate.clone())),
            None => Some(Message::SubmitSearch),
        },
        InputKey::Backspace => {
            let mut query = destination.query().to_string();
            query.pop()?;
            Some(Message::DestinationQueryChanged(query))
        }
        _ => key.text_char().map(|c| {
            let mut query = destination.query().to_string();
            query.push(c);
            Message::DestinationQueryChanged(query)
        }),
    }
}

fn handle_key_date(search: &FlightSearch, key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter => Some(Message::SubmitSearch),
        InputKey::Backspace => {
            let mut date = search.date_input.clone();
            date.pop()?;
            Some(Message::TravelDateChanged(date))
        }
        InputKey::Char(c) if c.is_ascii_digit() || c == '-' => {
            let mut date = search.date_input.clone();
            date.push(c);
            Some(Message::TravelDateChanged(date))
        }
        _ => None,
    }
}
