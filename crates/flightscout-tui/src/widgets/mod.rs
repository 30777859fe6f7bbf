//! Custom widget components

mod airport_list;
mod header;
mod itinerary_list;
mod key_hints;
mod search_form;
mod suggestions;
mod toast;

pub use airport_list::AirportList;
pub use header::MainHeader;
pub use itinerary_list::ItineraryList;
pub use key_hints::KeyHints;
pub use search_form::SearchForm;
pub use suggestions::Suggestions;
pub use toast::Toast;
