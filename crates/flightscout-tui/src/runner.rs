//! Main TUI runner - entry point and event loop
//!
//! Builds the travel API client and locator from settings, then runs the
//! render/poll loop until the user quits.

use tokio::sync::mpsc;

use flightscout_app::config::Settings;
use flightscout_app::message::Message;
use flightscout_app::process::process_message;
use flightscout_app::state::AppState;
use flightscout_app::Services;
use flightscout_core::prelude::*;
use flightscout_gateway::{HttpTravelApi, Locator, SystemLocator, TravelApi};

use super::{event, render, terminal};

/// Run the TUI with the given settings
pub async fn run(settings: Settings) -> Result<()> {
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    let api = HttpTravelApi::new(settings.api.clone())?;
    let locator = SystemLocator::from_mode(
        settings.location.mode,
        settings.location.coordinates(),
        &settings.location.ip_lookup_url,
    );
    info!(
        "Loaded settings: api={}, location={:?}",
        settings.api.base_url, settings.location.mode
    );
    let services = Services::new(api, locator);

    // Initialize terminal
    let mut term = ratatui::try_init().map_err(|e| Error::TerminalInit(e.to_string()))?;

    let mut state = AppState::with_settings(settings);

    // Background tasks report here
    let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);

    // The airport screen opens with the nearby list
    process_message(&mut state, Message::LoadNearbyAirports, &msg_tx, &services);

    let result = run_loop(&mut term, &mut state, msg_rx, msg_tx, &services);

    // Restore terminal
    ratatui::restore();

    if let Err(ref e) = result {
        error!("TUI loop exited with error: {}", e);
    } else {
        info!("flightscout exiting");
    }
    result
}

/// Main event loop
fn run_loop<A, L>(
    terminal: &mut ratatui::DefaultTerminal,
    state: &mut AppState,
    mut msg_rx: mpsc::Receiver<Message>,
    msg_tx: mpsc::Sender<Message>,
    services: &Services<A, L>,
) -> Result<()>
where
    A: TravelApi + Sync + 'static,
    L: Locator + Sync + 'static,
{
    while !state.should_quit() {
        // Apply results posted by background tasks
        while let Ok(msg) = msg_rx.try_recv() {
            process_message(state, msg, &msg_tx, services);
        }

        // Render
        terminal
            .draw(|frame| render::view(frame, state))
            .map_err(|e| Error::terminal(e.to_string()))?;

        // Handle terminal events
        if let Some(message) = event::poll()? {
            process_message(state, message, &msg_tx, services);
        }
    }

    Ok(())
}
