//! Terminal setup and restoration

use flightscout_core::prelude::*;

/// Install a panic hook that restores the terminal before the report prints
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        error!("panic: {}", panic_info);
        original_hook(panic_info);
    }));
}
