//! Theme for the flightscout TUI.
//!
//! This module provides:
//! - `palette` - Raw color constants
//! - `styles` - Semantic style builder functions
//! - `icons` - Glyphs and the loading spinner

pub mod icons;
pub mod palette;
pub mod styles;
