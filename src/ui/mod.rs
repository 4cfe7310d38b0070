//! UI rendering module for the Touchline TUI
//!
//! This module contains all the rendering logic for the terminal user
//! interface, using the ratatui library for TUI components.

pub mod help_overlay;
pub mod matches;
pub mod standings;

pub use help_overlay::render as render_help_overlay;
pub use matches::render as render_matches;
pub use standings::render as render_standings;
