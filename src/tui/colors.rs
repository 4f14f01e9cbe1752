//! Color constants for the terminal user interface.

use ratatui::style::Color;

/// Focused field and header accent
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Completed rows and success toasts
pub const DONE_GREEN: Color = Color::Rgb(0, 160, 60);
/// Quote side panel
pub const DARK_GREEN: Color = Color::Rgb(0, 80, 0);
/// Warning toasts
pub const AMBER: Color = Color::Rgb(230, 140, 0);
