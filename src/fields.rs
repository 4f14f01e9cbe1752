//! Enumerations and field types for planner tasks.
//!
//! Categories are persisted as their display label, glyph included, so the
//! task file reads the same way the page shows it.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Fixed set of task categories offered by the selector.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
pub enum Category {
    #[default]
    #[serde(rename = "🏠 Home")]
    Home,
    #[serde(rename = "💼 Work")]
    Work,
    #[serde(rename = "🧘 Self-care")]
    #[value(name = "self-care")]
    SelfCare,
    #[serde(rename = "🎓 Study")]
    Study,
}

impl Category {
    /// All categories in selector order.
    pub const ALL: [Category; 4] = [
        Category::Home,
        Category::Work,
        Category::SelfCare,
        Category::Study,
    ];

    /// Label including the icon glyph, as stored and displayed.
    pub fn label(self) -> &'static str {
        match self {
            Category::Home => "🏠 Home",
            Category::Work => "💼 Work",
            Category::SelfCare => "🧘 Self-care",
            Category::Study => "🎓 Study",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Toast flavour for feedback after an interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
}
