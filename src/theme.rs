//! Visual theme as data.
//!
//! The source project shipped five near-identical copies of the converter,
//! differing only in palette and copy text. The state machine exists once;
//! a [`Theme`] carries everything a presentation layer needs to differ, so
//! adding a sixth look is a new preset, not a fork.

use serde::Serialize;

/// Injectable presentation data for one converter look.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Theme {
    /// Preset identifier, e.g. `"midnight"`.
    pub name: &'static str,
    /// Card title shown above the upload control.
    pub title: &'static str,
    /// Hint shown in the drop zone while nothing is selected.
    pub drop_hint: &'static str,
    /// Shown in the history panel when the list is empty.
    pub empty_history: &'static str,
    /// Accent colour as `#rrggbb`.
    pub accent: &'static str,
}

impl Theme {
    /// The five built-in presets, one per original variant.
    pub const PRESETS: [Theme; 5] = [
        Theme {
            name: "midnight",
            title: "PDF to PPT Converter",
            drop_hint: "Drag & drop a PDF here, or click to browse",
            empty_history: "No conversions yet.",
            accent: "#9c27b0",
        },
        Theme {
            name: "blush",
            title: "Slide Deck Maker",
            drop_hint: "Drop your PDF to get started",
            empty_history: "No conversions yet.",
            accent: "#e91e63",
        },
        Theme {
            name: "slate",
            title: "Convert PDF → PPTX",
            drop_hint: "Choose a PDF file",
            empty_history: "Nothing converted in this session.",
            accent: "#607d8b",
        },
        Theme {
            name: "aurora",
            title: "Deck Converter",
            drop_hint: "Drop a PDF or browse",
            empty_history: "No conversions yet.",
            accent: "#00bcd4",
        },
        Theme {
            name: "plain",
            title: "PDF to PPTX",
            drop_hint: "Select a PDF",
            empty_history: "History is empty.",
            accent: "#616161",
        },
    ];

    /// Look up a preset by name, case-insensitively.
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        Self::PRESETS.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::PRESETS[0].clone()
    }
}
