//! Colour handling for the panel.
//!
//! This module provides:
//! - `palette` - Fallback colours and `#RRGGBB` parsing
//! - `styles` - Per-line styles resolved from the active display style

pub mod palette;
pub mod styles;

pub use styles::PanelColors;
