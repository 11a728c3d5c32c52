//! RateWatch TUI - terminal chart of a rate series
//!
//! Provides:
//! - A ratatui line chart widget with best/worst markers
//! - A full-screen viewer dismissed with q, Esc or Enter
//! - Off-screen rendering to plain text for non-interactive output

pub mod chart;
pub mod theme;
pub mod viewer;

pub use chart::RateChart;
pub use theme::Theme;
pub use viewer::{install_panic_hook, render_to_text, show_chart};
