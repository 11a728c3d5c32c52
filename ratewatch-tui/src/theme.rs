//! Parrot/neon theme tokens for the rate chart
//!
//! # Color Palette
//! - **Background**: Near-black / deep charcoal (base layer)
//! - **Accent**: Electric cyan (the rate line, focus)
//! - **Positive**: Neon green (best rate, rising)
//! - **Negative**: Hot pink (worst rate, falling)
//! - **Muted**: Steel blue (axes, secondary text)

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Near-black background (primary surface)
    pub background: Color,
    /// Electric cyan accent (rate line, border)
    pub accent: Color,
    /// Neon green (best rate, rising)
    pub positive: Color,
    /// Hot pink (worst rate, falling)
    pub negative: Color,
    /// Neon orange (notices)
    pub warning: Color,
    /// Steel blue (axes)
    pub muted: Color,
    /// White (primary text)
    pub text_primary: Color,
    /// Light gray (axis titles, hints)
    pub text_secondary: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parrot_neon()
    }
}

impl Theme {
    pub fn parrot_neon() -> Self {
        Self {
            background: Color::Rgb(18, 18, 20),
            accent: Color::Rgb(0, 255, 255),
            positive: Color::Rgb(0, 255, 128),
            negative: Color::Rgb(255, 20, 147),
            warning: Color::Rgb(255, 140, 0),
            muted: Color::Rgb(100, 149, 237),
            text_primary: Color::White,
            text_secondary: Color::Rgb(170, 170, 170),
        }
    }

    /// Plain terminal colors, for output that is printed rather than drawn.
    pub fn monochrome() -> Self {
        Self {
            background: Color::Reset,
            accent: Color::Reset,
            positive: Color::Reset,
            negative: Color::Reset,
            warning: Color::Reset,
            muted: Color::Reset,
            text_primary: Color::Reset,
            text_secondary: Color::Reset,
        }
    }

    /// Color for the change between the first and last rate of a window.
    pub fn trend_color(&self, first: f64, last: f64) -> Color {
        if last > first {
            self.positive
        } else if last < first {
            self.negative
        } else {
            self.text_secondary
        }
    }
}
