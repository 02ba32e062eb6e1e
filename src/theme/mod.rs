//! Theme - the page's semantic colors.
//!
//! Sections alternate between a dark tone (navy background, yellow
//! headings) and a light tone (white background, blue headings). Views ask
//! for colors by role and tone; only the presets know hex values.
//!
//! # Example
//!
//! ```ignore
//! use folio_tui::theme::{get_preset, Tone};
//!
//! let theme = get_preset("portfolio").unwrap();
//! let heading = theme.heading(Tone::Dark);
//! ```

use crate::types::Rgba;

// =============================================================================
// Tailwind palette subset
// =============================================================================

pub mod palette {
    use crate::types::Rgba;

    pub const BLUE_950: Rgba = Rgba::from_rgb_int(0x172554);
    pub const BLUE_900: Rgba = Rgba::from_rgb_int(0x1e3a8a);
    pub const BLUE_800: Rgba = Rgba::from_rgb_int(0x1e40af);
    pub const BLUE_700: Rgba = Rgba::from_rgb_int(0x1d4ed8);
    pub const YELLOW_400: Rgba = Rgba::from_rgb_int(0xfacc15);
    pub const YELLOW_300: Rgba = Rgba::from_rgb_int(0xfde047);
    pub const WHITE: Rgba = Rgba::from_rgb_int(0xffffff);
    pub const GRAY_100: Rgba = Rgba::from_rgb_int(0xf3f4f6);
    pub const GRAY_300: Rgba = Rgba::from_rgb_int(0xd1d5db);
    pub const GRAY_400: Rgba = Rgba::from_rgb_int(0x9ca3af);
    pub const GRAY_500: Rgba = Rgba::from_rgb_int(0x6b7280);
    pub const GRAY_600: Rgba = Rgba::from_rgb_int(0x4b5563);
    pub const GRAY_900: Rgba = Rgba::from_rgb_int(0x111827);
}

// =============================================================================
// Tone
// =============================================================================

/// Background tone of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Dark,
    Light,
}

impl Tone {
    /// Tone of the `n`th section after the hero (Skills is light).
    pub fn alternating(n: usize) -> Self {
        if n % 2 == 0 { Tone::Light } else { Tone::Dark }
    }
}

// =============================================================================
// Theme
// =============================================================================

/// Semantic colors, one value per role and tone.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,

    // Dark tone
    pub dark_bg: Rgba,
    pub dark_text: Rgba,
    pub dark_muted: Rgba,
    pub dark_heading: Rgba,
    /// Cards on dark sections.
    pub surface: Rgba,
    pub surface_border: Rgba,

    // Light tone
    pub light_bg: Rgba,
    pub light_text: Rgba,
    pub light_muted: Rgba,
    pub light_heading: Rgba,
    /// Cards on light sections.
    pub light_surface: Rgba,
    pub light_border: Rgba,

    // Accents
    pub accent: Rgba,
    pub accent_soft: Rgba,
    /// Text drawn on an accent background.
    pub on_accent: Rgba,
    /// Header bar and chat panel.
    pub chrome: Rgba,
}

impl Theme {
    pub fn bg(&self, tone: Tone) -> Rgba {
        match tone {
            Tone::Dark => self.dark_bg,
            Tone::Light => self.light_bg,
        }
    }

    pub fn text(&self, tone: Tone) -> Rgba {
        match tone {
            Tone::Dark => self.dark_text,
            Tone::Light => self.light_text,
        }
    }

    pub fn muted(&self, tone: Tone) -> Rgba {
        match tone {
            Tone::Dark => self.dark_muted,
            Tone::Light => self.light_muted,
        }
    }

    pub fn heading(&self, tone: Tone) -> Rgba {
        match tone {
            Tone::Dark => self.dark_heading,
            Tone::Light => self.light_heading,
        }
    }

    pub fn card(&self, tone: Tone) -> Rgba {
        match tone {
            Tone::Dark => self.surface,
            Tone::Light => self.light_surface,
        }
    }

    pub fn border(&self, tone: Tone) -> Rgba {
        match tone {
            Tone::Dark => self.surface_border,
            Tone::Light => self.light_border,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        portfolio()
    }
}

// =============================================================================
// Presets
// =============================================================================

/// Navy/white/yellow truecolor theme.
pub fn portfolio() -> Theme {
    use palette::*;

    Theme {
        name: "portfolio",
        dark_bg: BLUE_950,
        dark_text: WHITE,
        dark_muted: GRAY_300,
        dark_heading: YELLOW_400,
        surface: BLUE_800,
        surface_border: BLUE_700,
        light_bg: WHITE,
        light_text: GRAY_900,
        light_muted: GRAY_600,
        light_heading: BLUE_900,
        light_surface: GRAY_100,
        light_border: GRAY_300,
        accent: YELLOW_400,
        accent_soft: YELLOW_300,
        on_accent: BLUE_950,
        chrome: BLUE_900,
    }
}

/// Keeps the terminal's own background and foreground; accents only.
pub fn terminal() -> Theme {
    use palette::*;

    Theme {
        name: "terminal",
        dark_bg: Rgba::TERMINAL_DEFAULT,
        dark_text: Rgba::TERMINAL_DEFAULT,
        dark_muted: GRAY_400,
        dark_heading: YELLOW_400,
        surface: Rgba::TERMINAL_DEFAULT,
        surface_border: GRAY_500,
        light_bg: Rgba::TERMINAL_DEFAULT,
        light_text: Rgba::TERMINAL_DEFAULT,
        light_muted: GRAY_400,
        light_heading: YELLOW_300,
        light_surface: Rgba::TERMINAL_DEFAULT,
        light_border: GRAY_500,
        accent: YELLOW_400,
        accent_soft: YELLOW_300,
        on_accent: BLUE_950,
        chrome: Rgba::TERMINAL_DEFAULT,
    }
}

pub fn preset_names() -> &'static [&'static str] {
    &["portfolio", "terminal"]
}

/// Look up a preset by name.
pub fn get_preset(name: &str) -> Option<Theme> {
    match name {
        "portfolio" => Some(portfolio()),
        "terminal" => Some(terminal()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_resolve() {
        for name in preset_names() {
            assert_eq!(get_preset(name).unwrap().name, *name);
        }
        assert!(get_preset("dracula").is_none());
    }

    #[test]
    fn test_tones_alternate() {
        assert_eq!(Tone::alternating(0), Tone::Light);
        assert_eq!(Tone::alternating(1), Tone::Dark);
        assert_eq!(Tone::alternating(2), Tone::Light);
    }

    #[test]
    fn test_roles_by_tone() {
        let theme = portfolio();
        assert_eq!(theme.bg(Tone::Dark), palette::BLUE_950);
        assert_eq!(theme.bg(Tone::Light), palette::WHITE);
        assert_eq!(theme.heading(Tone::Dark), palette::YELLOW_400);
        assert_eq!(theme.heading(Tone::Light), palette::BLUE_900);
        assert_eq!(theme.muted(Tone::Light), palette::GRAY_600);
    }
}
