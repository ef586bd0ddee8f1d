//! Terminal styling and color utilities.
//!
//! ANSI escape code definitions and color detection for the enhanced route
//! view.

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";

    // Tag colors (bold reverse video for high visibility badges)
    /// Bold reverse green for STRT tags.
    pub const TAG_START: &str = "\x1b[1;7;32m";
    /// Bold reverse cyan for DRVE tags.
    pub const TAG_DRIVE: &str = "\x1b[1;7;36m";
    /// Bold reverse yellow for CHRG tags.
    pub const TAG_CHARGE: &str = "\x1b[1;7;33m";
    /// Bold reverse magenta for GOAL tags.
    pub const TAG_GOAL: &str = "\x1b[1;7;35m";

    /// Bright bold white for node ids.
    pub const WHITE_BOLD: &str = "\x1b[1;97m";
    /// Gray for secondary elements.
    pub const GRAY: &str = "\x1b[90m";
    /// Green for a healthy battery.
    pub const GREEN: &str = "\x1b[32m";
    /// Orange (256-color) for a battery under half capacity.
    pub const ORANGE: &str = "\x1b[38;5;208m";
    /// Red for a nearly empty battery.
    pub const RED: &str = "\x1b[31m";
}

/// Resolved color codes, either ANSI sequences or empty strings when color
/// is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub tag_start: &'static str,
    pub tag_drive: &'static str,
    pub tag_charge: &'static str,
    pub tag_goal: &'static str,
    pub white_bold: &'static str,
    pub gray: &'static str,
    pub green: &'static str,
    pub orange: &'static str,
    pub red: &'static str,
}

impl ColorPalette {
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            tag_start: colors::TAG_START,
            tag_drive: colors::TAG_DRIVE,
            tag_charge: colors::TAG_CHARGE,
            tag_goal: colors::TAG_GOAL,
            white_bold: colors::WHITE_BOLD,
            gray: colors::GRAY,
            green: colors::GREEN,
            orange: colors::ORANGE,
            red: colors::RED,
        }
    }

    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            tag_start: "",
            tag_drive: "",
            tag_charge: "",
            tag_goal: "",
            white_bold: "",
            gray: "",
            green: "",
            orange: "",
            red: "",
        }
    }

    /// `colored()` if the terminal supports ANSI colors, otherwise `plain()`.
    #[must_use]
    pub fn detect() -> Self {
        if supports_color() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    /// Color for a battery reading relative to the vehicle capacity.
    pub fn battery(&self, battery_kwh: f64, capacity_kwh: f64) -> &'static str {
        if capacity_kwh <= 0.0 || battery_kwh <= capacity_kwh * 0.2 {
            self.red
        } else if battery_kwh < capacity_kwh * 0.5 {
            self.orange
        } else {
            self.green
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// Check if the terminal supports ANSI color codes.
///
/// Respects `NO_COLOR` (https://no-color.org/) and `TERM=dumb`.
#[must_use]
pub fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if let Ok(term) = std::env::var("TERM") {
        if term.eq_ignore_ascii_case("dumb") {
            return false;
        }
    }
    true
}
