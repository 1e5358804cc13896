//! Styles for human-mode output.

use console::Style;

/// Visual theme for msfeedback human-mode output.
pub struct Theme {
    pub accent: Style,
    pub success: Style,
    pub error: Style,
    pub warning: Style,
    pub muted: Style,

    pub header: Style,
    pub label: Style,
    pub value: Style,
    pub missing: Style,
}

impl Theme {
    /// Theme with styling forced on or off.
    #[must_use]
    pub fn new(colors: bool) -> Self {
        let style = |base: Style| base.force_styling(colors);

        Self {
            accent: style(Style::new().blue().bold()),
            success: style(Style::new().green().bold()),
            error: style(Style::new().red().bold()),
            warning: style(Style::new().yellow().bold()),
            muted: style(Style::new().color256(245)),
            header: style(Style::new().blue().bold().underlined()),
            label: style(Style::new().dim()),
            value: style(Style::new().bold()),
            missing: style(Style::new().yellow().italic()),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(console::colors_enabled())
    }
}
