//! Status icons and colors.

use colored::{Color, Colorize};

use vane_core::{PhaseStatus, RolloutStatus, VerificationStatus};

/// Icon classes shown next to a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Waiting,
    Ok,
    Failed,
    InProgress,
    Paused,
    Aborted,
    Canceled,
    Warning,
    Point,
}

impl Icon {
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Waiting => "◷",
            Icon::Ok => "✔",
            Icon::Failed => "✖",
            Icon::InProgress => "◌",
            Icon::Paused => "॥",
            Icon::Aborted => "↵",
            Icon::Canceled => "⊗",
            Icon::Warning => "⚠",
            Icon::Point => "•",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Icon::Waiting | Icon::InProgress => Color::Cyan,
            Icon::Ok => Color::Green,
            Icon::Failed | Icon::Aborted | Icon::Warning => Color::Red,
            Icon::Paused => Color::Yellow,
            Icon::Canceled | Icon::Point => Color::Magenta,
        }
    }

    pub fn for_rollout(status: RolloutStatus) -> Option<Icon> {
        use RolloutStatus::*;
        match status {
            Pending | InProgress | Aborting | ManualPausing | Deallocating | Verifying
            | FailurePolicyPausing | BackgroundVerifying => Some(Icon::Waiting),
            Paused | ManualPaused | FailurePolicyPaused => Some(Icon::Paused),
            Aborted => Some(Icon::Aborted),
            Failed => Some(Icon::Failed),
            InvalidSpec => Some(Icon::Warning),
            Finished => Some(Icon::Ok),
            Canceled => Some(Icon::Canceled),
            Unknown => None,
        }
    }

    pub fn for_phase(status: PhaseStatus) -> Option<Icon> {
        use PhaseStatus::*;
        match status {
            Pending | InProgress | Aborting | Verifying | Promoting => Some(Icon::Waiting),
            Paused => Some(Icon::Paused),
            Aborted => Some(Icon::Aborted),
            Finished | Promoted | FullPromoted => Some(Icon::Ok),
            Canceled => Some(Icon::Canceled),
            Dropped => Some(Icon::Point),
            Unknown => None,
        }
    }

    pub fn for_verification(status: VerificationStatus) -> Option<Icon> {
        use VerificationStatus::*;
        match status {
            Successful => Some(Icon::Ok),
            Failed | Error => Some(Icon::Failed),
            Running => Some(Icon::InProgress),
            Canceled => Some(Icon::Canceled),
            Unknown => None,
        }
    }
}

/// Applies (or suppresses) terminal styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    color: bool,
}

impl Palette {
    pub fn colored() -> Self {
        Self { color: true }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// `{glyph} {text}` with the glyph in its icon color, or bare `text`
    /// when there is no icon.
    pub fn with_icon(&self, icon: Option<Icon>, text: &str) -> String {
        match icon {
            Some(icon) => format!("{} {text}", self.paint(icon.glyph(), icon.color())),
            None => text.to_string(),
        }
    }
}

/// Uncolored `{glyph} {text}`, used to measure cell widths.
pub fn plain_with_icon(icon: Option<Icon>, text: &str) -> String {
    Palette::plain().with_icon(icon, text)
}

/// "fullPromoted" ⇒ "Full promoted".
pub fn humanize(camel: &str) -> String {
    let mut out = String::with_capacity(camel.len() + 4);
    for (i, c) in camel.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rollout_icons() {
        use RolloutStatus::*;
        for status in [
            Pending,
            InProgress,
            Aborting,
            ManualPausing,
            Deallocating,
            Verifying,
            FailurePolicyPausing,
            BackgroundVerifying,
        ] {
            assert_eq!(Icon::for_rollout(status), Some(Icon::Waiting), "{status:?}");
        }
        for status in [Paused, ManualPaused, FailurePolicyPaused] {
            assert_eq!(Icon::for_rollout(status), Some(Icon::Paused), "{status:?}");
        }
        assert_eq!(Icon::for_rollout(Aborted), Some(Icon::Aborted));
        assert_eq!(Icon::for_rollout(Failed), Some(Icon::Failed));
        assert_eq!(Icon::for_rollout(InvalidSpec), Some(Icon::Warning));
        assert_eq!(Icon::for_rollout(Finished), Some(Icon::Ok));
        assert_eq!(Icon::for_rollout(Canceled), Some(Icon::Canceled));
        assert_eq!(Icon::for_rollout(Unknown), None);
    }

    #[test]
    fn phase_icons() {
        use PhaseStatus::*;
        for status in [Pending, InProgress, Aborting, Verifying, Promoting] {
            assert_eq!(Icon::for_phase(status), Some(Icon::Waiting), "{status:?}");
        }
        for status in [Finished, Promoted, FullPromoted] {
            assert_eq!(Icon::for_phase(status), Some(Icon::Ok), "{status:?}");
        }
        assert_eq!(Icon::for_phase(Paused), Some(Icon::Paused));
        assert_eq!(Icon::for_phase(Aborted), Some(Icon::Aborted));
        assert_eq!(Icon::for_phase(Canceled), Some(Icon::Canceled));
        assert_eq!(Icon::for_phase(Dropped), Some(Icon::Point));
    }

    #[test]
    fn verification_icons() {
        use VerificationStatus::*;
        assert_eq!(Icon::for_verification(Successful), Some(Icon::Ok));
        assert_eq!(Icon::for_verification(Failed), Some(Icon::Failed));
        assert_eq!(Icon::for_verification(Error), Some(Icon::Failed));
        assert_eq!(Icon::for_verification(Running), Some(Icon::InProgress));
        assert_eq!(Icon::for_verification(Canceled), Some(Icon::Canceled));
    }

    #[test]
    fn plain_palette_emits_no_escapes() {
        let palette = Palette::plain();
        assert_eq!(palette.paint("v2", Color::Yellow), "v2");
        assert_eq!(palette.with_icon(Some(Icon::Ok), "Finished"), "✔ Finished");
        assert_eq!(palette.with_icon(None, "Unknown"), "Unknown");
    }

    #[test]
    fn humanizes_camel_case() {
        assert_eq!(humanize("fullPromoted"), "Full promoted");
        assert_eq!(humanize("inProgress"), "In progress");
        assert_eq!(humanize("failurePolicyPaused"), "Failure policy paused");
        assert_eq!(humanize("finished"), "Finished");
        assert_eq!(humanize(""), "");
    }
}
