//! Host-Context Projector
//!
//! Applies a host context snapshot onto the presentation state. Each
//! aspect (theme, style variables, fonts, insets) is independently
//! optional: an absent aspect leaves the prior presentation untouched
//! rather than clearing it. Applying the same snapshot twice is
//! indistinguishable from applying it once.

use super::bridge::HostContext;
use super::presentation::Presentation;

/// Maps a host theme identifier to a color-scheme directive.
fn color_scheme_for(theme: &str) -> &'static str {
    match theme {
        "dark" => "dark",
        "light" => "light",
        _ => "light dark",
    }
}

/// Applies one snapshot onto the presentation.
pub fn apply(snapshot: &HostContext, presentation: &mut Presentation) {
    if let Some(theme) = &snapshot.theme {
        presentation.color_scheme = Some(color_scheme_for(theme).to_string());
    }
    if let Some(styles) = &snapshot.styles {
        presentation
            .tokens
            .extend(styles.iter().map(|(name, value)| (name.clone(), value.clone())));
    }
    if let Some(fonts) = &snapshot.fonts {
        presentation.font_faces = fonts.clone();
    }
    if let Some(insets) = snapshot.safe_area_insets {
        presentation.insets = Some(insets);
    }
}
