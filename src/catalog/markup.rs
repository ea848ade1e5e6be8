//! Picker View Markup
//!
//! Renders the HTML document served as the `ui://` picker resource. The
//! template is bundled at compile time; each render stamps a fresh build id
//! so repeated `resources/read` calls observably return new content.

use uuid::Uuid;

const PICKER_TEMPLATE: &str = include_str!("../../resources/picker.html");

/// Renders the picker view markup with a fresh per-render build id.
pub fn render_picker_markup() -> String {
    PICKER_TEMPLATE.replace("{{BUILD_ID}}", &Uuid::new_v4().to_string())
}
