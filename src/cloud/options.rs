use serde::Serialize;

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_BACKGROUND_COLOR: &str = "#000000";
pub const DEFAULT_COLOR_SCHEME: [&str; 6] = [
    "#e74c3c", "#3498db", "#2ecc71", "#f1c40f", "#9b59b6", "#34495e",
];

/// Rendering options forwarded verbatim to the word-cloud service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub background_color: String,
    pub color_scheme: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            color_scheme: DEFAULT_COLOR_SCHEME
                .iter()
                .map(|color| color.to_string())
                .collect(),
        }
    }
}

/// Accepts `#RRGGBB` and `#RRGGBBAA`.
pub fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.trim().strip_prefix('#') else {
        return false;
    };
    matches!(digits.len(), 6 | 8) && digits.chars().all(|ch| ch.is_ascii_hexdigit())
}
