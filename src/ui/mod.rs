pub mod style;
pub mod widgets;

pub use style::{StyleTokens, LAYOUT_TOKENS};
pub use widgets::{heading_label, primary_button};
