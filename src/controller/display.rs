use crate::state::RequestState;
use crate::storage::CloudImage;

pub const LOADING_LABEL: &str = "Generating word cloud...";
pub const TRIGGER_LABEL: &str = "Generate Word Cloud";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayMode {
    Hidden,
    Loading,
    Image(CloudImage),
    Trigger { enabled: bool },
}

pub fn display_mode(state: &RequestState, show_image: bool, input_blank: bool) -> DisplayMode {
    if !show_image {
        return DisplayMode::Hidden;
    }
    match state {
        RequestState::Loading { .. } => DisplayMode::Loading,
        RequestState::Success(image) => DisplayMode::Image(image.clone()),
        RequestState::Idle | RequestState::Failed { .. } => DisplayMode::Trigger {
            enabled: !input_blank,
        },
    }
}
