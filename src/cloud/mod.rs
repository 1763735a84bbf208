mod error;
mod options;
mod payload;
mod transport;

pub use error::{CloudError, CloudErrorKind, CloudResult, EMPTY_INPUT_MESSAGE};
pub use options::{
    is_hex_color, RenderOptions, DEFAULT_BACKGROUND_COLOR, DEFAULT_COLOR_SCHEME, DEFAULT_HEIGHT,
    DEFAULT_WIDTH,
};
pub use payload::{RequestPayload, WordEntry};
pub use transport::{CloudTransport, HttpTransport};
