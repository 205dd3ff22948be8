use thiserror::Error;

/// Ошибки, которые ядро пикера возвращает вызывающему коду.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PickerError {
    #[error("The color index ({index}) must be between [0,{}].", .len.saturating_sub(1))]
    IndexOutOfRange { index: usize, len: usize },

    #[error("The {channel} value ({value}) must be between [0,255].")]
    ComponentOutOfRange { channel: &'static str, value: i64 },

    #[error("The palette must have between 2 and 256 colors, got {0}.")]
    PaletteSize(usize),

    #[error("Invalid hex color: {0:?}")]
    InvalidHex(String),
}
