pub mod adapters;
pub mod dialog;
pub mod error;
pub mod geometry;
pub mod palette;
pub mod presets;
pub mod raster;
pub mod selection;
pub mod widget;

pub use adapters::NavKey;
pub use dialog::{DialogOutcome, PickerDialog};
pub use error::PickerError;
pub use geometry::{GridLayout, GridLimits, GridShape};
pub use palette::{Palette, Rgb};
pub use presets::Preset;
pub use selection::{ListenerId, SelectionChange, SelectionListener};
pub use widget::{IndexedColorPicker, PickerOptions};
