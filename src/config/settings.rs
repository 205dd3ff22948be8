use std::path::{Path, PathBuf};

use crate::picker::error::PickerError;
use crate::picker::geometry::{GridLimits, MAX_CELL_SIZE, MAX_COLS, PAD, PREF_CELL_SIZE};
use crate::picker::palette::{Palette, Rgb};
use crate::picker::presets::Preset;
use crate::picker::widget::PickerOptions;

/// Настройки пикера. Выбранный цвет сюда не пишется никогда.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PickerSettings {
    pub max_cols: usize,
    pub max_cell_size: usize,
    pub pref_cell_size: usize,
    pub padding: usize,
    pub show_value_controls: bool,
    pub show_preview: bool,
    pub default_palette: Preset,
    pub custom_palettes: Vec<StoredPalette>,
}

impl Default for PickerSettings {
    fn default() -> Self {
        PickerSettings {
            max_cols: MAX_COLS,
            max_cell_size: MAX_CELL_SIZE,
            pref_cell_size: PREF_CELL_SIZE,
            padding: PAD,
            show_value_controls: true,
            show_preview: true,
            default_palette: Preset::default(),
            custom_palettes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StoredPalette {
    pub name: String,
    /// `#rrggbb`
    pub colors: Vec<String>,
}

impl StoredPalette {
    pub fn to_palette(&self) -> Result<Palette, PickerError> {
        let colors = self
            .colors
            .iter()
            .map(|c| c.parse::<Rgb>())
            .collect::<Result<Vec<_>, _>>()?;
        Palette::new(colors)
    }
}

impl PickerSettings {
    /// Те же пределы, что применяет виджет: ноль поднимается до 1, слишком
    /// большие значения срезаются до максимума.
    pub fn sanitized(mut self) -> Self {
        let options = self.picker_options().sanitized();
        self.max_cols = options.limits.max_cols;
        self.max_cell_size = options.limits.max_cell_size;
        self.pref_cell_size = options.pref_cell_size;
        self.padding = options.padding;
        self
    }

    pub fn picker_options(&self) -> PickerOptions {
        PickerOptions {
            limits: GridLimits {
                max_cols: self.max_cols,
                max_cell_size: self.max_cell_size,
            },
            pref_cell_size: self.pref_cell_size,
            padding: self.padding,
            show_value_controls: self.show_value_controls,
            show_preview: self.show_preview,
        }
    }

    /// Пользовательские палитры, прошедшие проверку. Битые пропускаются с предупреждением.
    pub fn custom_palettes(&self) -> Vec<(String, Palette)> {
        self.custom_palettes
            .iter()
            .filter_map(|stored| match stored.to_palette() {
                Ok(palette) => Some((stored.name.clone(), palette)),
                Err(err) => {
                    log::warn!("config: skipping palette {:?}: {}", stored.name, err);
                    None
                }
            })
            .collect()
    }
}

pub fn config_path() -> PathBuf {
    let dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("indexpick");
    std::fs::create_dir_all(&dir).ok();
    dir.join("settings.json")
}

/// Нет файла или он битый — настройки по умолчанию.
pub fn load_settings_from(path: &Path) -> PickerSettings {
    let data = match std::fs::read_to_string(path) {
        Ok(d) => d,
        Err(_) => return PickerSettings::default(),
    };
    let settings: PickerSettings = match serde_json::from_str(&data) {
        Ok(s) => s,
        Err(err) => {
            log::warn!("config: {} is malformed, using defaults: {}", path.display(), err);
            return PickerSettings::default();
        }
    };
    settings.sanitized()
}

pub fn save_settings(settings: &PickerSettings) {
    let path = config_path();
    if let Err(err) = save_settings_to(&path, settings) {
        log::warn!("config: failed to write {}: {:#}", path.display(), err);
    }
}

pub fn save_settings_to(path: &Path, settings: &PickerSettings) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json)?;
    Ok(())
}
