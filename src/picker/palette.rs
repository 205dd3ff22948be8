use std::fmt;
use std::str::FromStr;

use super::error::PickerError;

pub const MIN_COLORS: usize = 2;
pub const MAX_COLORS: usize = 256;

/// Цвет палитры без альфа-канала.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// `0xAARRGGBB` или `0xRRGGBB` — альфа отбрасывается.
    pub const fn from_u32(argb: u32) -> Self {
        Rgb {
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
        }
    }

    /// Компоненты приходят как произвольные целые (из конфига, от хоста) —
    /// каждая проверяется на [0,255].
    pub fn from_components(r: i64, g: i64, b: i64) -> Result<Self, PickerError> {
        Ok(Rgb {
            r: channel("red", r)?,
            g: channel("green", g)?,
            b: channel("blue", b)?,
        })
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgb(self.r, self.g, self.b)
    }
}

fn channel(name: &'static str, value: i64) -> Result<u8, PickerError> {
    u8::try_from(value).map_err(|_| PickerError::ComponentOutOfRange {
        channel: name,
        value,
    })
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = PickerError;

    /// `#rrggbb` или `rrggbb`, регистр не важен.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PickerError::InvalidHex(s.to_string()));
        }
        u32::from_str_radix(hex, 16)
            .map(Rgb::from_u32)
            .map_err(|_| PickerError::InvalidHex(s.to_string()))
    }
}

/// Упорядоченный набор из 2..=256 цветов. После создания не меняется;
/// индекс — единственная идентичность цвета, дубликаты допустимы.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> Result<Self, PickerError> {
        if !(MIN_COLORS..=MAX_COLORS).contains(&colors.len()) {
            return Err(PickerError::PaletteSize(colors.len()));
        }
        Ok(Palette { colors })
    }

    /// Таблица в формате `0xRRGGBB`, как в индексированных цветовых моделях.
    pub fn from_table(table: &[u32]) -> Result<Self, PickerError> {
        Self::new(table.iter().copied().map(Rgb::from_u32).collect())
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    // Палитра никогда не бывает пустой, но clippy требует пару к len()
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Первый индекс с точно совпадающим RGB.
    pub fn find(&self, rgb: Rgb) -> Option<usize> {
        self.colors.iter().position(|&c| c == rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_size_is_validated() {
        assert_eq!(
            Palette::new(vec![Rgb::default()]),
            Err(PickerError::PaletteSize(1))
        );
        assert_eq!(
            Palette::new(vec![Rgb::default(); 257]),
            Err(PickerError::PaletteSize(257))
        );
        assert!(Palette::new(vec![Rgb::default(); 2]).is_ok());
        assert!(Palette::new(vec![Rgb::default(); 256]).is_ok());
    }

    #[test]
    fn alpha_is_ignored_in_tables() {
        assert_eq!(Rgb::from_u32(0xff12_3456), Rgb::new(0x12, 0x34, 0x56));
        assert_eq!(Rgb::from_u32(0x0012_3456), Rgb::from_u32(0xff12_3456));
    }

    #[test]
    fn find_returns_first_duplicate() {
        let palette = Palette::from_table(&[0x000000, 0xff0000, 0xff0000]).unwrap();
        assert_eq!(palette.find(Rgb::new(0xff, 0, 0)), Some(1));
        assert_eq!(palette.find(Rgb::new(0, 0xff, 0)), None);
    }

    #[test]
    fn components_out_of_range() {
        assert_eq!(
            Rgb::from_components(0, 256, 0),
            Err(PickerError::ComponentOutOfRange {
                channel: "green",
                value: 256
            })
        );
        assert_eq!(
            Rgb::from_components(-1, 0, 0),
            Err(PickerError::ComponentOutOfRange {
                channel: "red",
                value: -1
            })
        );
        assert_eq!(Rgb::from_components(1, 2, 255), Ok(Rgb::new(1, 2, 255)));
    }

    #[test]
    fn hex_parse_and_display() {
        let rgb: Rgb = "#C0c0C0".parse().unwrap();
        assert_eq!(rgb, Rgb::new(0xc0, 0xc0, 0xc0));
        assert_eq!(rgb.to_string(), "#c0c0c0");
        assert_eq!("00ff00".parse::<Rgb>(), Ok(Rgb::new(0, 0xff, 0)));
        assert!(matches!("#12345".parse::<Rgb>(), Err(PickerError::InvalidHex(_))));
        assert!(matches!("#gg0000".parse::<Rgb>(), Err(PickerError::InvalidHex(_))));
    }
}
