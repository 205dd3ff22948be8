use super::geometry::GridLayout;
use super::palette::Palette;

/// Кэшированная картинка всей палитры.
///
/// Буфер создаётся один раз под максимальную сетку и дальше только
/// перезаписывается; осмысленна лишь левая верхняя область
/// `pixel_width × pixel_height` последней раскладки.
pub struct IndexedRaster {
    colors: Vec<egui::Color32>,
    side: usize,
    pixels: Vec<egui::Color32>,
    // Строка пикселей, которую переиспользуем при каждой регенерации
    row: Vec<egui::Color32>,
    valid: Option<GridLayout>,
    generation: u64,
}

impl IndexedRaster {
    /// `side` — длина стороны буфера в пикселях (`max_cols * max_cell_size`).
    pub fn new(palette: &Palette, side: usize) -> Self {
        IndexedRaster {
            colors: palette.colors().iter().map(|c| c.to_color32()).collect(),
            side,
            pixels: vec![egui::Color32::TRANSPARENT; side * side],
            row: vec![egui::Color32::TRANSPARENT; side],
            valid: None,
            generation: 0,
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Раскладка, под которую буфер сейчас нарисован.
    pub fn valid_layout(&self) -> Option<GridLayout> {
        self.valid
    }

    /// Растёт на каждую фактическую перерисовку — по нему рендер понимает,
    /// что текстуру пора обновить.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Перерисовывает сетку под `layout`. Для той же раскладки ничего не делает.
    /// Пустые ячейки за концом палитры заливаются прозрачным.
    ///
    /// `true`, если буфер теперь соответствует `layout`; иначе в нём остаётся
    /// прежняя картинка.
    pub fn regenerate(&mut self, layout: &GridLayout) -> bool {
        if layout.cell_size == 0 || layout.cols == 0 {
            return false;
        }
        if self.valid.as_ref() == Some(layout) {
            return true;
        }
        if layout.pixel_width > self.side || layout.pixel_height > self.side {
            log::warn!(
                "raster: layout {}x{} does not fit into {}x{} buffer, keeping stale image",
                layout.pixel_width,
                layout.pixel_height,
                self.side,
                self.side
            );
            return false;
        }

        let width = layout.pixel_width;
        let cell = layout.cell_size;
        for r in 0..layout.rows {
            for x in 0..width {
                let index = r * layout.cols + x / cell;
                self.row[x] = self
                    .colors
                    .get(index)
                    .copied()
                    .unwrap_or(egui::Color32::TRANSPARENT);
            }
            for y in 0..cell {
                let start = (r * cell + y) * self.side;
                self.pixels[start..start + width].copy_from_slice(&self.row[..width]);
            }
        }

        self.valid = Some(*layout);
        self.generation += 1;
        log::debug!(
            "raster: regenerated {}x{} grid, cell {}px (gen {})",
            layout.cols,
            layout.rows,
            cell,
            self.generation
        );
        true
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<egui::Color32> {
        if x >= self.side || y >= self.side {
            return None;
        }
        self.pixels.get(y * self.side + x).copied()
    }

    /// Копия валидной области для загрузки в текстуру.
    pub fn region_image(&self) -> Option<egui::ColorImage> {
        let layout = self.valid?;
        let (w, h) = (layout.pixel_width, layout.pixel_height);
        let mut pixels = Vec::with_capacity(w * h);
        for y in 0..h {
            let start = y * self.side;
            pixels.extend_from_slice(&self.pixels[start..start + w]);
        }
        Some(egui::ColorImage {
            size: [w, h],
            pixels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::geometry::{compute_cell_size, GridShape};
    use crate::picker::palette::Rgb;

    fn palette7() -> Palette {
        Palette::new((0..7).map(|i| Rgb::new(i * 10, 0, 0)).collect()).unwrap()
    }

    #[test]
    fn cells_are_solid_blocks_in_row_major_order() {
        let palette = palette7();
        let mut raster = IndexedRaster::new(&palette, 16 * 30);
        let layout = compute_cell_size(40, 20, GridShape { cols: 4, rows: 2 }, 30);
        raster.regenerate(&layout);

        for i in 0..7 {
            let (row, col) = layout.cell_of(i);
            let expected = palette.get(i).unwrap().to_color32();
            for dy in 0..layout.cell_size {
                for dx in 0..layout.cell_size {
                    let x = col * layout.cell_size + dx;
                    let y = row * layout.cell_size + dy;
                    assert_eq!(raster.pixel(x, y), Some(expected), "index {i} at ({x},{y})");
                }
            }
        }
        // пустая ячейка
        assert_eq!(raster.pixel(35, 15), Some(egui::Color32::TRANSPARENT));
    }

    #[test]
    fn regenerate_is_idempotent_for_same_layout() {
        let mut raster = IndexedRaster::new(&palette7(), 480);
        let layout = compute_cell_size(40, 20, GridShape { cols: 4, rows: 2 }, 30);
        assert!(raster.regenerate(&layout));
        let before = raster.region_image().unwrap().pixels;
        assert!(raster.regenerate(&layout));
        assert_eq!(raster.generation(), 1);
        assert_eq!(raster.region_image().unwrap().pixels, before);
    }

    #[test]
    fn region_tracks_latest_layout() {
        let mut raster = IndexedRaster::new(&palette7(), 480);
        let shape = GridShape { cols: 4, rows: 2 };
        raster.regenerate(&compute_cell_size(400, 400, shape, 30));
        assert_eq!(raster.region_image().unwrap().size, [120, 60]);

        raster.regenerate(&compute_cell_size(40, 20, shape, 30));
        assert_eq!(raster.region_image().unwrap().size, [40, 20]);
        assert_eq!(raster.generation(), 2);
        assert_eq!(raster.valid_layout().map(|l| l.cell_size), Some(10));
    }

    #[test]
    fn zero_cell_size_keeps_stale_content() {
        let mut raster = IndexedRaster::new(&palette7(), 480);
        let layout = compute_cell_size(40, 20, GridShape { cols: 4, rows: 2 }, 30);
        raster.regenerate(&layout);
        let broken = GridLayout {
            cell_size: 0,
            pixel_width: 0,
            pixel_height: 0,
            ..layout
        };
        assert!(!raster.regenerate(&broken));
        assert_eq!(raster.valid_layout(), Some(layout));
        assert_eq!(raster.generation(), 1);
    }

    #[test]
    fn layout_larger_than_buffer_is_rejected() {
        let mut raster = IndexedRaster::new(&palette7(), 40);
        let shape = GridShape { cols: 4, rows: 2 };
        let fits = compute_cell_size(40, 20, shape, 30);
        assert!(raster.regenerate(&fits));

        let too_wide = compute_cell_size(400, 400, shape, 30);
        assert_eq!(too_wide.pixel_width, 120);
        assert!(!raster.regenerate(&too_wide));
        assert_eq!(raster.valid_layout(), Some(fits));
        assert_eq!(raster.region_image().unwrap().size, [40, 20]);
        assert_eq!(raster.generation(), 1);
    }

    #[test]
    fn nothing_is_valid_before_first_regeneration() {
        let raster = IndexedRaster::new(&palette7(), 480);
        assert!(raster.region_image().is_none());
        assert_eq!(raster.side(), 480);
    }
}
