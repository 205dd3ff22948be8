//! Раскладка палитры в сетку: число колонок/строк, размер ячейки и
//! преобразования «пиксель ↔ индекс». Только чистые функции, без состояния.

/// Сколько колонок максимум (строк столько же).
pub const MAX_COLS: usize = 16;
/// Сторона ячейки в пикселях не больше этого значения, как бы ни рос виджет.
pub const MAX_CELL_SIZE: usize = 30;
pub const PREF_CELL_SIZE: usize = 20;
/// Отступ вокруг сетки внутри виджета.
pub const PAD: usize = 6;
pub const MAX_PAD: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLimits {
    pub max_cols: usize,
    pub max_cell_size: usize,
}

impl Default for GridLimits {
    fn default() -> Self {
        GridLimits {
            max_cols: MAX_COLS,
            max_cell_size: MAX_CELL_SIZE,
        }
    }
}

impl GridLimits {
    /// Буфер растра выделяется по этим пределам, поэтому они зажимаются
    /// в `1..=MAX_COLS` и `1..=MAX_CELL_SIZE`.
    pub fn clamped(self) -> Self {
        GridLimits {
            max_cols: self.max_cols.clamp(1, MAX_COLS),
            max_cell_size: self.max_cell_size.clamp(1, MAX_CELL_SIZE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    pub cols: usize,
    pub rows: usize,
}

impl GridShape {
    pub fn cells(&self) -> usize {
        self.cols * self.rows
    }

    pub fn blanks(&self, len: usize) -> usize {
        self.cells().saturating_sub(len)
    }
}

/// Подбор сетки под `len` цветов.
///
/// Стартуем с ближайшего квадрата, потом пробуем более широкие прямоугольники:
/// кандидат принимается, только если пустых ячеек строго меньше. При равенстве
/// остаётся более узкая сетка. Поиск обрывается, как только ширина превысила
/// удвоенную высоту.
pub fn compute_grid(len: usize, limits: &GridLimits) -> GridShape {
    let len = len.max(1);

    // квадрат
    let mut cols = ((len as f64).sqrt().round() as usize).max(1);
    let mut rows = len.div_ceil(cols);
    let mut blanks = rows * cols - len;

    // шире
    let mut nc = cols + 1;
    while nc < len && nc <= limits.max_cols {
        let nr = len.div_ceil(nc);
        if nc > 2 * nr {
            break;
        }
        let nb = nr * nc - len;
        if nb < blanks {
            cols = nc;
            rows = nr;
            blanks = nb;
        }
        nc += 1;
    }

    GridShape { cols, rows }
}

/// Вписывает сетку в доступную область (без учёта отступов).
pub fn compute_cell_size(
    viewport_width: usize,
    viewport_height: usize,
    shape: GridShape,
    max_cell_size: usize,
) -> GridLayout {
    let cell_size = max_cell_size
        .min(viewport_width / shape.cols.max(1))
        .min(viewport_height / shape.rows.max(1))
        .max(1);

    GridLayout {
        cols: shape.cols,
        rows: shape.rows,
        cell_size,
        pixel_width: cell_size * shape.cols,
        pixel_height: cell_size * shape.rows,
    }
}

/// Производная раскладка: пересчитывается при каждом изменении размера.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub cols: usize,
    pub rows: usize,
    pub cell_size: usize,
    pub pixel_width: usize,
    pub pixel_height: usize,
}

impl GridLayout {
    /// (строка, колонка) ячейки с данным индексом.
    pub fn cell_of(&self, index: usize) -> (usize, usize) {
        (index / self.cols, index % self.cols)
    }

    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Центр ячейки относительно левого верхнего угла сетки.
    pub fn cell_center(&self, index: usize) -> (f32, f32) {
        let (row, col) = self.cell_of(index);
        let half = self.cell_size as f32 / 2.0;
        (
            (col * self.cell_size) as f32 + half,
            (row * self.cell_size) as f32 + half,
        )
    }

    /// Индекс под указателем. `None` — мимо сетки или пустая ячейка за концом палитры.
    pub fn index_at(&self, px: f32, py: f32, len: usize) -> Option<usize> {
        if self.cell_size == 0 {
            return None;
        }
        let cell = self.cell_size as f32;
        let col = (px / cell).floor();
        let row = (py / cell).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }
        let index = self.index_of(row as usize, col as usize);
        (index < len).then_some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(len: usize) -> (usize, usize) {
        let shape = compute_grid(len, &GridLimits::default());
        (shape.cols, shape.rows)
    }

    #[test]
    fn known_shapes() {
        assert_eq!(grid(2), (1, 2));
        assert_eq!(grid(3), (2, 2));
        assert_eq!(grid(5), (2, 3));
        assert_eq!(grid(7), (4, 2));
        assert_eq!(grid(8), (4, 2));
        assert_eq!(grid(16), (4, 4));
        assert_eq!(grid(128), (16, 8));
        assert_eq!(grid(256), (16, 16));
    }

    #[test]
    fn ties_keep_the_narrower_grid() {
        // 3x2 тоже без пустых ячеек, но не строго лучше 2x3
        assert_eq!(grid(6), (2, 3));
    }

    #[test]
    fn limits_are_clamped_to_buffer_bounds() {
        let huge = GridLimits {
            max_cols: usize::MAX,
            max_cell_size: 8_589_934_592,
        };
        assert_eq!(huge.clamped(), GridLimits::default());

        let zero = GridLimits {
            max_cols: 0,
            max_cell_size: 0,
        };
        assert_eq!(
            zero.clamped(),
            GridLimits {
                max_cols: 1,
                max_cell_size: 1
            }
        );
    }

    #[test]
    fn widening_is_capped_by_max_cols() {
        let limits = GridLimits {
            max_cols: 12,
            max_cell_size: MAX_CELL_SIZE,
        };
        let shape = compute_grid(128, &limits);
        assert_eq!((shape.cols, shape.rows), (11, 12));
    }

    /// Тот же поиск, но перебором: минимум пустых ячеек среди допустимых кандидатов.
    fn best_blanks_by_enumeration(len: usize, max_cols: usize) -> usize {
        let cols0 = ((len as f64).sqrt().round() as usize).max(1);
        let mut best = len.div_ceil(cols0) * cols0 - len;
        for nc in (cols0 + 1)..len.min(max_cols + 1) {
            let nr = len.div_ceil(nc);
            if nc > 2 * nr {
                break;
            }
            best = best.min(nr * nc - len);
        }
        best
    }

    #[test]
    fn every_palette_size_fits_with_fewest_blanks() {
        let limits = GridLimits::default();
        for len in 2..=256 {
            let shape = compute_grid(len, &limits);
            assert!(shape.cells() >= len, "len={len} shape={shape:?}");
            assert_eq!(
                shape.blanks(len),
                best_blanks_by_enumeration(len, limits.max_cols),
                "len={len} shape={shape:?}"
            );
        }
    }

    #[test]
    fn every_palette_size_fits_the_raster_side() {
        for len in 2..=256 {
            let shape = compute_grid(len, &GridLimits::default());
            assert!(shape.cols <= MAX_COLS && shape.rows <= MAX_COLS, "len={len}");
        }
    }

    #[test]
    fn cell_size_is_bounded_by_viewport_and_max() {
        let shape = GridShape { cols: 4, rows: 4 };
        let layout = compute_cell_size(1000, 1000, shape, MAX_CELL_SIZE);
        assert_eq!(layout.cell_size, MAX_CELL_SIZE);
        assert_eq!((layout.pixel_width, layout.pixel_height), (120, 120));

        let layout = compute_cell_size(83, 200, shape, MAX_CELL_SIZE);
        assert_eq!(layout.cell_size, 20);
        assert_eq!((layout.pixel_width, layout.pixel_height), (80, 80));

        let layout = compute_cell_size(200, 41, GridShape { cols: 2, rows: 3 }, MAX_CELL_SIZE);
        assert_eq!(layout.cell_size, 13);
    }

    #[test]
    fn degenerate_viewport_yields_one_pixel_cells() {
        let layout = compute_cell_size(0, 3, GridShape { cols: 16, rows: 16 }, MAX_CELL_SIZE);
        assert_eq!(layout.cell_size, 1);
        assert_eq!((layout.pixel_width, layout.pixel_height), (16, 16));
    }

    #[test]
    fn index_cell_round_trip() {
        let layout = compute_cell_size(200, 200, GridShape { cols: 4, rows: 2 }, 10);
        for i in 0..8 {
            let (row, col) = layout.cell_of(i);
            assert_eq!(layout.index_of(row, col), i);
        }
    }

    #[test]
    fn pointer_mapping() {
        // 7 цветов в сетке 4x2: последняя ячейка пустая
        let layout = compute_cell_size(40, 20, GridShape { cols: 4, rows: 2 }, 30);
        assert_eq!(layout.cell_size, 10);
        assert_eq!(layout.index_at(0.0, 0.0, 7), Some(0));
        assert_eq!(layout.index_at(9.9, 9.9, 7), Some(0));
        assert_eq!(layout.index_at(10.0, 0.0, 7), Some(1));
        assert_eq!(layout.index_at(25.0, 15.0, 7), Some(6));
        assert_eq!(layout.index_at(35.0, 15.0, 7), None);
        assert_eq!(layout.index_at(-0.5, 5.0, 7), None);
        assert_eq!(layout.index_at(5.0, -3.0, 7), None);
        assert_eq!(layout.index_at(40.0, 5.0, 7), None);
        assert_eq!(layout.index_at(5.0, 20.0, 7), None);
    }

    #[test]
    fn cell_center() {
        let layout = compute_cell_size(40, 20, GridShape { cols: 4, rows: 2 }, 30);
        assert_eq!(layout.cell_center(0), (5.0, 5.0));
        assert_eq!(layout.cell_center(5), (15.0, 15.0));
    }
}
