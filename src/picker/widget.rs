use std::cell::RefCell;
use std::rc::Rc;

use super::adapters::{GridAdapter, NavKey, PreviewAdapter, SpinnerAdapter};
use super::error::PickerError;
use super::geometry::{
    compute_cell_size, compute_grid, GridLayout, GridLimits, GridShape, MAX_PAD, PAD,
    PREF_CELL_SIZE,
};
use super::palette::{Palette, Rgb};
use super::raster::IndexedRaster;
use super::selection::{ListenerId, SelectionChange, SelectionCore, SelectionListener};
use crate::theme;

/// Сторона образца цвета в колонке справа от сетки.
const SWATCH_SIZE: f32 = 50.0;
/// Ширина, которую оставляем под колонку образца и спиннера.
const OPTIONS_WIDTH: f32 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerOptions {
    pub limits: GridLimits,
    pub pref_cell_size: usize,
    pub padding: usize,
    pub show_value_controls: bool,
    pub show_preview: bool,
}

impl Default for PickerOptions {
    fn default() -> Self {
        PickerOptions {
            limits: GridLimits::default(),
            pref_cell_size: PREF_CELL_SIZE,
            padding: PAD,
            show_value_controls: true,
            show_preview: true,
        }
    }
}

impl PickerOptions {
    /// Пределы сетки зажаты, предпочтительная ячейка не больше максимальной,
    /// отступ не больше `MAX_PAD`.
    pub fn sanitized(self) -> Self {
        let limits = self.limits.clamped();
        PickerOptions {
            limits,
            pref_cell_size: self.pref_cell_size.clamp(1, limits.max_cell_size),
            padding: self.padding.min(MAX_PAD),
            ..self
        }
    }
}

// --- Виджет выбора цвета из индексированной палитры ---

/// Корень композиции: ядро выбора, растр сетки и три адаптера ввода.
///
/// Адаптеры подписаны на ядро и подстраивают свои контролы после любой
/// смены выбора; их собственные запросы идут в ядро через [`Self::forward`].
pub struct IndexedColorPicker {
    core: SelectionCore,
    raster: IndexedRaster,
    shape: GridShape,
    options: PickerOptions,
    grid: Rc<RefCell<GridAdapter>>,
    spinner: Rc<RefCell<SpinnerAdapter>>,
    preview: Rc<RefCell<PreviewAdapter>>,
    viewport: Option<(usize, usize)>,
    texture: Option<egui::TextureHandle>,
    uploaded_generation: u64,
}

impl IndexedColorPicker {
    pub fn new(palette: Palette, options: PickerOptions) -> Self {
        let options = options.sanitized();
        let len = palette.len();
        let shape = compute_grid(len, &options.limits);
        let side = options.limits.max_cols.max(shape.cols).max(shape.rows)
            * options.limits.max_cell_size;
        let raster = IndexedRaster::new(&palette, side);
        let first = palette.get(0).unwrap_or_default();

        let mut core = SelectionCore::new(palette);
        let grid = Rc::new(RefCell::new(GridAdapter::new(len)));
        let spinner = Rc::new(RefCell::new(SpinnerAdapter::new(len)));
        let preview = Rc::new(RefCell::new(PreviewAdapter::new(first)));

        let target = Rc::clone(&grid);
        core.subscribe(move |change: &SelectionChange| -> anyhow::Result<()> {
            target.try_borrow_mut()?.resync(change.current);
            Ok(())
        });
        let target = Rc::clone(&spinner);
        core.subscribe(move |change: &SelectionChange| -> anyhow::Result<()> {
            target.try_borrow_mut()?.resync(change.current);
            Ok(())
        });
        let target = Rc::clone(&preview);
        core.subscribe(move |change: &SelectionChange| -> anyhow::Result<()> {
            target.try_borrow_mut()?.resync(change.current_color);
            Ok(())
        });

        log::debug!(
            "picker: {} colors in {}x{} grid, raster side {}px",
            len,
            shape.cols,
            shape.rows,
            side
        );

        IndexedColorPicker {
            core,
            raster,
            shape,
            options,
            grid,
            spinner,
            preview,
            viewport: None,
            texture: None,
            uploaded_generation: 0,
        }
    }

    pub fn palette(&self) -> &Palette {
        self.core.palette()
    }

    pub fn color_index(&self) -> usize {
        self.core.index()
    }

    pub fn color(&self) -> Rgb {
        self.core.color()
    }

    pub fn rgb(&self) -> [u8; 3] {
        self.core.color().to_array()
    }

    pub fn set_color_index(&mut self, index: usize) -> Result<bool, PickerError> {
        self.core.set_index(index)
    }

    /// Если цвета нет в палитре, выбирается индекс 0.
    pub fn set_color(&mut self, rgb: Rgb) -> bool {
        self.core.set_color(rgb)
    }

    pub fn set_rgb(&mut self, r: i64, g: i64, b: i64) -> Result<bool, PickerError> {
        let rgb = Rgb::from_components(r, g, b)?;
        Ok(self.core.set_color(rgb))
    }

    pub fn subscribe<L>(&mut self, listener: L) -> ListenerId
    where
        L: SelectionListener + 'static,
    {
        self.core.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.core.unsubscribe(id)
    }

    pub fn set_value_controls_visible(&mut self, visible: bool) {
        self.options.show_value_controls = visible;
    }

    pub fn set_preview_visible(&mut self, visible: bool) {
        self.options.show_preview = visible;
    }

    pub fn options(&self) -> &PickerOptions {
        &self.options
    }

    pub fn grid_shape(&self) -> GridShape {
        self.shape
    }

    /// Раскладка после последнего [`Self::resize`].
    pub fn layout(&self) -> Option<GridLayout> {
        self.grid.borrow().layout()
    }

    pub fn raster(&self) -> &IndexedRaster {
        &self.raster
    }

    /// Значения, которые сейчас показывают сетка, спиннер и превью.
    pub fn displayed(&self) -> (usize, usize, Rgb) {
        (
            self.grid.borrow().highlighted(),
            self.spinner.borrow().value(),
            self.preview.borrow().color(),
        )
    }

    pub fn preferred_size(&self) -> (usize, usize) {
        let pad = 2 * self.options.padding;
        (
            self.shape.cols * self.options.pref_cell_size + pad,
            self.shape.rows * self.options.pref_cell_size + pad,
        )
    }

    /// Размер области сетки поменялся: пересчитываем раскладку и растр
    /// синхронно, до следующей отрисовки. Возвращает раскладку, под которую
    /// нарисован растр; сетка получает её же.
    pub fn resize(&mut self, width: usize, height: usize) -> Option<GridLayout> {
        let pad = 2 * self.options.padding;
        let layout = compute_cell_size(
            width.saturating_sub(pad),
            height.saturating_sub(pad),
            self.shape,
            self.options.limits.max_cell_size,
        );
        if self.viewport != Some((width, height)) {
            log::debug!(
                "picker: viewport {}x{} -> cell {}px ({}x{})",
                width,
                height,
                layout.cell_size,
                layout.pixel_width,
                layout.pixel_height
            );
            self.viewport = Some((width, height));
        }
        if self.raster.regenerate(&layout) {
            self.grid.borrow_mut().set_layout(layout);
        }
        self.raster.valid_layout()
    }

    /// Нажатие в точке относительно левого верхнего угла сетки.
    pub fn pointer_pressed(&mut self, px: f32, py: f32) -> bool {
        let request = self.grid.borrow_mut().pointer_pressed(px, py);
        self.forward("grid", request)
    }

    pub fn key_pressed(&mut self, key: NavKey) -> bool {
        let request = self.grid.borrow_mut().key_pressed(key);
        self.forward("grid", request)
    }

    pub fn spinner_edited(&mut self, value: i64) -> bool {
        let request = self.spinner.borrow_mut().value_edited(value);
        self.forward("spinner", request)
    }

    /// Подтверждение поля `#rrggbb` под образцом.
    pub fn preview_text_committed(&mut self, text: &str) -> bool {
        let request = {
            let mut preview = self.preview.borrow_mut();
            *preview.text_mut() = text.to_string();
            preview.text_committed()
        };
        self.forward_color(request)
    }

    fn forward(&mut self, source: &str, request: Option<usize>) -> bool {
        let Some(index) = request else {
            return false;
        };
        match self.core.set_index(index) {
            Ok(changed) => changed,
            Err(err) => {
                log::warn!("{source}: {err}");
                self.resync_views();
                false
            }
        }
    }

    fn forward_color(&mut self, request: Option<Rgb>) -> bool {
        match request {
            Some(rgb) => {
                let changed = self.core.set_color(rgb);
                if !changed {
                    // промах по палитре на том же индексе: вернуть поле к текущему цвету
                    self.resync_views();
                }
                changed
            }
            None => false,
        }
    }

    fn resync_views(&mut self) {
        let index = self.core.index();
        let color = self.core.color();
        self.grid.borrow_mut().resync(index);
        self.spinner.borrow_mut().resync(index);
        self.preview.borrow_mut().resync(color);
    }

    // ── Отрисовка ──

    pub fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        ui.horizontal(|ui| {
            let response = self.show_grid(ui);
            if self.options.show_preview || self.options.show_value_controls {
                ui.vertical(|ui| self.show_options(ui));
            }
            response
        })
        .inner
    }

    fn show_grid(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let (pref_w, pref_h) = self.preferred_size();
        let (pref_w, pref_h) = (pref_w as f32, pref_h as f32);
        let max_side = (self.raster.side() + 2 * self.options.padding) as f32;
        let reserved = if self.options.show_preview || self.options.show_value_controls {
            OPTIONS_WIDTH
        } else {
            0.0
        };
        let available = ui.available_size();
        let desired = egui::vec2(
            (available.x - reserved).clamp(pref_w, max_side.max(pref_w)),
            available.y.clamp(pref_h, max_side.max(pref_h)),
        );

        let (response, painter) = ui.allocate_painter(desired, egui::Sense::click_and_drag());
        let response = response.on_hover_cursor(egui::CursorIcon::Crosshair);

        let Some(layout) =
            self.resize(response.rect.width() as usize, response.rect.height() as usize)
        else {
            return response;
        };
        let grid_rect = egui::Rect::from_center_size(
            response.rect.center(),
            egui::vec2(layout.pixel_width as f32, layout.pixel_height as f32),
        );

        // Мышь: нажатие и протяжка выбирают ячейку под курсором
        if response.is_pointer_button_down_on() {
            response.request_focus();
            if let Some(pos) = response.interact_pointer_pos() {
                let rel = pos - grid_rect.min;
                self.pointer_pressed(rel.x, rel.y);
            }
        }

        if response.has_focus() {
            ui.memory_mut(|m| {
                m.set_focus_lock_filter(
                    response.id,
                    egui::EventFilter {
                        horizontal_arrows: true,
                        vertical_arrows: true,
                        ..Default::default()
                    },
                )
            });
            let keys: Vec<NavKey> = ui.input(|i| {
                i.events
                    .iter()
                    .filter_map(|event| match event {
                        egui::Event::Key {
                            key, pressed: true, ..
                        } => NavKey::from_egui(*key),
                        _ => None,
                    })
                    .collect()
            });
            for key in keys {
                self.key_pressed(key);
            }
        }

        self.sync_texture(ui.ctx());

        if response.has_focus() {
            theme::paint_focus(&painter, grid_rect);
        }
        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                grid_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        theme::paint_bevel(&painter, grid_rect);

        let (cx, cy) = layout.cell_center(self.core.index());
        theme::paint_marker(&painter, grid_rect.min + egui::vec2(cx, cy));

        let hex = self.core.color().to_string();
        response.context_menu(|ui| {
            if ui.button(format!("[copy] {hex}")).clicked() {
                ui.ctx().copy_text(hex.clone());
                ui.close_menu();
            }
        });

        response
    }

    fn show_options(&mut self, ui: &mut egui::Ui) {
        if self.options.show_preview {
            let color = self.preview.borrow().color();
            let (rect, _) =
                ui.allocate_exact_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE), egui::Sense::hover());
            ui.painter().rect_filled(rect, 0.0, color.to_color32());
            theme::paint_bevel(ui.painter(), rect);

            let request = {
                let mut preview = self.preview.borrow_mut();
                let resp = ui.add(
                    egui::TextEdit::singleline(preview.text_mut())
                        .font(egui::TextStyle::Monospace)
                        .desired_width(OPTIONS_WIDTH - 10.0),
                );
                if resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    preview.text_committed()
                } else {
                    None
                }
            };
            self.forward_color(request);
        }

        if self.options.show_value_controls {
            ui.label("Значение:");
            let range = self.spinner.borrow().range();
            let mut value = self.spinner.borrow().value();
            let resp = ui.add(egui::DragValue::new(&mut value).range(range));
            if resp.changed() {
                self.spinner_edited(value as i64);
            }
        }
    }

    fn sync_texture(&mut self, ctx: &egui::Context) {
        let generation = self.raster.generation();
        if self.texture.is_some() && self.uploaded_generation == generation {
            return;
        }
        let Some(image) = self.raster.region_image() else {
            return;
        };
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.texture =
                    Some(ctx.load_texture("indexpick-grid", image, egui::TextureOptions::NEAREST));
            }
        }
        self.uploaded_generation = generation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::geometry::{MAX_CELL_SIZE, MAX_COLS};
    use crate::picker::presets::Preset;

    fn picker(preset: Preset) -> IndexedColorPicker {
        IndexedColorPicker::new(preset.palette().unwrap(), PickerOptions::default())
    }

    #[test]
    fn preferred_size_follows_grid() {
        let picker = picker(Preset::Xterm16);
        assert_eq!(picker.grid_shape(), GridShape { cols: 4, rows: 4 });
        assert_eq!(picker.preferred_size(), (4 * 20 + 12, 4 * 20 + 12));
    }

    #[test]
    fn resize_subtracts_padding_and_regenerates() {
        let mut picker = picker(Preset::Atari);
        let layout = picker.resize(16 * 10 + 12, 8 * 10 + 12).unwrap();
        assert_eq!(layout.cell_size, 10);
        assert_eq!(picker.layout(), Some(layout));
        assert_eq!(picker.raster().valid_layout(), Some(layout));

        let generation = picker.raster().generation();
        picker.resize(16 * 10 + 12, 8 * 10 + 12);
        assert_eq!(picker.raster().generation(), generation);
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let mut picker = picker(Preset::Xterm256);
        let layout = picker.resize(3, 0).unwrap();
        assert_eq!(layout.cell_size, 1);
        assert!(picker.pointer_pressed(15.5, 15.5));
        assert_eq!(picker.color_index(), 255);
        assert!(!picker.pointer_pressed(16.0, 0.0));
    }

    #[test]
    fn oversized_options_are_clamped() {
        let options = PickerOptions {
            limits: GridLimits {
                max_cols: usize::MAX,
                max_cell_size: 8_589_934_592,
            },
            pref_cell_size: usize::MAX,
            padding: usize::MAX,
            ..PickerOptions::default()
        };
        let mut picker = IndexedColorPicker::new(Preset::Xterm256.palette().unwrap(), options);
        assert_eq!(picker.options().limits, GridLimits::default());
        assert_eq!(picker.options().pref_cell_size, MAX_CELL_SIZE);
        assert_eq!(picker.options().padding, MAX_PAD);
        assert_eq!(picker.raster().side(), MAX_COLS * MAX_CELL_SIZE);

        let layout = picker.resize(10_000, 10_000).unwrap();
        assert_eq!(layout.cell_size, MAX_CELL_SIZE);
        assert_eq!(picker.layout(), Some(layout));
    }

    #[test]
    fn set_rgb_validates_components() {
        let mut picker = picker(Preset::Xterm16);
        assert!(matches!(
            picker.set_rgb(0, 0, 300),
            Err(PickerError::ComponentOutOfRange { channel: "blue", .. })
        ));
        assert_eq!(picker.set_rgb(0xc0, 0xc0, 0xc0), Ok(true));
        assert_eq!(picker.color_index(), 7);
        assert_eq!(picker.rgb(), [0xc0, 0xc0, 0xc0]);
    }
}
