use indexpick::config::settings::PickerSettings;
use indexpick::picker::{
    DialogOutcome, IndexedColorPicker, Palette, PickerDialog, PickerError, Preset,
    SelectionChange,
};
use indexpick::theme;

pub struct DemoApp {
    settings: PickerSettings,
    palettes: Vec<PaletteEntry>,
    active: usize,
    picker: IndexedColorPicker,
    // Диалог выбора с OK / Отмена поверх основного пикера
    dialog: Option<PickerDialog>,
    // Итог последнего диалога (показывается под пикером)
    last_result: Option<String>,
}

struct PaletteEntry {
    name: String,
    palette: Palette,
}

impl DemoApp {
    pub fn new(
        cc: &eframe::CreationContext,
        settings: PickerSettings,
        initial: Preset,
    ) -> Result<Self, PickerError> {
        theme::apply(&cc.egui_ctx);

        let mut palettes = Vec::new();
        for preset in Preset::ALL {
            palettes.push(PaletteEntry {
                name: preset.name().to_string(),
                palette: preset.palette()?,
            });
        }
        for (name, palette) in settings.custom_palettes() {
            palettes.push(PaletteEntry { name, palette });
        }

        let active = Preset::ALL
            .iter()
            .position(|&p| p == initial)
            .unwrap_or_default();
        let picker = build_picker(&settings, &palettes[active].palette);

        Ok(DemoApp {
            settings,
            palettes,
            active,
            picker,
            dialog: None,
            last_result: None,
        })
    }

    fn switch_palette(&mut self, index: usize) {
        if index == self.active || index >= self.palettes.len() {
            return;
        }
        log::info!("demo: switching to palette {}", self.palettes[index].name);
        self.active = index;
        self.picker = build_picker(&self.settings, &self.palettes[index].palette);
        self.dialog = None;
    }

    fn open_dialog(&mut self) {
        let palette = self.picker.palette().clone();
        let dialog = PickerDialog::new(palette, self.picker.color(), self.settings.picker_options());
        self.dialog = Some(dialog);
    }

    // ── Левая панель: список палитр ──

    fn render_palettes_panel(&mut self, ctx: &egui::Context) {
        let enabled = self.dialog.is_none();
        egui::SidePanel::left("palettes_panel")
            .default_width(160.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                ui.heading("Палитры");
                ui.separator();

                let mut switch_to: Option<usize> = None;

                ui.add_enabled_ui(enabled, |ui| {
                    for (i, entry) in self.palettes.iter().enumerate() {
                        let is_active = i == self.active;
                        let (rect, row) = ui.allocate_exact_size(
                            egui::vec2(ui.available_width(), 24.0),
                            egui::Sense::click(),
                        );

                        if is_active {
                            ui.painter()
                                .rect_filled(rect, 4.0, ui.visuals().selection.bg_fill);
                            let bar = egui::Rect::from_min_max(
                                rect.min,
                                egui::pos2(rect.min.x + 3.0, rect.max.y),
                            );
                            ui.painter().rect_filled(bar, 2.0, theme::ACCENT);
                        } else if row.hovered() {
                            ui.painter()
                                .rect_filled(rect, 4.0, ui.visuals().widgets.hovered.bg_fill);
                        }

                        ui.painter().text(
                            egui::pos2(rect.min.x + 10.0, rect.center().y),
                            egui::Align2::LEFT_CENTER,
                            format!("{} ({})", entry.name, entry.palette.len()),
                            egui::FontId::proportional(13.5),
                            ui.visuals().text_color(),
                        );

                        if row.clicked() {
                            switch_to = Some(i);
                        }
                    }
                });

                if let Some(i) = switch_to {
                    self.switch_palette(i);
                }
            });
    }

    // ── Центральная панель ──

    fn render_central_panel(&mut self, ctx: &egui::Context) {
        let enabled = self.dialog.is_none();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(enabled, |ui| {
                let (pref_w, pref_h) = self.picker.preferred_size();
                let side = (ui.available_width().min(ui.available_height() - 60.0))
                    .max(pref_w.max(pref_h) as f32);
                ui.allocate_ui(egui::vec2(side, side), |ui| {
                    self.picker.show(ui);
                });

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    ui.monospace(format!(
                        "#{:<3} {}",
                        self.picker.color_index(),
                        self.picker.color()
                    ));
                    if ui.button("Показать диалог").clicked() {
                        self.open_dialog();
                    }
                });
                if let Some(result) = &self.last_result {
                    ui.label(result);
                }
            });
        });
    }

    fn render_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &mut self.dialog else {
            return;
        };
        match dialog.show(ctx) {
            DialogOutcome::Pending => {}
            DialogOutcome::Committed(index) => {
                self.last_result = Some(format!("Диалог: выбран индекс {index}"));
                if let Err(err) = self.picker.set_color_index(index) {
                    log::warn!("demo: {err}");
                }
                self.dialog = None;
            }
            DialogOutcome::Cancelled => {
                self.last_result = Some("Диалог: отменено".to_string());
                self.dialog = None;
            }
        }
    }
}

fn build_picker(settings: &PickerSettings, palette: &Palette) -> IndexedColorPicker {
    let mut picker = IndexedColorPicker::new(palette.clone(), settings.picker_options());
    // Во встроенном пикере только сетка: значение и превью есть в диалоге
    picker.set_value_controls_visible(false);
    picker.set_preview_visible(false);
    picker.subscribe(|change: &SelectionChange| -> anyhow::Result<()> {
        log::info!(
            "demo: selection {} {} -> {} {}",
            change.previous,
            change.previous_color,
            change.current,
            change.current_color
        );
        Ok(())
    });
    picker
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_palettes_panel(ctx);
        self.render_central_panel(ctx);
        self.render_dialog(ctx);
    }
}
