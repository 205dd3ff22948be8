use super::palette::{Palette, Rgb};
use super::widget::{IndexedColorPicker, PickerOptions};

pub const DEFAULT_TITLE: &str = "Выберите цвет";

/// Итог диалога на текущем кадре.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Pending,
    Committed(usize),
    Cancelled,
}

impl DialogOutcome {
    /// Индекс, подтверждённый кнопкой OK. Отмена и закрытие окна — `None`.
    pub fn committed_index(self) -> Option<usize> {
        match self {
            DialogOutcome::Committed(index) => Some(index),
            _ => None,
        }
    }

    pub fn is_finished(self) -> bool {
        !matches!(self, DialogOutcome::Pending)
    }
}

/// Окно с пикером и кнопками OK / Отмена.
///
/// В egui нет блокирующих модальных окон, поэтому хост вызывает [`Self::show`]
/// каждый кадр, пока не получит завершённый [`DialogOutcome`], и сам
/// отключает остальной интерфейс на это время.
pub struct PickerDialog {
    picker: IndexedColorPicker,
    title: String,
    outcome: DialogOutcome,
}

impl PickerDialog {
    /// Значение и превью в диалоге видны всегда; стартовый цвет ищется в палитре
    /// (нет точного совпадения — индекс 0).
    pub fn new(palette: Palette, original: Rgb, options: PickerOptions) -> Self {
        let mut picker = IndexedColorPicker::new(
            palette,
            PickerOptions {
                show_value_controls: true,
                show_preview: true,
                ..options
            },
        );
        picker.set_color(original);
        PickerDialog {
            picker,
            title: DEFAULT_TITLE.to_string(),
            outcome: DialogOutcome::Pending,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn picker(&self) -> &IndexedColorPicker {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut IndexedColorPicker {
        &mut self.picker
    }

    pub fn outcome(&self) -> DialogOutcome {
        self.outcome
    }

    /// OK: фиксирует текущий индекс.
    pub fn commit(&mut self) -> DialogOutcome {
        if !self.outcome.is_finished() {
            self.outcome = DialogOutcome::Committed(self.picker.color_index());
        }
        self.outcome
    }

    pub fn cancel(&mut self) -> DialogOutcome {
        if !self.outcome.is_finished() {
            self.outcome = DialogOutcome::Cancelled;
        }
        self.outcome
    }

    pub fn show(&mut self, ctx: &egui::Context) -> DialogOutcome {
        if self.outcome.is_finished() {
            return self.outcome;
        }

        let mut open = true;
        let mut ok = false;
        let mut cancel = false;

        let (pref_w, pref_h) = self.picker.preferred_size();
        egui::Window::new(self.title.as_str())
            .open(&mut open)
            .resizable(false)
            .collapsible(false)
            .default_pos(egui::pos2(
                ctx.screen_rect().center().x - pref_w as f32 / 2.0 - 60.0,
                ctx.screen_rect().center().y - pref_h as f32 / 2.0 - 40.0,
            ))
            .show(ctx, |ui| {
                ui.allocate_ui(
                    egui::vec2(pref_w as f32 + 100.0, pref_h as f32),
                    |ui| {
                        self.picker.show(ui);
                    },
                );

                ui.add_space(4.0);
                ui.separator();
                ui.add_space(4.0);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("OK").clicked() {
                        ok = true;
                    }
                    if ui.button("Отмена").clicked() {
                        cancel = true;
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            cancel = true;
        }

        if ok {
            self.commit()
        } else if cancel || !open {
            self.cancel()
        } else {
            DialogOutcome::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::presets::Preset;

    fn dialog(original: Rgb) -> PickerDialog {
        PickerDialog::new(
            Preset::Xterm16.palette().unwrap(),
            original,
            PickerOptions {
                show_value_controls: false,
                show_preview: false,
                ..PickerOptions::default()
            },
        )
    }

    #[test]
    fn original_color_is_preselected() {
        let dialog = dialog(Rgb::new(0xff, 0, 0));
        assert_eq!(dialog.picker().color_index(), 9);
        assert!(dialog.picker().options().show_value_controls);
        assert_eq!(dialog.title(), DEFAULT_TITLE);
    }

    #[test]
    fn unknown_original_color_starts_at_zero() {
        let dialog = dialog(Rgb::new(1, 2, 3));
        assert_eq!(dialog.picker().color_index(), 0);
    }

    #[test]
    fn commit_returns_current_index() {
        let mut dialog = dialog(Rgb::new(0, 0, 0)).with_title("Цвет фона");
        dialog.picker_mut().set_color_index(12).unwrap();
        assert_eq!(dialog.commit(), DialogOutcome::Committed(12));
        assert_eq!(dialog.outcome().committed_index(), Some(12));
        // после завершения исход не меняется
        assert_eq!(dialog.cancel(), DialogOutcome::Committed(12));
        assert_eq!(dialog.title(), "Цвет фона");
    }

    #[test]
    fn cancel_yields_no_value() {
        let mut dialog = dialog(Rgb::new(0, 0, 0));
        dialog.picker_mut().set_color_index(3).unwrap();
        assert_eq!(dialog.cancel().committed_index(), None);
        assert_eq!(dialog.commit(), DialogOutcome::Cancelled);
    }
}
