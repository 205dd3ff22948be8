//! Адаптеры ввода: сетка (мышь и стрелки), числовой спиннер и превью.
//!
//! Каждый адаптер и управляет выбором (по действию пользователя), и
//! отображает его (когда выбор поменял кто-то другой). Запись значения в
//! собственный контрол порождает у контрола событие изменения; чтобы оно не
//! ушло обратно в ядро, у каждого адаптера свой счётчик глубины подстройки.
//! Пока счётчик > 0, событие считается эхом и игнорируется.

use std::cell::Cell;
use std::rc::Rc;

use super::geometry::GridLayout;
use super::palette::Rgb;

/// Счётчик «мы сами подстраиваем контрол». Свой у каждого адаптера.
#[derive(Debug, Clone, Default)]
pub struct AdjustDepth(Rc<Cell<usize>>);

impl AdjustDepth {
    pub fn enter(&self) -> AdjustGuard {
        self.0.set(self.0.get() + 1);
        AdjustGuard(Rc::clone(&self.0))
    }

    pub fn is_adjusting(&self) -> bool {
        self.0.get() > 0
    }

    pub fn depth(&self) -> usize {
        self.0.get()
    }
}

/// Снимает один уровень при выходе из области видимости, в том числе при панике.
#[must_use = "the guard releases the depth when dropped"]
pub struct AdjustGuard(Rc<Cell<usize>>);

impl Drop for AdjustGuard {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}

/// Клавиши навигации по сетке.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Left,
    Right,
    Up,
    Down,
}

impl NavKey {
    pub fn from_egui(key: egui::Key) -> Option<Self> {
        match key {
            egui::Key::ArrowLeft => Some(NavKey::Left),
            egui::Key::ArrowRight => Some(NavKey::Right),
            egui::Key::ArrowUp => Some(NavKey::Up),
            egui::Key::ArrowDown => Some(NavKey::Down),
            _ => None,
        }
    }
}

// --- Сетка ---

pub struct GridAdapter {
    adjusting: AdjustDepth,
    len: usize,
    highlighted: usize,
    layout: Option<GridLayout>,
    suppressed: usize,
}

impl GridAdapter {
    pub fn new(len: usize) -> Self {
        GridAdapter {
            adjusting: AdjustDepth::default(),
            len,
            highlighted: 0,
            layout: None,
            suppressed: 0,
        }
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn set_layout(&mut self, layout: GridLayout) {
        self.layout = Some(layout);
    }

    pub fn layout(&self) -> Option<GridLayout> {
        self.layout
    }

    /// Нажатие (или протяжка) в точке относительно левого верхнего угла сетки.
    pub fn pointer_pressed(&mut self, px: f32, py: f32) -> Option<usize> {
        let layout = self.layout?;
        match layout.index_at(px, py, self.len) {
            Some(index) => self.set_highlighted(index),
            None => {
                log::trace!("grid: pointer ({px:.1},{py:.1}) outside palette cells");
                None
            }
        }
    }

    /// Стрелки: ±1 по горизонтали, ±cols по вертикали. Без заворота и без
    /// прижатия к краю — выход за палитру просто игнорируется.
    pub fn key_pressed(&mut self, key: NavKey) -> Option<usize> {
        let cols = self.layout?.cols as isize;
        let delta = match key {
            NavKey::Left => -1,
            NavKey::Right => 1,
            NavKey::Up => -cols,
            NavKey::Down => cols,
        };
        let target = self.highlighted as isize + delta;
        if target < 0 || target >= self.len as isize {
            log::trace!("grid: {key:?} from {} leaves the palette", self.highlighted);
            return None;
        }
        self.set_highlighted(target as usize)
    }

    /// Ядро сообщило новое значение — переставляем подсветку без эха.
    pub fn resync(&mut self, index: usize) {
        let _guard = self.adjusting.enter();
        if let Some(echo) = self.set_highlighted(index) {
            log::trace!("grid: dropped resync request for {echo}");
        }
    }

    pub fn echoes_suppressed(&self) -> usize {
        self.suppressed
    }

    pub fn adjust_depth(&self) -> &AdjustDepth {
        &self.adjusting
    }

    fn set_highlighted(&mut self, index: usize) -> Option<usize> {
        if index == self.highlighted {
            return None;
        }
        self.highlighted = index;
        self.changed()
    }

    /// Обработчик изменения контрола: либо запрос в ядро, либо эхо.
    fn changed(&mut self) -> Option<usize> {
        if self.adjusting.is_adjusting() {
            self.suppressed += 1;
            log::trace!("grid: echo of {} suppressed", self.highlighted);
            return None;
        }
        Some(self.highlighted)
    }
}

// --- Спиннер ---

pub struct SpinnerAdapter {
    adjusting: AdjustDepth,
    max: usize,
    value: usize,
    suppressed: usize,
}

impl SpinnerAdapter {
    pub fn new(len: usize) -> Self {
        SpinnerAdapter {
            adjusting: AdjustDepth::default(),
            max: len.saturating_sub(1),
            value: 0,
            suppressed: 0,
        }
    }

    pub fn value(&self) -> usize {
        self.value
    }

    /// Допустимый диапазон значений контрола, `[0, N)`.
    pub fn range(&self) -> std::ops::RangeInclusive<usize> {
        0..=self.max
    }

    /// Пользователь ввёл число. Контрол сам держит его в своём диапазоне.
    pub fn value_edited(&mut self, value: i64) -> Option<usize> {
        let clamped = value.clamp(0, self.max as i64) as usize;
        self.set_value(clamped)
    }

    pub fn resync(&mut self, index: usize) {
        let _guard = self.adjusting.enter();
        if let Some(echo) = self.set_value(index) {
            log::trace!("spinner: dropped resync request for {echo}");
        }
    }

    pub fn echoes_suppressed(&self) -> usize {
        self.suppressed
    }

    pub fn adjust_depth(&self) -> &AdjustDepth {
        &self.adjusting
    }

    fn set_value(&mut self, value: usize) -> Option<usize> {
        if value == self.value {
            return None;
        }
        self.value = value;
        if self.adjusting.is_adjusting() {
            self.suppressed += 1;
            log::trace!("spinner: echo of {value} suppressed");
            return None;
        }
        Some(value)
    }
}

// --- Превью ---

/// Образец выбранного цвета и поле `#rrggbb` под ним.
pub struct PreviewAdapter {
    adjusting: AdjustDepth,
    color: Rgb,
    text: String,
    suppressed: usize,
}

impl PreviewAdapter {
    pub fn new(color: Rgb) -> Self {
        PreviewAdapter {
            adjusting: AdjustDepth::default(),
            color,
            text: color.to_string(),
            suppressed: 0,
        }
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Буфер поля ввода, его редактирует UI.
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    /// Поле подтверждено (Enter). Неразборчивый текст откатывается к текущему цвету.
    pub fn text_committed(&mut self) -> Option<Rgb> {
        match self.text.parse::<Rgb>() {
            Ok(rgb) => self.color_entered(rgb),
            Err(err) => {
                log::debug!("preview: {err}");
                self.text = self.color.to_string();
                None
            }
        }
    }

    pub fn color_entered(&mut self, rgb: Rgb) -> Option<Rgb> {
        self.text = rgb.to_string();
        if self.adjusting.is_adjusting() {
            self.suppressed += 1;
            log::trace!("preview: echo of {rgb} suppressed");
            return None;
        }
        Some(rgb)
    }

    pub fn resync(&mut self, color: Rgb) {
        let _guard = self.adjusting.enter();
        self.color = color;
        if let Some(echo) = self.color_entered(color) {
            log::trace!("preview: dropped resync request for {echo}");
        }
    }

    pub fn echoes_suppressed(&self) -> usize {
        self.suppressed
    }

    pub fn adjust_depth(&self) -> &AdjustDepth {
        &self.adjusting
    }
}
