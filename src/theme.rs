//! Оформление пикера: рамка-фаска вокруг сетки, кольцо фокуса и маркер
//! выбранной ячейки. Плюс общий вид демо-приложения.

// ── Цвета ──

pub const BG:           egui::Color32 = egui::Color32::from_rgb(0x1e, 0x1f, 0x22);
pub const BG_PANEL:     egui::Color32 = egui::Color32::from_rgb(0x26, 0x27, 0x2b);
pub const BG_WIDGET:    egui::Color32 = egui::Color32::from_rgb(0x31, 0x33, 0x38);
pub const BG_HOVER:     egui::Color32 = egui::Color32::from_rgb(0x3a, 0x3d, 0x44);
pub const BG_SELECTION: egui::Color32 = egui::Color32::from_rgb(0x2f, 0x4a, 0x6e);

pub const ACCENT:       egui::Color32 = egui::Color32::from_rgb(0x62, 0x72, 0xa4);
pub const TEXT:         egui::Color32 = egui::Color32::from_rgb(0xd8, 0xda, 0xde);

pub const BEVEL_LIGHT:  egui::Color32 = egui::Color32::from_rgb(0xc8, 0xc8, 0xc8);
pub const BEVEL_DARK:   egui::Color32 = egui::Color32::from_rgb(0x50, 0x50, 0x50);
pub const FOCUS:        egui::Color32 = egui::Color32::from_rgba_premultiplied(0x4a, 0x8a, 0xd8, 0xc0);

pub const MARKER_INNER: egui::Color32 = egui::Color32::WHITE;
pub const MARKER_OUTER: egui::Color32 = egui::Color32::BLACK;

// Ширина кольца фокуса в пикселях
const FOCUS_WIDTH: f32 = 5.0;

// ── Примитивы ──

/// Светлая грань сверху/слева, тёмная снизу/справа.
pub fn paint_bevel(painter: &egui::Painter, rect: egui::Rect) {
    let light = egui::Stroke::new(1.0, BEVEL_LIGHT);
    let dark = egui::Stroke::new(1.0, BEVEL_DARK);
    let r = rect.expand(0.5);
    painter.line_segment([r.left_bottom(), r.left_top()], light);
    painter.line_segment([r.left_top(), r.right_top()], light);
    painter.line_segment([r.right_top(), r.right_bottom()], dark);
    painter.line_segment([r.right_bottom(), r.left_bottom()], dark);
}

pub fn paint_focus(painter: &egui::Painter, rect: egui::Rect) {
    painter.rect_stroke(
        rect.expand(FOCUS_WIDTH / 2.0),
        2.0,
        egui::Stroke::new(FOCUS_WIDTH, FOCUS),
    );
}

/// Два кольца: белое r=3 внутри чёрного r=4 — видно на любом цвете.
pub fn paint_marker(painter: &egui::Painter, center: egui::Pos2) {
    painter.circle_stroke(center, 3.0, egui::Stroke::new(1.0, MARKER_INNER));
    painter.circle_stroke(center, 4.0, egui::Stroke::new(1.0, MARKER_OUTER));
}

// ── Демо ──

pub fn apply(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(6.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 3.0);
    ctx.set_style(style);

    let mut visuals = egui::Visuals::dark();

    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG;
    visuals.extreme_bg_color = BG;
    visuals.faint_bg_color = BG_WIDGET;

    visuals.selection.bg_fill = BG_SELECTION;
    visuals.selection.stroke = egui::Stroke::new(1.0, ACCENT);
    visuals.override_text_color = Some(TEXT);

    visuals.widgets.inactive.bg_fill = BG_WIDGET;
    visuals.widgets.inactive.weak_bg_fill = BG_WIDGET;
    visuals.widgets.hovered.bg_fill = BG_HOVER;
    visuals.widgets.hovered.weak_bg_fill = BG_HOVER;
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, ACCENT);

    visuals.window_rounding = egui::Rounding::same(3.0);
    visuals.menu_rounding = egui::Rounding::same(3.0);

    ctx.set_visuals(visuals);
}
