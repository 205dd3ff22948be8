//! Виджет выбора одного цвета из небольшой индексированной палитры (2..=256).

pub mod config;
pub mod picker;
pub mod theme;
