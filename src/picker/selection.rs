use super::error::PickerError;
use super::palette::{Palette, Rgb};

/// Что изменилось: старый и новый индекс вместе с их цветами.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub previous: usize,
    pub current: usize,
    pub previous_color: Rgb,
    pub current_color: Rgb,
}

/// Подписчик на смену выбора. Ошибка подписчика логируется и не мешает
/// остальным получить уведомление.
pub trait SelectionListener {
    fn selection_changed(&mut self, change: &SelectionChange) -> anyhow::Result<()>;
}

impl<F> SelectionListener for F
where
    F: FnMut(&SelectionChange) -> anyhow::Result<()>,
{
    fn selection_changed(&mut self, change: &SelectionChange) -> anyhow::Result<()> {
        self(change)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Единственный владелец выбранного индекса. Всё остальное (спиннер,
/// превью, подсветка в сетке) — лишь отображения этого значения.
pub struct SelectionCore {
    palette: Palette,
    index: usize,
    listeners: Vec<(ListenerId, Box<dyn SelectionListener>)>,
    next_listener: u64,
}

impl SelectionCore {
    pub fn new(palette: Palette) -> Self {
        SelectionCore {
            palette,
            index: 0,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn color(&self) -> Rgb {
        self.color_at(self.index)
    }

    fn color_at(&self, index: usize) -> Rgb {
        self.palette.get(index).unwrap_or_default()
    }

    /// Меняет выбор и синхронно оповещает подписчиков. Тот же индекс — без уведомления.
    /// Возвращает `true`, если значение действительно поменялось.
    pub fn set_index(&mut self, index: usize) -> Result<bool, PickerError> {
        if index >= self.palette.len() {
            return Err(PickerError::IndexOutOfRange {
                index,
                len: self.palette.len(),
            });
        }
        if index == self.index {
            return Ok(false);
        }

        let previous = self.index;
        self.index = index;

        let change = SelectionChange {
            previous,
            current: index,
            previous_color: self.color_at(previous),
            current_color: self.color_at(index),
        };
        self.notify(&change);
        Ok(true)
    }

    /// Первый индекс с точно таким же RGB, иначе 0.
    pub fn set_color(&mut self, rgb: Rgb) -> bool {
        let index = self.palette.find(rgb).unwrap_or_else(|| {
            log::trace!("selection: {rgb} not in palette, falling back to index 0");
            0
        });
        // индекс взят из самой палитры, так что ошибки здесь не бывает
        self.set_index(index).unwrap_or(false)
    }

    pub fn subscribe<L>(&mut self, listener: L) -> ListenerId
    where
        L: SelectionListener + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, change: &SelectionChange) {
        for (id, listener) in self.listeners.iter_mut() {
            if let Err(err) = listener.selection_changed(change) {
                log::warn!("selection: listener {:?} failed: {:#}", id, err);
            }
        }
    }
}
