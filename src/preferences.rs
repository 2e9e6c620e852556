use std::sync::{PoisonError, RwLock};

use crate::{
    models::{FontSize, ReadingPreferences},
    storage::{keys, RecordStore, StoreEvent},
};

/// Reader font size and dark mode, sharing the progress storage backend.
pub struct PreferencesStore {
    store: RecordStore,
    data: RwLock<ReadingPreferences>,
}

impl PreferencesStore {
    pub fn load(store: RecordStore) -> Self {
        let defaults = ReadingPreferences::default();
        let data = ReadingPreferences {
            font_size: store.read(keys::FONT_SIZE).unwrap_or(defaults.font_size),
            dark_mode: store.read(keys::DARK_MODE).unwrap_or(defaults.dark_mode),
        };

        Self {
            store,
            data: RwLock::new(data),
        }
    }

    pub fn get(&self) -> ReadingPreferences {
        *self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_font_size(&self, font_size: FontSize) -> ReadingPreferences {
        self.update(|prefs| prefs.font_size = font_size)
    }

    pub fn set_dark_mode(&self, dark_mode: bool) -> ReadingPreferences {
        self.update(|prefs| prefs.dark_mode = dark_mode)
    }

    pub fn reset(&self) -> ReadingPreferences {
        self.update(|prefs| *prefs = ReadingPreferences::default())
    }

    fn update(&self, apply: impl FnOnce(&mut ReadingPreferences)) -> ReadingPreferences {
        let updated = {
            let mut guard = self.data.write().unwrap_or_else(PoisonError::into_inner);
            apply(&mut *guard);
            *guard
        };

        self.store.write(keys::FONT_SIZE, &updated.font_size);
        self.store.write(keys::DARK_MODE, &updated.dark_mode);
        self.store.publish(StoreEvent::Preferences(updated));
        updated
    }
}
