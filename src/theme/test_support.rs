//! Substitute collaborators for building controllers natively.

use std::cell::Cell;
use std::rc::Rc;

use super::{AmbientSignal, StyleScope, Theme, ThemeController};
use crate::preference::{MemoryStore, PreferenceStore};

pub(crate) struct FixedAmbient(pub bool);

impl AmbientSignal for FixedAmbient {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}

/// Records the flag and how many times it actually changed.
#[derive(Default)]
pub(crate) struct FlagScope {
    dark: Cell<Option<bool>>,
    pub changes: Cell<usize>,
}

impl StyleScope for FlagScope {
    fn apply(&self, theme: Theme) {
        if self.dark.get() != Some(theme.is_dark()) {
            self.dark.set(Some(theme.is_dark()));
            self.changes.set(self.changes.get() + 1);
        }
    }
}

impl FlagScope {
    pub fn theme(&self) -> Option<Theme> {
        self.dark
            .get()
            .map(|dark| if dark { Theme::Dark } else { Theme::Light })
    }
}

pub(crate) fn controller(
    store: Rc<dyn PreferenceStore>,
    prefers_dark: bool,
) -> (ThemeController, Rc<FlagScope>) {
    let scope = Rc::new(FlagScope::default());
    let ctrl = ThemeController::new(
        store,
        Rc::new(FixedAmbient(prefers_dark)),
        scope.clone(),
        "theme",
    );
    (ctrl, scope)
}

pub(crate) fn store_with(value: Option<&str>) -> Rc<MemoryStore> {
    let store = Rc::new(MemoryStore::default());
    if let Some(v) = value {
        store.write("theme", v);
    }
    store
}
