//! Dark mode state shared across the site.
//!
//! The [`ThemeController`] owns the effective theme, persists the explicit
//! choice through a [`PreferenceStore`](crate::preference::PreferenceStore)
//! and publishes a [`ThemeChangeEvent`] on every toggle. Widgets reach it
//! through the [`ThemeContext`] installed by [`provide`].

pub mod controller;
pub mod notifier;
#[cfg(test)]
pub(crate) mod test_support;

use std::fmt;
use std::rc::Rc;

use leptos::prelude::*;
use serde::Serialize;

pub use controller::{AmbientSignal, StyleScope, ThemeController};
pub use notifier::Subscription;

/// The theme applied to the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse a stored value. Anything other than `"light"` or `"dark"` is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's saved choice, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    Unset,
}

impl ThemePreference {
    /// Interpret the raw value read from the preference store.
    pub fn from_stored(raw: Option<&str>) -> Self {
        match raw.and_then(Theme::parse) {
            Some(theme) => theme.into(),
            None => ThemePreference::Unset,
        }
    }

    pub fn theme(self) -> Option<Theme> {
        match self {
            ThemePreference::Light => Some(Theme::Light),
            ThemePreference::Dark => Some(Theme::Dark),
            ThemePreference::Unset => None,
        }
    }
}

impl From<Theme> for ThemePreference {
    fn from(theme: Theme) -> Self {
        match theme {
            Theme::Light => ThemePreference::Light,
            Theme::Dark => ThemePreference::Dark,
        }
    }
}

/// Broadcast once per toggle. Serialized as `{"theme": "dark"}` for the DOM channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeChangeEvent {
    pub theme: Theme,
}

/// Reactive handle on the page's theme controller.
///
/// `theme` is `None` until [`initialize`](Self::initialize) has run and then
/// follows every toggle.
#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub theme: ReadSignal<Option<Theme>>,
    set_theme: WriteSignal<Option<Theme>>,
    controller: StoredValue<Rc<ThemeController>, LocalStorage>,
}

impl ThemeContext {
    /// Wrap `controller` and mirror its change events into `theme`.
    ///
    /// The bridging subscription lives as long as the controller.
    pub fn new(controller: Rc<ThemeController>) -> Self {
        let (theme, set_theme) = signal(controller.current());
        let _ = controller.subscribe(move |event| set_theme.set(Some(event.theme)));
        Self {
            theme,
            set_theme,
            controller: StoredValue::new_local(controller),
        }
    }

    pub fn controller(&self) -> Rc<ThemeController> {
        self.controller.get_value()
    }

    /// Resolve the initial theme and publish it to `theme`.
    pub fn initialize(&self) {
        let controller = self.controller();
        controller.initialize();
        self.set_theme.set(controller.current());
    }

    pub fn toggle(&self) {
        self.controller().toggle();
    }

    /// The controller's current theme, read without tracking.
    pub fn current(&self) -> Option<Theme> {
        self.controller().current()
    }

    pub fn subscribe(&self, handler: impl Fn(&ThemeChangeEvent) + 'static) -> Subscription {
        self.controller().subscribe(handler)
    }
}

/// Build a [`ThemeContext`] for `controller` and provide it to the current owner.
pub fn provide(controller: Rc<ThemeController>) -> ThemeContext {
    let ctx = ThemeContext::new(controller);
    provide_context(ctx);
    ctx
}
