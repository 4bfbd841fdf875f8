use std::cell::Cell;
use std::rc::Rc;

use log::{debug, info};

use super::notifier::{Notifier, Subscription};
use super::{Theme, ThemeChangeEvent, ThemePreference};
use crate::preference::PreferenceStore;

/// The environment's default appearance, e.g. `prefers-color-scheme`.
pub trait AmbientSignal {
    /// `false` when the environment cannot answer.
    fn prefers_dark(&self) -> bool;
}

/// The document-level flag stylesheets key their palette on.
pub trait StyleScope {
    /// Must be idempotent: applying the current theme again changes nothing.
    fn apply(&self, theme: Theme);
}

/// Owns the effective theme for one page lifetime.
///
/// `current` is `None` until [`initialize`](Self::initialize) has run.
pub struct ThemeController {
    store: Rc<dyn PreferenceStore>,
    ambient: Rc<dyn AmbientSignal>,
    scope: Rc<dyn StyleScope>,
    notifier: Notifier<ThemeChangeEvent>,
    storage_key: String,
    current: Cell<Option<Theme>>,
}

impl ThemeController {
    pub fn new(
        store: Rc<dyn PreferenceStore>,
        ambient: Rc<dyn AmbientSignal>,
        scope: Rc<dyn StyleScope>,
        storage_key: impl Into<String>,
    ) -> Self {
        Self {
            store,
            ambient,
            scope,
            notifier: Notifier::new(),
            storage_key: storage_key.into(),
            current: Cell::new(None),
        }
    }

    /// Resolve and apply the initial theme. A no-op once ready.
    ///
    /// Stored preference wins, then the ambient signal, then light.
    /// Does not publish a [`ThemeChangeEvent`].
    pub fn initialize(&self) {
        if self.current.get().is_some() {
            return;
        }

        let stored = self.store.read(&self.storage_key);
        let preference = ThemePreference::from_stored(stored.as_deref());
        let theme = match preference.theme() {
            Some(theme) => {
                info!("Theme from saved preference: {}", theme);
                theme
            }
            None if self.ambient.prefers_dark() => {
                info!("Theme from ambient color scheme: dark");
                Theme::Dark
            }
            None => {
                info!("Theme defaulted to light");
                Theme::Light
            }
        };

        self.scope.apply(theme);
        self.current.set(Some(theme));
    }

    /// Flip the theme, apply it, save it, then notify subscribers.
    ///
    /// A failed save keeps the new theme on screen for this session.
    pub fn toggle(&self) {
        self.initialize();
        let next = self.current.get().unwrap_or_default().toggled();
        debug!("Toggling theme to {}", next);

        self.scope.apply(next);
        self.current.set(Some(next));
        self.store.write(&self.storage_key, next.as_str());
        self.notifier.publish(&ThemeChangeEvent { theme: next });
    }

    pub fn current(&self) -> Option<Theme> {
        self.current.get()
    }

    #[cfg(test)]
    pub(crate) fn is_ready(&self) -> bool {
        self.current.get().is_some()
    }

    pub fn subscribe(&self, handler: impl Fn(&ThemeChangeEvent) + 'static) -> Subscription {
        self.notifier.subscribe(handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preference::DisabledStore;
    use crate::theme::test_support::{controller, store_with, FixedAmbient, FlagScope};
    use std::cell::RefCell;

    #[test]
    fn test_not_ready_before_initialize() {
        let (ctrl, scope) = controller(store_with(None), true);
        assert!(!ctrl.is_ready());
        assert_eq!(ctrl.current(), None);
        assert_eq!(scope.theme(), None);
    }

    #[test]
    fn test_initialize_uses_ambient_when_unset() {
        let (ctrl, scope) = controller(store_with(None), true);
        ctrl.initialize();

        assert!(ctrl.is_ready());
        assert_eq!(ctrl.current(), Some(Theme::Dark));
        assert_eq!(scope.theme(), Some(Theme::Dark));
    }

    #[test]
    fn test_saved_preference_wins_over_ambient() {
        let (ctrl, scope) = controller(store_with(Some("light")), true);
        ctrl.initialize();

        assert_eq!(ctrl.current(), Some(Theme::Light));
        assert_eq!(scope.theme(), Some(Theme::Light));
    }

    #[test]
    fn test_initialize_defaults_to_light() {
        let (ctrl, scope) = controller(store_with(None), false);
        ctrl.initialize();
        assert_eq!(scope.theme(), Some(Theme::Light));
    }

    #[test]
    fn test_unrecognized_stored_value_falls_back_to_ambient() {
        let (ctrl, _scope) = controller(store_with(Some("system")), true);
        ctrl.initialize();
        assert_eq!(ctrl.current(), Some(Theme::Dark));
    }

    #[test]
    fn test_initialize_twice_is_noop() {
        let store = store_with(None);
        let (ctrl, scope) = controller(store.clone(), true);
        ctrl.initialize();
        // A preference appearing later must not change an initialized controller.
        store.write("theme", "light");
        ctrl.initialize();

        assert_eq!(ctrl.current(), Some(Theme::Dark));
        assert_eq!(scope.changes.get(), 1);
    }

    #[test]
    fn test_initialize_does_not_publish() {
        let (ctrl, _scope) = controller(store_with(None), true);
        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let _sub = ctrl.subscribe(move |_| c.set(c.get() + 1));

        ctrl.initialize();
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_toggle_applies_and_persists() {
        let store = store_with(None);
        let (ctrl, scope) = controller(store.clone(), false);
        ctrl.initialize();
        ctrl.toggle();

        assert_eq!(ctrl.current(), Some(Theme::Dark));
        assert_eq!(scope.theme(), Some(Theme::Dark));
        assert_eq!(store.read("theme").as_deref(), Some("dark"));
    }

    #[test]
    fn test_even_toggles_return_to_start() {
        for start_dark in [false, true] {
            let store = store_with(None);
            let (ctrl, scope) = controller(store.clone(), start_dark);
            ctrl.initialize();
            let start = ctrl.current();

            for round in 1..=6 {
                ctrl.toggle();
                let expected_flip = round % 2 == 1;
                assert_eq!(ctrl.current() != start, expected_flip);
                // Stored value and applied flag agree after every toggle.
                assert_eq!(
                    store.read("theme").as_deref(),
                    ctrl.current().map(Theme::as_str)
                );
                assert_eq!(scope.theme(), ctrl.current());
            }
            assert_eq!(ctrl.current(), start);
        }
    }

    #[test]
    fn test_toggle_before_initialize_initializes_first() {
        let (ctrl, _scope) = controller(store_with(Some("dark")), false);
        ctrl.toggle();
        assert_eq!(ctrl.current(), Some(Theme::Light));
    }

    #[test]
    fn test_toggle_with_storage_disabled_still_switches() {
        let store = Rc::new(DisabledStore::default());
        let (ctrl, scope) = controller(store.clone(), false);
        ctrl.initialize();
        assert_eq!(scope.theme(), Some(Theme::Light));

        ctrl.toggle();
        assert_eq!(scope.theme(), Some(Theme::Dark));
        ctrl.toggle();
        assert_eq!(scope.theme(), Some(Theme::Light));

        assert_eq!(store.attempts.get(), 2);
        assert_eq!(store.read("theme"), None);
    }

    #[test]
    fn test_subscriber_called_once_per_toggle_with_new_theme() {
        let (ctrl, _scope) = controller(store_with(None), false);
        ctrl.initialize();

        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        let _sub = ctrl.subscribe(move |e| s.borrow_mut().push(e.theme));

        ctrl.toggle();
        assert_eq!(*seen.borrow(), vec![Theme::Dark]);
        ctrl.toggle();
        assert_eq!(*seen.borrow(), vec![Theme::Dark, Theme::Light]);
    }

    #[test]
    fn test_subscriber_sees_applied_state_during_publish() {
        let scope = Rc::new(FlagScope::default());
        let ctrl = Rc::new(ThemeController::new(
            store_with(None),
            Rc::new(FixedAmbient(false)),
            scope.clone(),
            "theme",
        ));
        ctrl.initialize();

        let observed = Rc::new(Cell::new(None));
        let o = Rc::clone(&observed);
        let sc = Rc::clone(&scope);
        let _sub = ctrl.subscribe(move |_| o.set(sc.theme()));

        ctrl.toggle();
        assert_eq!(observed.get(), Some(Theme::Dark));
    }

    #[test]
    fn test_late_subscriber_misses_earlier_toggle() {
        let (ctrl, _scope) = controller(store_with(None), false);
        ctrl.initialize();
        ctrl.toggle();

        let calls = Rc::new(Cell::new(0));
        let c = Rc::clone(&calls);
        let _sub = ctrl.subscribe(move |_| c.set(c.get() + 1));
        assert_eq!(calls.get(), 0);

        ctrl.toggle();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_only_remaining_listener_invoked_after_unsubscribe() {
        let (ctrl, _scope) = controller(store_with(None), false);
        ctrl.initialize();

        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let f = Rc::clone(&first);
        let one = ctrl.subscribe(move |_| f.set(f.get() + 1));
        let s = Rc::clone(&second);
        let _two = ctrl.subscribe(move |_| s.set(s.get() + 1));

        one.unsubscribe();
        ctrl.toggle();

        assert_eq!(first.get(), 0);
        assert_eq!(second.get(), 1);
    }

    #[test]
    fn test_independent_controllers_do_not_share_state() {
        let (a, _) = controller(store_with(None), false);
        let (b, _) = controller(store_with(None), false);
        a.initialize();
        b.initialize();
        a.toggle();

        assert_eq!(a.current(), Some(Theme::Dark));
        assert_eq!(b.current(), Some(Theme::Light));
    }
}
