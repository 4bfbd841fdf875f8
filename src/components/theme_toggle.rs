use leptos::prelude::*;

use crate::theme::{Theme, ThemeContext};

/// Icon and accessible label for the button while `theme` is active.
/// The icon shows the theme a click switches to.
pub fn toggle_face(theme: Theme) -> (&'static str, &'static str) {
    match theme {
        Theme::Dark => ("\u{2600}", "Switch to light mode"),
        Theme::Light => ("\u{263E}", "Switch to dark mode"),
    }
}

/// The button face to render, or `None` for the placeholder before the
/// controller is initialized.
pub fn button_face(theme: Option<Theme>) -> Option<(&'static str, &'static str)> {
    theme.map(toggle_face)
}

/// Dark mode switch.
///
/// Renders an inert placeholder of the same size until the theme
/// controller has been initialized.
#[component]
pub fn ThemeToggle() -> impl IntoView {
    let ctx = expect_context::<ThemeContext>();

    move || match button_face(ctx.theme.get()) {
        Some((icon, label)) => view! {
            <button
                class="theme-toggle"
                title=label
                aria-label=label
                on:click=move |_| ctx.toggle()
            >
                {icon}
            </button>
        }
        .into_any(),
        None => view! { <span class="theme-toggle-placeholder" aria-hidden="true"></span> }.into_any(),
    }
}
