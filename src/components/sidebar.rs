use leptos::prelude::*;

use crate::components::theme_toggle::ThemeToggle;
use crate::config::SiteConfig;

#[component]
pub fn Sidebar() -> impl IntoView {
    let site = expect_context::<SiteConfig>();

    view! {
        <nav class="sidebar">
            <div class="sidebar-header">
                <h1 class="sidebar-title">{site.title}</h1>
                <p class="sidebar-subtitle">{site.tagline}</p>
                <ThemeToggle />
            </div>
            <ul class="nav-list">
                <li class="nav-item">
                    <a href="/" class="nav-link">"Home"</a>
                </li>
                <li class="nav-item">
                    <a href="/markets" class="nav-link">"Markets"</a>
                </li>
            </ul>
        </nav>
    }
}
