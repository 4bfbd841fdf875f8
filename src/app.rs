use std::rc::Rc;

use leptos::prelude::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::browser;
use crate::components::sidebar::Sidebar;
use crate::config;
use crate::pages::home::HomePage;
use crate::pages::markets::MarketsPage;
use crate::theme;

#[component]
pub fn App() -> impl IntoView {
    let site = config::load();

    let controller = Rc::new(browser::theme_controller(&site.theme));
    // Page-lifetime listener: the subscription is never cancelled.
    let _ = controller.subscribe(browser::dom_broadcaster(site.theme.event_name.clone()));

    // Initialize before any widget mounts so `current()` is already resolved.
    theme::provide(controller).initialize();
    provide_context(site);

    view! {
        <Router>
            <div class="app-layout">
                <Sidebar />
                <main class="content">
                    <Routes fallback=|| view! { <p>"Page not found"</p> }>
                        <Route path=path!("/") view=HomePage />
                        <Route path=path!("/markets") view=MarketsPage />
                    </Routes>
                </main>
            </div>
        </Router>
    }
}
