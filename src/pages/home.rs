use leptos::prelude::*;

use crate::config::SiteConfig;

#[component]
pub fn HomePage() -> impl IntoView {
    let site = expect_context::<SiteConfig>();

    let cards = site
        .widgets
        .into_iter()
        .map(|card| {
            view! {
                <div class="card">
                    <h3>{card.title}</h3>
                    <p>{card.description}</p>
                    <a href=card.href class="btn btn-primary">{card.action}</a>
                </div>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="page home-page">
            <h2>{format!("Welcome to {}", site.title)}</h2>
            <p class="page-description">{site.tagline}</p>
            <div class="card-grid">{cards}</div>
        </div>
    }
}
