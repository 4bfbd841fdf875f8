use leptos::prelude::*;

use crate::components::market_snapshot::MarketSnapshot;

#[component]
pub fn MarketsPage() -> impl IntoView {
    view! {
        <div class="page markets-page">
            <h2>"Markets"</h2>
            <p class="page-description">"Delayed quotes for major stocks and crypto assets."</p>
            <MarketSnapshot />
        </div>
    }
}
