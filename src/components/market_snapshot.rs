//! Stock and crypto quotes with a theme-aware bar chart.
//!
//! Bar fills are inline colors, so the widget follows theme changes through
//! the controller's notifier rather than the stylesheet.

use leptos::prelude::*;
use log::warn;
use serde::Deserialize;

use crate::theme::{Subscription, Theme, ThemeContext};

const QUOTES_JSON: &str = include_str!("../../data/markets.json");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteKind {
    Stock,
    Crypto,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub name: String,
    pub kind: QuoteKind,
    pub price: f64,
    pub change_pct: f64,
}

/// Fill colors for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub up: &'static str,
    pub down: &'static str,
    pub flat: &'static str,
}

pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            up: "#15803d",
            down: "#b91c1c",
            flat: "#5c6370",
        },
        Theme::Dark => Palette {
            up: "#4ade80",
            down: "#f87171",
            flat: "#9aa1ad",
        },
    }
}

impl Palette {
    pub fn for_change(&self, change_pct: f64) -> &'static str {
        if change_pct > 0.0 {
            self.up
        } else if change_pct < 0.0 {
            self.down
        } else {
            self.flat
        }
    }
}

pub fn parse_quotes(json: &str) -> Result<Vec<Quote>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Bar width as a percentage of the largest absolute move, at least 2%.
fn bar_width(change_pct: f64, max_abs: f64) -> f64 {
    if max_abs <= 0.0 {
        return 2.0;
    }
    (change_pct.abs() / max_abs * 100.0).max(2.0)
}

fn format_price(quote: &Quote) -> String {
    match quote.kind {
        QuoteKind::Crypto if quote.price >= 1000.0 => format!("${:.0}", quote.price),
        _ => format!("${:.2}", quote.price),
    }
}

#[component]
pub fn MarketSnapshot() -> impl IntoView {
    let ctx = expect_context::<ThemeContext>();
    let (chart_theme, set_chart_theme) = signal(ctx.current().unwrap_or_default());

    let subscription: StoredValue<Option<Subscription>, LocalStorage> = StoredValue::new_local(Some(
        ctx.subscribe(move |event| set_chart_theme.set(event.theme)),
    ));
    on_cleanup(move || {
        let _ = subscription.try_update_value(|sub| {
            if let Some(sub) = sub.take() {
                sub.unsubscribe();
            }
        });
    });

    let quotes = parse_quotes(QUOTES_JSON).unwrap_or_else(|e| {
        warn!("Failed to parse market data: {}", e);
        Vec::new()
    });
    let max_abs = quotes
        .iter()
        .map(|q| q.change_pct.abs())
        .fold(0.0_f64, f64::max);

    let rows = quotes
        .into_iter()
        .map(|quote| {
            let change = quote.change_pct;
            let width = format!("{:.0}%", bar_width(change, max_abs));
            let change_class = if change > 0.0 {
                "quote-change quote-up"
            } else if change < 0.0 {
                "quote-change quote-down"
            } else {
                "quote-change quote-flat"
            };
            let kind = match quote.kind {
                QuoteKind::Stock => "Stock",
                QuoteKind::Crypto => "Crypto",
            };
            let price = format_price(&quote);
            view! {
                <div class="quote-row">
                    <span class="quote-symbol">{quote.symbol}</span>
                    <span class="quote-name">{quote.name}</span>
                    <span class="quote-kind">{kind}</span>
                    <span class="quote-price">{price}</span>
                    <span class=change_class>{format!("{:+.2}%", change)}</span>
                    <div class="quote-bar-track">
                        <div
                            class="quote-bar"
                            style:width=width
                            style:background-color=move || palette(chart_theme.get()).for_change(change)
                        ></div>
                    </div>
                </div>
            }
        })
        .collect::<Vec<_>>();

    view! {
        <div class="market-snapshot">
            <h3>"Market Snapshot"</h3>
            {if rows.is_empty() {
                view! { <p class="market-empty">"Market data unavailable"</p> }.into_any()
            } else {
                view! { <div class="quote-list">{rows}</div> }.into_any()
            }}
        </div>
    }
}
