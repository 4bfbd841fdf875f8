mod app;
mod browser;
mod components;
mod config;
mod pages;
mod preference;
mod theme;

use app::App;

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    // Only fails if a logger is already installed.
    let _ = console_log::init_with_level(level);

    leptos::mount::mount_to_body(App);
}
