//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Logger and panic hook setup
//! - Input events (keys and swipes mapped to intents)

pub mod input;

pub use input::{Intent, map_key, swipe_direction};

/// Install the log backend: `console_log` plus the panic hook in the browser
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Install the log backend: `env_logger` (honours `RUST_LOG`, default `info`)
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
