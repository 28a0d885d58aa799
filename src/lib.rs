//! Scroll-driven portfolio page: floating bubble layer, CMS-backed content
//! with static fallbacks, and a contact form, mounted into `#app`.

use wasm_bindgen::prelude::*;

pub mod app;
pub mod chrome;
pub mod cms;
pub mod config;
pub mod contact;
pub mod content;
pub mod dom;
pub mod error;
pub mod floating;
pub mod layout;
pub mod scroll;
pub mod sections;
pub mod visibility;

pub use app::{Page, mount, unmount};
pub use error::SiteError;
pub use layout::{Placement, compose, select_elements};
pub use scroll::{ScrollSignal, ScrollTracker};
pub use visibility::{ScrollRange, opacity};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    if let Err(err) = app::start_impl() {
        app::report_fatal(&err.into());
    }
}
