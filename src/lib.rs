//! # coupoz-page
//!
//! Client-side presentation controller for the CoupoZ marketing page,
//! compiled to WebAssembly. It keeps a handful of interdependent UI states in
//! sync with user and viewport events: color theme and language (both
//! persisted across loads), the mobile menu, the FAQ accordion, scroll
//! reveal animations, header shadow, and active-section nav highlighting.
//!
//! All decision logic runs against the [`dom::PageTree`] and
//! [`prefs::PreferenceBackend`] traits, so it is tested natively with
//! in-memory fakes. The browser bindings live in `host` behind the
//! `hydrate` feature.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`boot`] | Composes every controller; routes host events |
//! | [`prefs`] | Persisted preferences with soft failure |
//! | [`i18n`] | String tables and the language state machine |
//! | [`group`] | "At most one open" groups (FAQ accordion) |
//! | [`viewport`] | Reveal-once and active-section tracking |
//! | [`toggle`] | Theme, mobile menu, header shadow |
//! | [`effect`] | Side-effect list and its application |
//! | [`dom`] | Page-tree access trait and in-memory tree |
//! | [`geometry`] | Rectangles and intersection margins |
//! | [`config`] | Ids, classes, keys and tuning, with defaults |

pub mod boot;
pub mod config;
pub mod dom;
pub mod effect;
pub mod geometry;
pub mod group;
#[cfg(feature = "hydrate")]
pub mod host;
pub mod i18n;
pub mod prefs;
pub mod toggle;
pub mod viewport;

/// WASM entry point.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    host::start();
}
