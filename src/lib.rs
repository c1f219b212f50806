//! Interactive behaviour for the portfolio page.
//!
//! Everything outside [`frontend`] is host-agnostic: components receive the
//! elements, storage and timers they drive through the traits in [`dom`] and
//! [`timer`], so the same code runs against the browser and against the
//! in-memory fakes used by the tests.

pub mod config;
pub mod content;
pub mod dom;
pub mod images;
pub mod modal;
pub mod navigation;
pub mod preload;
pub mod proficiency;
pub mod reveal;
pub mod telemetry;
pub mod theme;
pub mod timer;
pub mod typing;

#[cfg(target_arch = "wasm32")]
pub mod frontend;

#[cfg(test)]
pub(crate) mod testing;
