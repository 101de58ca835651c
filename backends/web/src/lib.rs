#![allow(clippy::module_name_repetitions)]

//! Browser backend for the Waypoint framework.
//!
//! [`DomSink`] turns visual nodes into DOM nodes, [`BrowserHistory`] maps navigation onto
//! `pushState` and `popstate`, and [`WebApp`] wires an [`AppBuilder`](waypoint::AppBuilder)
//! to both. Only meaningful on `wasm32-unknown-unknown` inside a page.

mod app;
mod dom;
mod error;
mod history;

pub use app::WebApp;
pub use dom::{DomRoot, DomSink};
pub use error::WebError;
pub use history::BrowserHistory;
