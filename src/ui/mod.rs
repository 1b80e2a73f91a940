//! Server-rendered UI.
//!
//! Leptos components rendered to HTML strings on the server. Interactivity
//! is declared with HTMX attributes that call back into [`crate::server`].
//!
//! # Structure
//!
//! - [`page`]: Full document shell
//! - [`chat`]: Chat input, message card and list
//! - [`components`]: Shared buttons, badges and icons
//! - [`routes`]: URLs shared between markup and router

pub mod chat;
pub mod components;
pub mod page;
pub mod routes;

use leptos::prelude::*;

pub use routes::ChatRoutes;

/// Render a view to an HTML string inside a fresh reactive owner.
pub fn render_fragment<F, V>(build: F) -> String
where
    F: FnOnce() -> V,
    V: IntoView,
{
    let owner = Owner::new();
    owner.with(|| build().to_html())
}
