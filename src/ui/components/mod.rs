//! Reusable UI building blocks.
//!
//! # Components
//!
//! - [`Button`]: Clickable button with variants
//! - [`Badge`]: Small status/counter label
//! - [`icons`]: SVG icon components

mod badge;
mod button;
mod icons;

pub use badge::{Badge, BadgeVariant};
pub use button::{Button, ButtonSize, ButtonVariant, button_classes};
pub use icons::*;
