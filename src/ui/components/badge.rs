//! Badge component for small counters and status labels.

use leptos::prelude::*;

/// Badge visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BadgeVariant {
    /// Filled badge.
    #[default]
    Default,
    /// Muted badge with a border.
    Secondary,
}

impl BadgeVariant {
    /// Get CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Default => "bg-blue-600 text-white",
            Self::Secondary => {
                "bg-gray-100 dark:bg-gray-700 text-gray-700 dark:text-gray-200 \
                 border border-gray-200 dark:border-gray-600"
            }
        }
    }
}

/// Badge component.
///
/// # Example
///
/// ```rust,ignore
/// view! { <Badge variant=BadgeVariant::Secondary>"3 messages"</Badge> }
/// ```
#[component]
pub fn Badge(
    #[prop(default = BadgeVariant::Default)] variant: BadgeVariant,
    #[prop(default = "")] class: &'static str,
    children: Children,
) -> impl IntoView {
    let classes = format!(
        "inline-flex items-center rounded-full px-2.5 py-0.5 text-xs font-semibold {} {}",
        variant.classes(),
        class
    );

    view! { <span class=classes>{children()}</span> }
}
