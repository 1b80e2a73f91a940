//! Button component with variants and sizes.

use leptos::prelude::*;

/// Button visual variant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Primary action button (send).
    #[default]
    Primary,
    /// Icon-only muted button inside the input bar.
    Ghost,
    /// Round floating button shown on hover next to a message.
    Floating,
}

impl ButtonVariant {
    /// Get CSS classes for this variant.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Primary => {
                "rounded-lg bg-blue-600 dark:bg-blue-500 text-white \
                 hover:bg-blue-700 dark:hover:bg-blue-600"
            }
            Self::Ghost => {
                "bg-transparent text-gray-500 dark:text-gray-400 \
                 hover:text-gray-700 dark:hover:text-gray-300"
            }
            Self::Floating => {
                "rounded-full bg-white dark:bg-gray-700 shadow-lg hover:shadow-xl \
                 hover:scale-110"
            }
        }
    }
}

/// Button size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ButtonSize {
    /// Padded text button (default).
    #[default]
    Md,
    /// Icon-only button.
    Icon,
}

impl ButtonSize {
    /// Get CSS classes for this size.
    #[must_use]
    pub fn classes(self) -> &'static str {
        match self {
            Self::Md => "px-4 py-2 text-sm",
            Self::Icon => "p-2",
        }
    }
}

/// Shared classes for every button, including raw `<button>`s that need
/// HTMX attributes and so cannot go through [`Button`].
pub fn button_classes(variant: ButtonVariant, size: ButtonSize, extra: &str) -> String {
    let base_classes = "inline-flex items-center justify-center font-medium \
                        transition-all duration-200 focus-visible:outline-none \
                        focus-visible:ring-2 focus-visible:ring-blue-500 \
                        disabled:pointer-events-none disabled:opacity-50";

    format!("{base_classes} {} {} {extra}", variant.classes(), size.classes())
}

/// Plain button component.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Button variant=ButtonVariant::Primary button_type="submit" disabled=loading>
///         <SendIcon class="w-5 h-5" />
///     </Button>
/// }
/// ```
#[component]
pub fn Button(
    /// Button variant.
    #[prop(default = ButtonVariant::Primary)]
    variant: ButtonVariant,
    /// Button size.
    #[prop(default = ButtonSize::Md)]
    size: ButtonSize,
    /// Whether the button is disabled.
    #[prop(default = false)]
    disabled: bool,
    /// Button type attribute.
    #[prop(default = "button")]
    button_type: &'static str,
    /// Accessible label for icon-only buttons.
    #[prop(default = "")]
    label: &'static str,
    /// Inline click handler (plain JS).
    #[prop(default = "")]
    onclick: &'static str,
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
    /// Button content.
    children: Children,
) -> impl IntoView {
    let classes = button_classes(variant, size, class);
    let label = (!label.is_empty()).then_some(label);
    let onclick = (!onclick.is_empty()).then_some(onclick);

    view! {
        <button
            type=button_type
            class=classes
            disabled=disabled
            aria-label=label
            title=label
            onclick=onclick
        >
            {children()}
        </button>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_classes_compose() {
        let classes = button_classes(ButtonVariant::Floating, ButtonSize::Icon, "group/btn");
        assert!(classes.contains("rounded-full"));
        assert!(classes.contains("p-2"));
        assert!(classes.ends_with("group/btn"));
    }
}
