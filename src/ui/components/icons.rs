//! SVG icon components.
//!
//! Icons are rendered inline as SVG elements (Lucide outlines) so they pick
//! up the surrounding text colour.

use leptos::prelude::*;

/// Common icon size class.
const ICON_SIZE: &str = "h-4 w-4";

/// Shared `<svg>` wrapper for the outline icons below.
#[component]
fn IconSvg(class: &'static str, children: Children) -> impl IntoView {
    let classes = format!("{ICON_SIZE} {class}");

    view! {
        <svg
            xmlns="http://www.w3.org/2000/svg"
            viewBox="0 0 24 24"
            fill="none"
            stroke="currentColor"
            stroke-width="2"
            stroke-linecap="round"
            stroke-linejoin="round"
            aria-hidden="true"
            class=classes
        >
            {children()}
        </svg>
    }
}

/// Send/arrow-right icon.
#[component]
pub fn SendIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconSvg class=class>
            <line x1="22" y1="2" x2="11" y2="13" />
            <polygon points="22 2 15 22 11 13 2 9 22 2" />
        </IconSvg>
    }
}

/// Loader/spinner icon, shown while a request is in flight.
#[component]
pub fn LoaderIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconSvg class=class>
            <path d="M21 12a9 9 0 1 1-6.219-8.56" />
        </IconSvg>
    }
}

/// Paperclip icon for the file picker.
#[component]
pub fn PaperclipIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconSvg class=class>
            <path d="m21.44 11.05-9.19 9.19a6 6 0 0 1-8.49-8.49l8.57-8.57A4 4 0 1 1 18 8.84l-8.59 8.57a2 2 0 0 1-2.83-2.83l8.49-8.48" />
        </IconSvg>
    }
}

/// Microphone icon for voice input.
#[component]
pub fn MicIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconSvg class=class>
            <path d="M12 2a3 3 0 0 0-3 3v7a3 3 0 0 0 6 0V5a3 3 0 0 0-3-3Z" />
            <path d="M19 10v2a7 7 0 0 1-14 0v-2" />
            <line x1="12" y1="19" x2="12" y2="22" />
        </IconSvg>
    }
}

/// Generic file icon.
#[component]
pub fn FileIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconSvg class=class>
            <path d="M14.5 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V7.5L14.5 2z" />
            <polyline points="14 2 14 8 20 8" />
        </IconSvg>
    }
}

/// Document-with-lines icon, used for reports.
#[component]
pub fn FileTextIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconSvg class=class>
            <path d="M14.5 2H6a2 2 0 0 0-2 2v16a2 2 0 0 0 2 2h12a2 2 0 0 0 2-2V7.5L14.5 2z" />
            <polyline points="14 2 14 8 20 8" />
            <line x1="16" y1="13" x2="8" y2="13" />
            <line x1="16" y1="17" x2="8" y2="17" />
            <line x1="10" y1="9" x2="8" y2="9" />
        </IconSvg>
    }
}

/// External link icon.
#[component]
pub fn ExternalLinkIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconSvg class=class>
            <path d="M18 13v6a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2V8a2 2 0 0 1 2-2h6" />
            <polyline points="15 3 21 3 21 9" />
            <line x1="10" y1="14" x2="21" y2="3" />
        </IconSvg>
    }
}

#[component]
pub fn ChevronDownIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconSvg class=class>
            <path d="m6 9 6 6 6-6" />
        </IconSvg>
    }
}

#[component]
pub fn ChevronUpIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconSvg class=class>
            <path d="m18 15-6-6-6 6" />
        </IconSvg>
    }
}

/// Database icon (permanent save).
#[component]
pub fn DatabaseIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconSvg class=class>
            <ellipse cx="12" cy="5" rx="9" ry="3" />
            <path d="M3 5V19A9 3 0 0 0 21 19V5" />
            <path d="M3 12A9 3 0 0 0 21 12" />
        </IconSvg>
    }
}

/// Clock icon (session save).
#[component]
pub fn ClockIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconSvg class=class>
            <circle cx="12" cy="12" r="10" />
            <polyline points="12 6 12 12 16 14" />
        </IconSvg>
    }
}

/// Sparkles icon.
#[component]
pub fn SparklesIcon(#[prop(default = "")] class: &'static str) -> impl IntoView {
    view! {
        <IconSvg class=class>
            <path d="m12 3-1.912 5.813a2 2 0 0 1-1.275 1.275L3 12l5.813 1.912a2 2 0 0 1 1.275 1.275L12 21l1.912-5.813a2 2 0 0 1 1.275-1.275L21 12l-5.813-1.912a2 2 0 0 1-1.275-1.275L12 3Z" />
            <path d="M5 3v4" />
            <path d="M19 17v4" />
            <path d="M3 5h4" />
            <path d="M17 19h4" />
        </IconSvg>
    }
}
