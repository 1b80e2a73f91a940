//! Single chat message card.

use chrono::Local;
use leptos::prelude::*;

use crate::chat::markdown;
use crate::chat::{AttachmentRef, MessageView, UsageType};
use crate::ui::components::{
    ButtonSize, ButtonVariant, ChevronDownIcon, ChevronUpIcon, ClockIcon, DatabaseIcon,
    ExternalLinkIcon, FileIcon, FileTextIcon, button_classes,
};
use crate::ui::routes::ChatRoutes;

const BOT_BUBBLE: &str = "relative max-w-[80%] rounded-2xl p-6 bg-white dark:bg-gray-800 \
                          text-gray-800 dark:text-gray-200 shadow-lg hover:shadow-xl \
                          transition-all duration-200";

const USER_BUBBLE: &str = "relative max-w-[80%] rounded-2xl p-6 bg-gradient-to-r from-blue-600 \
                           to-blue-500 dark:from-blue-500 dark:to-blue-400 text-white ml-auto \
                           shadow-blue-500/20 hover:shadow-blue-500/30 shadow-lg hover:shadow-xl \
                           transition-all duration-200";

const REFERENCE_ROW: &str = "flex items-center text-sm text-gray-600 dark:text-gray-400 \
                             hover:text-blue-600 dark:hover:text-blue-400 w-full group/ref p-2 \
                             rounded-lg hover:bg-gray-50 dark:hover:bg-gray-700/50 \
                             transition-all duration-200";

/// DOM id of a message card, used as HTMX swap target.
pub fn card_dom_id(message_id: &str) -> String {
    format!("message-{message_id}")
}

/// `hx-vals` payload carrying a clicked reference.
fn reference_vals(reference: &AttachmentRef) -> String {
    serde_json::to_string(reference).unwrap_or_default()
}

/// Renders one message: body, image grid, attachment list and actions.
///
/// The only per-card state is `expanded`; the toggle re-fetches the card
/// with the state flipped and swaps it in place.
#[component]
pub fn ChatMessageCard(card: MessageView, routes: ChatRoutes) -> impl IntoView {
    let has_attachments = card.has_attachments();
    let capped = card.is_capped();
    let expanded = card.is_expanded();
    let message = card.into_message();
    let is_bot = message.is_bot();
    let dom_id = card_dom_id(&message.id);
    let time = message
        .timestamp
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string();

    let row_class = if is_bot {
        "chat-message flex justify-start mb-8 group"
    } else {
        "chat-message flex justify-end mb-8 group"
    };
    let kind = if is_bot { "bot" } else { "user" };
    let bubble = if is_bot { BOT_BUBBLE } else { USER_BUBBLE };

    let body = if is_bot {
        let html = markdown::render(&message.content);
        view! {
            <div class="mb-3 prose prose-sm dark:prose-invert max-w-none" data-role="body" inner_html=html></div>
        }
        .into_any()
    } else {
        let text = message.content.clone();
        view! {
            <div class="mb-3 max-w-none" data-role="body">
                <p class="text-[15px] leading-relaxed">{text}</p>
            </div>
        }
        .into_any()
    };

    let reference_url = routes.reference_url();

    let images = (is_bot && !message.images.is_empty()).then(|| {
        let tiles = message
            .images
            .iter()
            .map(|img| {
                view! {
                    <div
                        class="relative group/image rounded-xl overflow-hidden bg-gray-100 dark:bg-gray-700 shadow-md hover:shadow-lg transition-all duration-200 cursor-pointer"
                        data-role="image"
                        hx-post=reference_url
                        hx-vals={reference_vals(img)}
                        hx-swap="none"
                    >
                        <img
                            src={img.path.clone()}
                            alt={img.name.clone()}
                            class="w-full h-32 object-cover transition-all duration-300 hover:scale-105"
                        />
                        <div class="absolute inset-0 flex items-center justify-center opacity-0 group-hover/image:opacity-100 group-hover/image:bg-black/30 transition-all duration-200">
                            <ExternalLinkIcon class="text-white" />
                        </div>
                    </div>
                }
            })
            .collect_view();

        view! { <div class="mt-4 grid grid-cols-2 gap-3" data-role="images">{tiles}</div> }
    });

    let attachments = has_attachments.then(|| {
        let section_class = if capped {
            "mt-4 max-h-12 overflow-hidden"
        } else {
            "mt-4"
        };

        let references = message
            .references
            .iter()
            .map(|reference| {
                view! {
                    <button
                        type="button"
                        class={format!("{REFERENCE_ROW} mb-3")}
                        data-role="reference"
                        hx-post=reference_url
                        hx-vals={reference_vals(reference)}
                        hx-swap="none"
                    >
                        <FileIcon class="mr-3 flex-shrink-0" />
                        <span class="truncate flex-1 text-left">{reference.name.clone()}</span>
                        <ExternalLinkIcon class="opacity-0 group-hover/ref:opacity-100" />
                    </button>
                }
            })
            .collect_view();

        let report = message.report.as_ref().map(|report| {
            view! {
                <button
                    type="button"
                    class=REFERENCE_ROW
                    data-role="report"
                    hx-post=reference_url
                    hx-vals={reference_vals(report)}
                    hx-swap="none"
                >
                    <FileTextIcon class="mr-3 flex-shrink-0" />
                    <span class="truncate flex-1 text-left">{report.name.clone()}</span>
                    <ExternalLinkIcon class="opacity-0 group-hover/ref:opacity-100" />
                </button>
            }
        });

        view! {
            <div class=section_class data-role="attachments">
                <div class="pt-3 border-t border-gray-100 dark:border-gray-700">
                    {references}
                    {report}
                </div>
            </div>
        }
    });

    let save_actions = is_bot.then(|| {
        let floating = button_classes(ButtonVariant::Floating, ButtonSize::Icon, "group/btn");
        view! {
            <div class="absolute -left-12 top-1/2 -translate-y-1/2 flex flex-col space-y-2 opacity-0 group-hover:opacity-100 transition-opacity">
                <button
                    type="button"
                    class={floating.clone()}
                    title="Save to Database (Permanent)"
                    data-role="save-permanent"
                    hx-post={routes.attachment_url(&message.id, UsageType::Permanent)}
                    hx-swap="none"
                >
                    <DatabaseIcon class="text-blue-500 dark:text-blue-400" />
                </button>
                <button
                    type="button"
                    class=floating
                    title="Save to Session (Temporary)"
                    data-role="save-session"
                    hx-post={routes.attachment_url(&message.id, UsageType::Session)}
                    hx-swap="none"
                >
                    <ClockIcon class="text-green-500 dark:text-green-400" />
                </button>
            </div>
        }
    });

    let expand_toggle = has_attachments.then(|| {
        let chevron = if expanded {
            view! { <ChevronUpIcon class="text-gray-600 dark:text-gray-400" /> }.into_any()
        } else {
            view! { <ChevronDownIcon class="text-gray-600 dark:text-gray-400" /> }.into_any()
        };
        view! {
            <button
                type="button"
                class="absolute -bottom-7 left-1/2 -translate-x-1/2 bg-white dark:bg-gray-800 rounded-full p-1.5 shadow-lg hover:shadow-xl transition-all duration-200 opacity-0 group-hover:opacity-100 hover:scale-110"
                data-role="expand"
                aria-expanded={expanded.to_string()}
                hx-get={routes.message_url(&message.id, !expanded)}
                hx-target={format!("#{dom_id}")}
                hx-swap="outerHTML"
            >
                {chevron}
            </button>
        }
    });

    view! {
        <div id=dom_id class=row_class data-kind=kind>
            <div class=bubble>
                {body}
                {images}
                {attachments}
                {save_actions}
                {expand_toggle}
                <div class="absolute -bottom-6 text-xs text-gray-400 dark:text-gray-500" data-role="timestamp">
                    {time}
                </div>
            </div>
        </div>
    }
}
