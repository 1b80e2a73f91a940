//! Markdown rendering for bot replies.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};
use url::Url;

/// Link and image schemes allowed through; relative targets always are.
const SAFE_SCHEMES: [&str; 3] = ["http", "https", "mailto"];

/// Render GitHub-flavoured markdown to HTML.
///
/// Raw HTML in the source is emitted as escaped text, never passed through.
/// Link and image targets with any other scheme (`javascript:`, `data:`, ...)
/// are replaced by `#`.
pub fn render(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) => Event::Text(raw),
        Event::Start(tag) => Event::Start(sanitize_tag(tag)),
        Event::End(tag) => Event::End(sanitize_tag(tag)),
        other => other,
    });

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

fn sanitize_tag(tag: Tag<'_>) -> Tag<'_> {
    match tag {
        Tag::Link(kind, dest, title) => Tag::Link(kind, safe_url(dest), title),
        Tag::Image(kind, dest, title) => Tag::Image(kind, safe_url(dest), title),
        other => other,
    }
}

/// `dest` unchanged when relative or on an allowed scheme, `#` otherwise.
///
/// Parsing goes through `Url` so tabs and newlines inside the scheme are
/// stripped the way a browser would.
fn safe_url(dest: CowStr<'_>) -> CowStr<'_> {
    match Url::parse(&dest) {
        Err(url::ParseError::RelativeUrlWithoutBase) => dest,
        Ok(url) if SAFE_SCHEMES.contains(&url.scheme()) => dest,
        _ => CowStr::Borrowed("#"),
    }
}
