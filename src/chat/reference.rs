//! What happens when a reference or image is clicked.

use crate::chat::message::AttachmentRef;

/// Outcome of a reference click, translated to an HTTP response by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceAction {
    /// Navigate the browser to this location.
    Redirect(String),
    /// Handled server-side; nothing to do in the browser.
    Handled,
}

/// Receives clicked references.
pub trait ReferenceHandler: Send + Sync {
    fn open(&self, reference: &AttachmentRef) -> ReferenceAction;
}

/// Default handler: send the browser to the reference path.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenInBrowser;

impl ReferenceHandler for OpenInBrowser {
    fn open(&self, reference: &AttachmentRef) -> ReferenceAction {
        tracing::info!(
            name: "reference.opened",
            path = %reference.path,
            reference = %reference.name,
            "Reference opened"
        );
        ReferenceAction::Redirect(reference.path.clone())
    }
}

impl<F> ReferenceHandler for F
where
    F: Fn(&AttachmentRef) -> ReferenceAction + Send + Sync,
{
    fn open(&self, reference: &AttachmentRef) -> ReferenceAction {
        self(reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_browser_redirects_to_path() {
        let reference = AttachmentRef::new("/files/q3.pdf", "Q3");
        assert_eq!(
            OpenInBrowser.open(&reference),
            ReferenceAction::Redirect("/files/q3.pdf".into())
        );
    }

    #[test]
    fn test_closure_handler() {
        let handler = |r: &AttachmentRef| {
            if r.name.is_empty() {
                ReferenceAction::Handled
            } else {
                ReferenceAction::Redirect(format!("/viewer?file={}", r.path))
            }
        };
        let action = handler.open(&AttachmentRef::new("/a", "a"));
        assert_eq!(action, ReferenceAction::Redirect("/viewer?file=/a".into()));
    }
}
