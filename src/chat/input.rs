//! Input box state: typed text plus pending file selection.
//!
//! The state is transport-agnostic. The HTTP layer feeds form fields in and
//! passes a [`SendHandler`] that receives whatever the box emits.

use axum::body::Bytes;

/// A file picked or dropped in the input box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Create a file, guessing the content type from the name when the
    /// client did not send one.
    pub fn new(name: impl Into<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        let name = name.into();
        let content_type = content_type
            .filter(|ct| !ct.is_empty())
            .unwrap_or_else(|| mime_guess::from_path(&name).first_or_octet_stream().to_string());
        Self {
            name,
            content_type,
            bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Receiver for messages emitted by the input box.
pub trait SendHandler {
    /// `files` is `None` when nothing was attached.
    fn on_send(&mut self, text: String, files: Option<Vec<UploadedFile>>);
}

impl<F> SendHandler for F
where
    F: FnMut(String, Option<Vec<UploadedFile>>),
{
    fn on_send(&mut self, text: String, files: Option<Vec<UploadedFile>>) {
        self(text, files);
    }
}

/// Local state of the chat input.
#[derive(Debug, Clone, Default)]
pub struct ChatInputState {
    text: String,
    files: Vec<UploadedFile>,
}

impl ChatInputState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Replace the pending file selection.
    pub fn select_files(&mut self, files: Vec<UploadedFile>) {
        self.files = files;
    }

    /// Emit the current text and files if there is anything to send.
    ///
    /// Clears text and file selection after emitting. Returns whether the
    /// handler was called.
    pub fn submit(&mut self, handler: &mut impl SendHandler) -> bool {
        if self.text.trim().is_empty() && self.files.is_empty() {
            return false;
        }

        let text = std::mem::take(&mut self.text);
        let files = std::mem::take(&mut self.files);
        let files = (!files.is_empty()).then_some(files);

        handler.on_send(text, files);
        true
    }

    /// Emit dropped files together with whatever text is typed.
    ///
    /// Only the text is cleared; the pending selection is left alone.
    pub fn drop_files(&mut self, files: Vec<UploadedFile>, handler: &mut impl SendHandler) -> bool {
        if files.is_empty() {
            return false;
        }

        let text = std::mem::take(&mut self.text);
        handler.on_send(text, Some(files));
        true
    }
}
