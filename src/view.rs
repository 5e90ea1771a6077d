use std::fmt;

use crate::error::Result;

pub const LOADING_MESSAGE: &str =
    "Generating ultra-quality images. This may take several minutes...";
pub const RETRY_LABEL: &str = "Check Again";
pub const PROCESSING_MESSAGE: &str = "Processing image...";
pub const SHARED_MESSAGE: &str = "Image downloaded and shared on Pinterest!";
pub const DOWNLOADED_ONLY_MESSAGE: &str =
    "Image downloaded successfully (Pinterest sharing unavailable)";
pub const EMPTY_PROMPT_ALERT: &str = "Please enter a prompt";
pub const EMPTY_SELECTION_ALERT: &str = "Please select at least one image to download";
pub const NO_IMAGES_MESSAGE: &str = "No images were generated";

/// Position of a rendered card in the image grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardHandle(pub usize);

/// Identifies a transient notice (processing indicator or status message).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NoticeId(pub u64);

impl fmt::Display for NoticeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notice#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Info,
}

/// User interactions delivered to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Submit { prompt: String },
    CardClicked { url: String, card: CardHandle },
    DownloadRequested,
    Reload,
}

/// Rendering target driven by the controller.
///
/// Methods take `&self` because status notices are dismissed from spawned
/// timer tasks while the controller keeps working; implementations use
/// interior mutability.
pub trait View: Send + Sync {
    /// Replaces the grid with a loading indicator.
    fn render_loading(&self, message: &str);

    /// Replaces the grid with `message` and a retry control labelled `retry_label`.
    fn render_pending(&self, message: &str, retry_label: &str);

    /// Replaces the grid with an error message. No cards remain.
    fn render_error(&self, message: &str);

    /// Replaces the grid with one unselected card per URL, in order.
    /// Card `i` is addressed by `CardHandle(i)`.
    fn render_images(&self, urls: &[String]);

    fn clear_grid(&self);

    fn set_card_selected(&self, card: CardHandle, selected: bool);

    fn set_preview_hidden(&self, hidden: bool);

    /// Replaces the preview content with one card per URL, in order.
    fn render_preview(&self, urls: &[String]);

    /// Blocking notification to the user.
    fn alert(&self, message: &str);

    fn focus_prompt(&self);

    fn show_processing(&self, message: &str) -> NoticeId;

    fn show_status(&self, message: &str, kind: StatusKind) -> NoticeId;

    fn remove_notice(&self, id: NoticeId);

    /// Hands a downloaded payload to the user under `filename`.
    fn save_file(&self, filename: &str, bytes: &[u8]) -> Result<()>;
}
