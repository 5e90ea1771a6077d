use crate::{
    backend::ImageBackend,
    config::DownloadConfig,
    error::{Result, StudioError},
    logger,
    models::{GenerationResponse, ShareStatus},
    selection::SelectionSet,
    view::{
        CardHandle, NoticeId, StatusKind, UiEvent, View, DOWNLOADED_ONLY_MESSAGE,
        EMPTY_PROMPT_ALERT, EMPTY_SELECTION_ALERT, LOADING_MESSAGE, NO_IMAGES_MESSAGE,
        PROCESSING_MESSAGE, RETRY_LABEL, SHARED_MESSAGE,
    },
};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Blank prompt; nothing was sent.
    Rejected,
    Pending { message: String },
    Rendered { count: usize },
    /// The error was rendered in place of the grid.
    Failed(StudioError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Nothing was selected; nothing was sent.
    Empty,
    Completed { count: usize },
    /// Items before the failing one stay saved; later ones were never requested.
    Aborted { processed: usize, error: StudioError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    Generation(GenerationOutcome),
    Toggled { url: String, selected: bool },
    Download(DownloadOutcome),
    Reloaded,
}

/// Drives one page's worth of generation, selection and download state.
///
/// Every operation takes `&mut self`, so a controller never has two
/// generations in flight and responses cannot be applied out of order.
pub struct GenerationController<B, V> {
    backend: B,
    view: Arc<V>,
    download: DownloadConfig,
    selection: SelectionSet,
}

impl<B, V> GenerationController<B, V>
where
    B: ImageBackend,
    V: View + 'static,
{
    pub fn new(backend: B, view: Arc<V>, download: DownloadConfig) -> Self {
        Self {
            backend,
            view,
            download,
            selection: SelectionSet::new(),
        }
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_selected(&self, url: &str) -> bool {
        self.selection.contains(url)
    }

    pub fn view(&self) -> &Arc<V> {
        &self.view
    }

    pub async fn handle(&mut self, event: UiEvent) -> EventOutcome {
        match event {
            UiEvent::Submit { prompt } => {
                EventOutcome::Generation(self.submit_generation(&prompt).await)
            }
            UiEvent::CardClicked { url, card } => {
                let selected = self.toggle_image_selection(&url, card);
                EventOutcome::Toggled { url, selected }
            }
            UiEvent::DownloadRequested => {
                EventOutcome::Download(self.process_selected_downloads().await)
            }
            UiEvent::Reload => {
                self.reload();
                EventOutcome::Reloaded
            }
        }
    }

    pub async fn submit_generation(&mut self, prompt_text: &str) -> GenerationOutcome {
        let prompt = prompt_text.trim();
        if prompt.is_empty() {
            let err = StudioError::Validation(EMPTY_PROMPT_ALERT.to_string());
            log::warn!("⚠️  {}", err);
            self.view.alert(&err.to_string());
            self.view.focus_prompt();
            return GenerationOutcome::Rejected;
        }

        log::info!("🎨 Submitting generation for prompt: {}", prompt);
        self.view.render_loading(LOADING_MESSAGE);

        match self.run_generation(prompt).await {
            Ok(outcome) => outcome,
            Err(err) => {
                log::error!("❌ Image generation failed: {}", err);
                self.view.render_error(&format!("Error: {}", err));
                GenerationOutcome::Failed(err)
            }
        }
    }

    async fn run_generation(&mut self, prompt: &str) -> Result<GenerationOutcome> {
        let _timer = logger::timer("Image generation");

        let images = match self.backend.generate(prompt).await? {
            GenerationResponse::Error { message } => {
                return Err(StudioError::Application(message));
            }
            GenerationResponse::Pending { message } => {
                log::info!("⏳ Generation still pending: {}", message);
                self.view.render_pending(&message, RETRY_LABEL);
                return Ok(GenerationOutcome::Pending { message });
            }
            GenerationResponse::Success { images } => images,
        };

        self.selection.clear();
        self.view.set_preview_hidden(true);

        if images.is_empty() {
            return Err(StudioError::DataShape(NO_IMAGES_MESSAGE.to_string()));
        }

        log::info!("✅ Displaying {} generated images", images.len());
        self.view.render_images(&images);
        Ok(GenerationOutcome::Rendered {
            count: images.len(),
        })
    }

    /// Flips membership of `url` and marks `card` to match. Returns whether
    /// the URL is selected afterwards.
    pub fn toggle_image_selection(&mut self, url: &str, card: CardHandle) -> bool {
        let selected = self.selection.toggle(url);
        log::debug!("Toggled {} -> selected={}", url, selected);

        self.view.set_card_selected(card, selected);
        self.view.set_preview_hidden(self.selection.is_empty());
        self.refresh_preview();
        selected
    }

    pub async fn process_selected_downloads(&mut self) -> DownloadOutcome {
        if self.selection.is_empty() {
            let err = StudioError::Validation(EMPTY_SELECTION_ALERT.to_string());
            log::warn!("⚠️  {}", err);
            self.view.alert(&err.to_string());
            return DownloadOutcome::Empty;
        }

        let urls = self.selection.to_vec();
        let _timer = logger::timer("Download batch");
        let mut processed = 0;

        for url in &urls {
            if let Err(error) = self.process_one(url).await {
                log::error!("❌ Error processing {}: {}", url, error);
                self.view
                    .alert(&format!("Failed to process images: {}", error));
                return DownloadOutcome::Aborted { processed, error };
            }
            processed += 1;
        }

        self.selection.clear();
        self.view.set_preview_hidden(true);
        self.refresh_preview();

        log::info!("✅ Processed {} selected images", processed);
        DownloadOutcome::Completed { count: processed }
    }

    /// Resets to the state of a freshly loaded page.
    pub fn reload(&mut self) {
        log::info!("🔄 Reloading");
        self.selection.clear();
        self.view.clear_grid();
        self.view.set_preview_hidden(true);
        self.refresh_preview();
    }

    async fn process_one(&self, url: &str) -> Result<()> {
        let processing = self.view.show_processing(PROCESSING_MESSAGE);
        let fetched = self.fetch_and_save(url).await;
        self.view.remove_notice(processing);

        let (message, kind) = match fetched? {
            ShareStatus::Shared => (SHARED_MESSAGE, StatusKind::Success),
            ShareStatus::NotShared => (DOWNLOADED_ONLY_MESSAGE, StatusKind::Info),
        };
        let status = self.view.show_status(message, kind);
        self.schedule_dismiss(status);
        Ok(())
    }

    async fn fetch_and_save(&self, url: &str) -> Result<ShareStatus> {
        log::info!("📥 Processing image: {}", url);
        let image = self.backend.download_and_pin(url).await?;
        let filename = image.filename_or(&self.download.fallback_filename);

        self.view.save_file(&filename, &image.bytes)?;
        log::info!("💾 Saved {} ({} bytes)", filename, image.bytes.len());
        Ok(image.share_status)
    }

    fn schedule_dismiss(&self, id: NoticeId) {
        let view = Arc::clone(&self.view);
        let delay = self.download.status_dismiss;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            view.remove_notice(id);
        });
    }

    fn refresh_preview(&self) {
        self.view.render_preview(&self.selection.to_vec());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DownloadedImage;
    use async_trait::async_trait;
    use std::collections::{HashMap, VecDeque};
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Default)]
    struct FakeBackend {
        replies: Mutex<VecDeque<Result<GenerationResponse>>>,
        prompts: Mutex<Vec<String>>,
        downloads: HashMap<String, Result<DownloadedImage>>,
        requested: Mutex<Vec<String>>,
    }

    impl FakeBackend {
        fn replying(replies: Vec<Result<GenerationResponse>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                ..Default::default()
            }
        }

        fn with_download(mut self, url: &str, reply: Result<DownloadedImage>) -> Self {
            self.downloads.insert(url.to_string(), reply);
            self
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ImageBackend for FakeBackend {
        async fn generate(&self, prompt: &str) -> Result<GenerationResponse> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(StudioError::Request("no scripted reply".into())))
        }

        async fn download_and_pin(&self, image_url: &str) -> Result<DownloadedImage> {
            self.requested.lock().unwrap().push(image_url.to_string());
            self.downloads
                .get(image_url)
                .cloned()
                .unwrap_or_else(|| Err(StudioError::Application("unknown image".into())))
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Grid {
        Empty,
        Loading(String),
        Pending { message: String, retry: String },
        Error(String),
        Cards(Vec<(String, bool)>),
    }

    #[derive(Debug)]
    struct Page {
        grid: Grid,
        preview_hidden: bool,
        preview: Vec<String>,
        alerts: Vec<String>,
        focused: bool,
        notices: Vec<(NoticeId, String)>,
        statuses: Vec<(String, StatusKind)>,
        saved: Vec<(String, Vec<u8>)>,
    }

    struct RecordingView {
        page: Mutex<Page>,
        next_notice: AtomicU64,
        fail_saves: bool,
    }

    impl RecordingView {
        fn new() -> Arc<Self> {
            Arc::new(Self::build(false))
        }

        fn failing_saves() -> Arc<Self> {
            Arc::new(Self::build(true))
        }

        fn build(fail_saves: bool) -> Self {
            Self {
                page: Mutex::new(Page {
                    grid: Grid::Empty,
                    preview_hidden: true,
                    preview: Vec::new(),
                    alerts: Vec::new(),
                    focused: false,
                    notices: Vec::new(),
                    statuses: Vec::new(),
                    saved: Vec::new(),
                }),
                next_notice: AtomicU64::new(1),
                fail_saves,
            }
        }

        fn page(&self) -> std::sync::MutexGuard<'_, Page> {
            self.page.lock().unwrap()
        }

        fn cards(&self) -> Vec<(String, bool)> {
            match &self.page().grid {
                Grid::Cards(cards) => cards.clone(),
                _ => Vec::new(),
            }
        }

        fn notice(&self, message: &str) -> NoticeId {
            let id = NoticeId(self.next_notice.fetch_add(1, Ordering::SeqCst));
            self.page().notices.push((id, message.to_string()));
            id
        }
    }

    impl View for RecordingView {
        fn render_loading(&self, message: &str) {
            self.page().grid = Grid::Loading(message.to_string());
        }

        fn render_pending(&self, message: &str, retry_label: &str) {
            self.page().grid = Grid::Pending {
                message: message.to_string(),
                retry: retry_label.to_string(),
            };
        }

        fn render_error(&self, message: &str) {
            self.page().grid = Grid::Error(message.to_string());
        }

        fn render_images(&self, urls: &[String]) {
            self.page().grid = Grid::Cards(urls.iter().map(|u| (u.clone(), false)).collect());
        }

        fn clear_grid(&self) {
            self.page().grid = Grid::Empty;
        }

        fn set_card_selected(&self, card: CardHandle, selected: bool) {
            if let Grid::Cards(cards) = &mut self.page().grid {
                if let Some(entry) = cards.get_mut(card.0) {
                    entry.1 = selected;
                }
            }
        }

        fn set_preview_hidden(&self, hidden: bool) {
            self.page().preview_hidden = hidden;
        }

        fn render_preview(&self, urls: &[String]) {
            self.page().preview = urls.to_vec();
        }

        fn alert(&self, message: &str) {
            self.page().alerts.push(message.to_string());
        }

        fn focus_prompt(&self) {
            self.page().focused = true;
        }

        fn show_processing(&self, message: &str) -> NoticeId {
            self.notice(message)
        }

        fn show_status(&self, message: &str, kind: StatusKind) -> NoticeId {
            self.page().statuses.push((message.to_string(), kind));
            self.notice(message)
        }

        fn remove_notice(&self, id: NoticeId) {
            self.page().notices.retain(|(notice, _)| *notice != id);
        }

        fn save_file(&self, filename: &str, bytes: &[u8]) -> Result<()> {
            if self.fail_saves {
                return Err(StudioError::Io("disk full".into()));
            }
            self.page().saved.push((filename.to_string(), bytes.to_vec()));
            Ok(())
        }
    }

    fn images(urls: &[&str]) -> Result<GenerationResponse> {
        Ok(GenerationResponse::Success {
            images: urls.iter().map(|u| u.to_string()).collect(),
        })
    }

    fn image(bytes: &[u8], disposition: Option<&str>, share: ShareStatus) -> Result<DownloadedImage> {
        Ok(DownloadedImage {
            bytes: bytes.to_vec(),
            content_disposition: disposition.map(String::from),
            share_status: share,
        })
    }

    fn controller(
        backend: FakeBackend,
        view: Arc<RecordingView>,
    ) -> (GenerationController<Arc<FakeBackend>, RecordingView>, Arc<FakeBackend>) {
        let backend = Arc::new(backend);
        let controller =
            GenerationController::new(Arc::clone(&backend), view, DownloadConfig::default());
        (controller, backend)
    }

    #[tokio::test]
    async fn non_blank_prompt_sends_one_trimmed_request() {
        let view = RecordingView::new();
        let (mut controller, backend) =
            controller(FakeBackend::replying(vec![images(&["a.png"])]), Arc::clone(&view));

        let outcome = controller.submit_generation("  a red fox \n").await;

        assert_eq!(outcome, GenerationOutcome::Rendered { count: 1 });
        assert_eq!(backend.prompts(), vec!["a red fox"]);
    }

    #[tokio::test]
    async fn blank_prompt_alerts_and_focuses_without_a_request() {
        let view = RecordingView::new();
        let (mut controller, backend) = controller(FakeBackend::default(), Arc::clone(&view));

        for prompt in ["", "   ", "\t\n"] {
            assert_eq!(
                controller.submit_generation(prompt).await,
                GenerationOutcome::Rejected
            );
        }

        assert!(backend.prompts().is_empty());
        let page = view.page();
        assert!(page.focused);
        assert_eq!(page.alerts.len(), 3);
        assert_eq!(page.alerts[0], EMPTY_PROMPT_ALERT);
        assert_eq!(page.grid, Grid::Empty);
    }

    #[tokio::test]
    async fn success_renders_cards_in_order_and_clears_selection() {
        let view = RecordingView::new();
        let (mut controller, _) = controller(
            FakeBackend::replying(vec![images(&["old.png"]), images(&["a.png", "b.png"])]),
            Arc::clone(&view),
        );

        controller.submit_generation("first").await;
        controller.toggle_image_selection("old.png", CardHandle(0));
        assert!(!view.page().preview_hidden);

        let outcome = controller.submit_generation("second").await;

        assert_eq!(outcome, GenerationOutcome::Rendered { count: 2 });
        assert_eq!(
            view.cards(),
            vec![("a.png".to_string(), false), ("b.png".to_string(), false)]
        );
        assert!(controller.selection().is_empty());
        assert!(view.page().preview_hidden);
    }

    #[tokio::test]
    async fn double_toggle_restores_selection_and_card() {
        let view = RecordingView::new();
        let (mut controller, _) =
            controller(FakeBackend::replying(vec![images(&["a.png", "b.png"])]), Arc::clone(&view));
        controller.submit_generation("fox").await;

        assert!(controller.toggle_image_selection("b.png", CardHandle(1)));
        assert!(controller.is_selected("b.png"));
        assert_eq!(view.cards()[1], ("b.png".to_string(), true));
        assert_eq!(view.page().preview, vec!["b.png"]);
        assert!(!view.page().preview_hidden);

        assert!(!controller.toggle_image_selection("b.png", CardHandle(1)));
        assert!(controller.selection().is_empty());
        assert_eq!(view.cards()[1], ("b.png".to_string(), false));
        assert!(view.page().preview.is_empty());
        assert!(view.page().preview_hidden);
    }

    #[tokio::test]
    async fn preview_follows_selection_order() {
        let view = RecordingView::new();
        let (mut controller, _) = controller(
            FakeBackend::replying(vec![images(&["a.png", "b.png", "c.png"])]),
            Arc::clone(&view),
        );
        controller.submit_generation("fox").await;

        controller.toggle_image_selection("c.png", CardHandle(2));
        controller.toggle_image_selection("a.png", CardHandle(0));

        assert_eq!(view.page().preview, vec!["c.png", "a.png"]);
    }

    #[tokio::test]
    async fn pending_renders_message_with_retry_and_keeps_selection() {
        let view = RecordingView::new();
        let (mut controller, _) = controller(
            FakeBackend::replying(vec![
                images(&["a.png"]),
                Ok(GenerationResponse::Pending {
                    message: "still working".into(),
                }),
            ]),
            Arc::clone(&view),
        );
        controller.submit_generation("fox").await;
        controller.toggle_image_selection("a.png", CardHandle(0));

        let outcome = controller.submit_generation("fox again").await;

        assert_eq!(
            outcome,
            GenerationOutcome::Pending {
                message: "still working".into()
            }
        );
        assert_eq!(
            view.page().grid,
            Grid::Pending {
                message: "still working".into(),
                retry: RETRY_LABEL.into()
            }
        );
        assert!(controller.is_selected("a.png"));
        assert!(!view.page().preview_hidden);
    }

    #[tokio::test]
    async fn transport_error_is_rendered_without_cards() {
        let view = RecordingView::new();
        let (mut controller, _) = controller(
            FakeBackend::replying(vec![Err(StudioError::Transport {
                status: 400,
                message: Some("bad prompt".into()),
            })]),
            Arc::clone(&view),
        );

        let outcome = controller.submit_generation("fox").await;

        assert!(matches!(outcome, GenerationOutcome::Failed(StudioError::Transport { status: 400, .. })));
        match &view.page().grid {
            Grid::Error(message) => assert!(message.contains("bad prompt")),
            other => panic!("expected error, got {:?}", other),
        }
        assert!(view.cards().is_empty());
    }

    #[tokio::test]
    async fn error_field_becomes_an_application_error() {
        let view = RecordingView::new();
        let (mut controller, _) = controller(
            FakeBackend::replying(vec![Ok(GenerationResponse::Error {
                message: "model offline".into(),
            })]),
            Arc::clone(&view),
        );

        let outcome = controller.submit_generation("fox").await;

        assert_eq!(
            outcome,
            GenerationOutcome::Failed(StudioError::Application("model offline".into()))
        );
        assert_eq!(view.page().grid, Grid::Error("Error: model offline".into()));
    }

    #[tokio::test]
    async fn empty_image_list_clears_selection_then_fails() {
        let view = RecordingView::new();
        let (mut controller, _) = controller(
            FakeBackend::replying(vec![images(&["a.png"]), images(&[])]),
            Arc::clone(&view),
        );
        controller.submit_generation("fox").await;
        controller.toggle_image_selection("a.png", CardHandle(0));

        let outcome = controller.submit_generation("fox").await;

        assert_eq!(
            outcome,
            GenerationOutcome::Failed(StudioError::DataShape(NO_IMAGES_MESSAGE.into()))
        );
        assert!(controller.selection().is_empty());
        assert!(view.page().preview_hidden);
        assert_eq!(
            view.page().grid,
            Grid::Error(format!("Error: {}", NO_IMAGES_MESSAGE))
        );
    }

    #[tokio::test]
    async fn download_with_empty_selection_only_alerts() {
        let view = RecordingView::new();
        let (mut controller, backend) = controller(FakeBackend::default(), Arc::clone(&view));

        assert_eq!(
            controller.process_selected_downloads().await,
            DownloadOutcome::Empty
        );
        assert!(backend.requested().is_empty());
        assert_eq!(view.page().alerts, vec![EMPTY_SELECTION_ALERT]);
    }

    #[tokio::test]
    async fn failing_item_aborts_batch_and_keeps_selection() {
        let view = RecordingView::new();
        let backend = FakeBackend::replying(vec![images(&["u1", "u2", "u3"])])
            .with_download("u1", image(b"one", None, ShareStatus::Shared))
            .with_download(
                "u2",
                Err(StudioError::Application("Failed to process image: 404".into())),
            )
            .with_download("u3", image(b"three", None, ShareStatus::Shared));
        let (mut controller, backend) = controller(backend, Arc::clone(&view));
        controller.submit_generation("fox").await;
        controller.toggle_image_selection("u1", CardHandle(0));
        controller.toggle_image_selection("u2", CardHandle(1));
        controller.toggle_image_selection("u3", CardHandle(2));

        let outcome = controller.process_selected_downloads().await;

        assert_eq!(
            outcome,
            DownloadOutcome::Aborted {
                processed: 1,
                error: StudioError::Application("Failed to process image: 404".into()),
            }
        );
        assert_eq!(backend.requested(), vec!["u1", "u2"]);
        let page = view.page();
        assert_eq!(page.saved, vec![("generated_image.png".to_string(), b"one".to_vec())]);
        assert_eq!(
            page.alerts,
            vec!["Failed to process images: Failed to process image: 404"]
        );
        assert!(page.notices.iter().all(|(_, m)| m != PROCESSING_MESSAGE));
        assert!(!page.preview_hidden);
        drop(page);
        assert_eq!(controller.selection().to_vec(), vec!["u1", "u2", "u3"]);
    }

    #[tokio::test]
    async fn successful_batch_clears_selection_and_hides_preview() {
        let view = RecordingView::new();
        let backend = FakeBackend::replying(vec![images(&["u1", "u2"])])
            .with_download(
                "u1",
                image(b"one", Some("attachment; filename=foo.png"), ShareStatus::Shared),
            )
            .with_download("u2", image(b"two", None, ShareStatus::NotShared));
        let (mut controller, backend) = controller(backend, Arc::clone(&view));
        controller.submit_generation("fox").await;
        controller.toggle_image_selection("u1", CardHandle(0));
        controller.toggle_image_selection("u2", CardHandle(1));

        let outcome = controller.process_selected_downloads().await;

        assert_eq!(outcome, DownloadOutcome::Completed { count: 2 });
        assert_eq!(backend.requested(), vec!["u1", "u2"]);
        assert!(controller.selection().is_empty());
        let page = view.page();
        assert!(page.preview_hidden);
        assert!(page.preview.is_empty());
        assert_eq!(
            page.saved,
            vec![
                ("foo.png".to_string(), b"one".to_vec()),
                ("generated_image.png".to_string(), b"two".to_vec()),
            ]
        );
        assert_eq!(
            page.statuses,
            vec![
                (SHARED_MESSAGE.to_string(), StatusKind::Success),
                (DOWNLOADED_ONLY_MESSAGE.to_string(), StatusKind::Info),
            ]
        );
        assert!(page.alerts.is_empty());
    }

    #[tokio::test]
    async fn save_failure_aborts_the_batch() {
        let view = RecordingView::failing_saves();
        let backend = FakeBackend::replying(vec![images(&["u1", "u2"])])
            .with_download("u1", image(b"one", None, ShareStatus::Shared))
            .with_download("u2", image(b"two", None, ShareStatus::Shared));
        let (mut controller, backend) = controller(backend, Arc::clone(&view));
        controller.submit_generation("fox").await;
        controller.toggle_image_selection("u1", CardHandle(0));
        controller.toggle_image_selection("u2", CardHandle(1));

        let outcome = controller.process_selected_downloads().await;

        assert!(matches!(
            outcome,
            DownloadOutcome::Aborted { processed: 0, error: StudioError::Io(_) }
        ));
        assert_eq!(backend.requested(), vec!["u1"]);
        assert_eq!(controller.selection().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn status_notices_are_dismissed_after_the_delay() {
        let view = RecordingView::new();
        let backend = FakeBackend::replying(vec![images(&["u1"])])
            .with_download("u1", image(b"one", None, ShareStatus::Shared));
        let (mut controller, _) = controller(backend, Arc::clone(&view));
        controller.submit_generation("fox").await;
        controller.toggle_image_selection("u1", CardHandle(0));

        controller.process_selected_downloads().await;
        assert_eq!(view.page().notices.len(), 1);
        assert_eq!(view.page().notices[0].1, SHARED_MESSAGE);

        tokio::time::sleep(Duration::from_millis(2_900)).await;
        assert_eq!(view.page().notices.len(), 1);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(view.page().notices.is_empty());
    }

    #[tokio::test]
    async fn reload_resets_page_state() {
        let view = RecordingView::new();
        let (mut controller, _) =
            controller(FakeBackend::replying(vec![images(&["a.png"])]), Arc::clone(&view));
        controller.submit_generation("fox").await;
        controller.toggle_image_selection("a.png", CardHandle(0));

        assert_eq!(controller.handle(UiEvent::Reload).await, EventOutcome::Reloaded);

        assert!(controller.selection().is_empty());
        let page = view.page();
        assert_eq!(page.grid, Grid::Empty);
        assert!(page.preview_hidden);
        assert!(page.preview.is_empty());
    }

    #[tokio::test]
    async fn events_dispatch_to_operations() {
        let view = RecordingView::new();
        let backend = FakeBackend::replying(vec![images(&["a.png"])])
            .with_download("a.png", image(b"a", None, ShareStatus::NotShared));
        let (mut controller, _) = controller(backend, Arc::clone(&view));

        assert_eq!(
            controller
                .handle(UiEvent::Submit {
                    prompt: "fox".into()
                })
                .await,
            EventOutcome::Generation(GenerationOutcome::Rendered { count: 1 })
        );
        assert_eq!(
            controller
                .handle(UiEvent::CardClicked {
                    url: "a.png".into(),
                    card: CardHandle(0),
                })
                .await,
            EventOutcome::Toggled {
                url: "a.png".into(),
                selected: true
            }
        );
        assert_eq!(
            controller.handle(UiEvent::DownloadRequested).await,
            EventOutcome::Download(DownloadOutcome::Completed { count: 1 })
        );
    }
}
