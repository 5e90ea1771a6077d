use crate::{
    error::{Result, StudioError},
    view::{CardHandle, NoticeId, StatusKind, UiEvent, View},
};
use colored::*;
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(UiEvent),
    Help,
    Quit,
    Noop,
    Invalid(String),
}

struct TerminalState {
    cards: Vec<(String, bool)>,
    preview_hidden: bool,
    notices: HashMap<NoticeId, String>,
}

/// Renders the controller's output as terminal lines and saves downloads
/// into a directory.
pub struct TerminalView {
    download_dir: PathBuf,
    state: Mutex<TerminalState>,
    next_notice: AtomicU64,
}

impl TerminalView {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
            state: Mutex::new(TerminalState {
                cards: Vec::new(),
                preview_hidden: true,
                notices: HashMap::new(),
            }),
            next_notice: AtomicU64::new(1),
        }
    }

    fn state(&self) -> MutexGuard<'_, TerminalState> {
        // A panic while printing must not wedge the view.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Looks up a card by its displayed 1-based number.
    pub fn card(&self, number: usize) -> Option<(String, CardHandle)> {
        let index = number.checked_sub(1)?;
        self.state()
            .cards
            .get(index)
            .map(|(url, _)| (url.clone(), CardHandle(index)))
    }

    pub fn card_count(&self) -> usize {
        self.state().cards.len()
    }

    pub fn active_notices(&self) -> usize {
        self.state().notices.len()
    }

    /// Maps one input line to a command. Bare text is a prompt; control
    /// words only count when they are the whole line.
    pub fn parse_command(&self, line: &str) -> Command {
        let line = line.trim();
        if line.is_empty() {
            return Command::Noop;
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word.to_ascii_lowercase(), rest.trim()),
            None => (line.to_ascii_lowercase(), ""),
        };

        match (word.as_str(), rest.is_empty()) {
            ("quit" | "exit", true) => Command::Quit,
            ("help" | "?", true) => Command::Help,
            ("download", true) => Command::Event(UiEvent::DownloadRequested),
            ("retry" | "reload", true) => Command::Event(UiEvent::Reload),
            ("generate" | "gen", _) => Command::Event(UiEvent::Submit {
                prompt: rest.to_string(),
            }),
            ("select" | "toggle", _) => match rest.parse::<usize>() {
                Ok(number) => match self.card(number) {
                    Some((url, card)) => Command::Event(UiEvent::CardClicked { url, card }),
                    None => Command::Invalid(format!("No image card #{}", number)),
                },
                Err(_) => Command::Invalid(format!("Usage: select <1..{}>", self.card_count())),
            },
            _ => Command::Event(UiEvent::Submit {
                prompt: line.to_string(),
            }),
        }
    }

    fn format_cards(cards: &[(String, bool)]) -> String {
        cards
            .iter()
            .enumerate()
            .map(|(i, (url, selected))| {
                let marker = if *selected {
                    "[x]".green().bold()
                } else {
                    "[ ]".normal()
                };
                format!("  {} {:>2}. {}", marker, i + 1, url)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The grid as it is currently printed.
    pub fn grid_text(&self) -> String {
        Self::format_cards(&self.state().cards)
    }
}

impl View for TerminalView {
    fn render_loading(&self, message: &str) {
        self.state().cards.clear();
        println!("{}", message.cyan());
    }

    fn render_pending(&self, message: &str, retry_label: &str) {
        self.state().cards.clear();
        println!("{}", message.yellow());
        println!("  type `retry` to {}", retry_label.to_lowercase());
    }

    fn render_error(&self, message: &str) {
        self.state().cards.clear();
        println!("{}", message.red().bold());
    }

    fn render_images(&self, urls: &[String]) {
        let mut state = self.state();
        state.cards = urls.iter().map(|url| (url.clone(), false)).collect();
        println!("{}", "Generated images (type `select <n>`):".bold());
        println!("{}", Self::format_cards(&state.cards));
    }

    fn clear_grid(&self) {
        self.state().cards.clear();
    }

    fn set_card_selected(&self, card: CardHandle, selected: bool) {
        let mut state = self.state();
        if let Some(entry) = state.cards.get_mut(card.0) {
            entry.1 = selected;
            println!("{}", Self::format_cards(&state.cards));
        }
    }

    fn set_preview_hidden(&self, hidden: bool) {
        self.state().preview_hidden = hidden;
    }

    fn render_preview(&self, urls: &[String]) {
        if self.state().preview_hidden {
            return;
        }
        println!("{} ({})", "Selected".bold(), urls.len());
        for url in urls {
            println!("  • {}", url);
        }
    }

    fn alert(&self, message: &str) {
        println!("{} {}", "!".yellow().bold(), message.yellow());
    }

    fn focus_prompt(&self) {
        print!("{} ", ">".bright_blue().bold());
        let _ = io::stdout().flush();
    }

    fn show_processing(&self, message: &str) -> NoticeId {
        let id = NoticeId(self.next_notice.fetch_add(1, Ordering::Relaxed));
        self.state().notices.insert(id, message.to_string());
        println!("{}", message.bright_black());
        id
    }

    fn show_status(&self, message: &str, kind: StatusKind) -> NoticeId {
        let id = NoticeId(self.next_notice.fetch_add(1, Ordering::Relaxed));
        self.state().notices.insert(id, message.to_string());
        match kind {
            StatusKind::Success => println!("{}", message.green().bold()),
            StatusKind::Info => println!("{}", message),
        }
        id
    }

    fn remove_notice(&self, id: NoticeId) {
        self.state().notices.remove(&id);
    }

    fn save_file(&self, filename: &str, bytes: &[u8]) -> Result<()> {
        // Server-supplied names never escape the download directory.
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| StudioError::Io(format!("unusable filename: {}", filename)))?;

        fs::create_dir_all(&self.download_dir)?;
        let path = self.download_dir.join(name);
        fs::write(&path, bytes)?;
        println!("  saved {}", path.display().to_string().bright_black());
        Ok(())
    }
}
