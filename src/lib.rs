pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod logger;
pub mod models;
pub mod selection;
pub mod terminal;
pub mod view;

pub use backend::{HttpBackend, ImageBackend};
pub use config::{Config, DownloadConfig, ServerConfig};
pub use controller::{DownloadOutcome, EventOutcome, GenerationController, GenerationOutcome};
pub use error::{Result, StudioError};
pub use models::*;
pub use selection::SelectionSet;
pub use terminal::{Command, TerminalView};
pub use view::{CardHandle, NoticeId, StatusKind, UiEvent, View};
