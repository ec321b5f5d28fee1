pub mod attachments;
pub mod error;
pub mod models;
pub mod selection;
pub mod settings;
pub mod store;
pub mod tracker;
pub mod views;

pub use error::{Result, TiltError};
pub use models::{
    ChecklistEntry, ChecklistInput, LogEntry, NoteEntry, NoteInput, Posture, QuickLogEntry,
    QuickLogInput,
};
pub use selection::SelectionState;
pub use store::EntryStore;
pub use tracker::Tracker;
pub use views::{EmptyRangeWarning, ExportDocument, ExportPage, SeriesPoint};

/// Initialize logging (reads RUST_LOG env var). Call once from the consuming
/// shell before opening a tracker.
pub fn init_logging() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
