mod catalog;
mod entry;

pub use catalog::{symptom_catalog, trigger_catalog, STOCK_SYMPTOMS, STOCK_TRIGGERS};
pub use entry::{
    validation, ChecklistEntry, ChecklistInput, LogEntry, NoteEntry, NoteInput, Posture,
    QuickLogEntry, QuickLogInput,
};
