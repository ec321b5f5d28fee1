//! Session-scoped coordinator for the tracking workflow.
//!
//! One `Tracker` per interactive session. It owns the entry store, the two
//! selection states, the attachment store, and the settings file, and is
//! the operation surface the form/chart/export UI talks to.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use log::info;
use serde_json::{Map, Value};

use crate::attachments::AttachmentStore;
use crate::error::Result;
use crate::models::{
    ChecklistEntry, ChecklistInput, LogEntry, NoteEntry, NoteInput, QuickLogEntry, QuickLogInput,
};
use crate::selection::SelectionState;
use crate::settings::SettingsStore;
use crate::store::EntryStore;
use crate::views::{self, ExportDocument, SeriesPoint};

const LOG_FILE: &str = "log.json";
const SETTINGS_FILE: &str = "settings.json";
const UPLOAD_DIR: &str = "uploads";

pub struct Tracker {
    store: EntryStore,
    attachments: AttachmentStore,
    settings: SettingsStore,
    symptoms: SelectionState,
    triggers: SelectionState,
}

impl Tracker {
    /// Opens every store under `data_dir` and starts with empty selections.
    pub fn open(data_dir: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;

        let store = EntryStore::open(data_dir.join(LOG_FILE))?;
        let attachments = AttachmentStore::new(data_dir.join(UPLOAD_DIR))?;
        let settings = SettingsStore::new(data_dir.join(SETTINGS_FILE))?;

        Ok(Self {
            store,
            attachments,
            settings,
            symptoms: SelectionState::new(),
            triggers: SelectionState::new(),
        })
    }

    // --- selection ---

    pub fn toggle_symptom(&mut self, label: &str) {
        self.symptoms.toggle(label);
    }

    pub fn toggle_trigger(&mut self, label: &str) {
        self.triggers.toggle(label);
    }

    /// Selects a user-typed symptom and keeps it in the catalog for later
    /// sessions.
    pub fn add_custom_symptom(&mut self, label: &str) -> anyhow::Result<()> {
        self.symptoms.add_free_text(label);
        self.settings.remember_symptom(label)
    }

    /// Selects a user-typed trigger and keeps it in the catalog for later
    /// sessions.
    pub fn add_custom_trigger(&mut self, label: &str) -> anyhow::Result<()> {
        self.triggers.add_free_text(label);
        self.settings.remember_trigger(label)
    }

    pub fn selected_symptoms(&self) -> Vec<String> {
        self.symptoms.snapshot()
    }

    pub fn selected_triggers(&self) -> Vec<String> {
        self.triggers.snapshot()
    }

    pub fn symptom_catalog(&self) -> Vec<String> {
        self.settings.symptom_catalog()
    }

    pub fn trigger_catalog(&self) -> Vec<String> {
        self.settings.trigger_catalog()
    }

    // --- submits ---

    /// Builds a quick-log entry from `input` plus the selected labels and
    /// appends it. Selections reset only once the entry is safely on disk.
    pub fn submit_quick_log(&mut self, input: QuickLogInput) -> Result<LogEntry> {
        let entry = LogEntry::QuickLog(QuickLogEntry::new(
            input,
            self.symptoms.snapshot(),
            self.triggers.snapshot(),
        ));
        self.store.append(entry.clone())?;

        self.symptoms.clear();
        self.triggers.clear();

        info!("Logged {} entry {}", entry.kind(), entry.id());
        Ok(entry)
    }

    pub fn submit_checklist(&mut self, input: ChecklistInput) -> Result<LogEntry> {
        let entry = LogEntry::Checklist(ChecklistEntry::new(input));
        self.store.append(entry.clone())?;

        info!("Logged {} entry {}", entry.kind(), entry.id());
        Ok(entry)
    }

    pub fn submit_note(&mut self, input: NoteInput) -> Result<LogEntry> {
        let entry = LogEntry::Note(NoteEntry::new(input));
        self.store.append(entry.clone())?;

        info!("Logged {} entry {}", entry.kind(), entry.id());
        Ok(entry)
    }

    // --- attachments ---

    /// Stores image bytes for a note and returns the `image_ref` to put on
    /// its `NoteInput`.
    pub fn attach_image(&self, original_name: &str, bytes: &[u8]) -> anyhow::Result<String> {
        self.attachments.save(original_name, bytes)
    }

    pub fn read_attachment(&self, image_ref: &str) -> anyhow::Result<Vec<u8>> {
        self.attachments.read(image_ref)
    }

    // --- reads ---

    pub fn entries(&self) -> &[LogEntry] {
        self.store.entries()
    }

    pub fn entries_between(&self, start: NaiveDate, end: NaiveDate) -> Vec<LogEntry> {
        self.store.filter_by_date_range(start, end)
    }

    pub fn time_series(&self, columns: &[&str]) -> Vec<SeriesPoint> {
        views::time_series(self.store.entries(), columns)
    }

    pub fn tabular_summary(&self) -> Vec<Map<String, Value>> {
        views::tabular_summary(self.store.entries())
    }

    pub fn export_range(&self, start: NaiveDate, end: NaiveDate) -> ExportDocument {
        views::export_range(self.store.entries(), start, end)
    }

    pub fn recent(&self, n: usize) -> Vec<LogEntry> {
        views::recent(self.store.entries(), n)
    }

    pub fn checklist_for_day(&self, date: NaiveDate) -> Option<ChecklistEntry> {
        views::checklist_for_day(self.store.entries(), date)
    }

    // --- settings ---

    pub fn water_goal_ml(&self) -> u32 {
        self.settings.water_goal_ml()
    }

    pub fn set_water_goal_ml(&self, goal_ml: u32) -> anyhow::Result<()> {
        self.settings.set_water_goal_ml(goal_ml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TiltError;
    use crate::models::Posture;
    use serde_json::Value;
    use tempfile::TempDir;

    #[test]
    fn test_quick_log_flow_persists_and_clears_selection() {
        let dir = TempDir::new().unwrap();

        let logged = {
            let mut tracker = Tracker::open(dir.path()).unwrap();
            tracker.toggle_symptom("Dizziness");
            tracker.toggle_symptom("Fatigue");
            tracker.toggle_trigger("Heat");
            tracker.add_custom_symptom("ear ringing").unwrap();

            let entry = tracker
                .submit_quick_log(QuickLogInput {
                    posture: Posture::Standing,
                    heart_rate: 112,
                    severity: 6,
                    ..Default::default()
                })
                .unwrap();

            assert!(tracker.selected_symptoms().is_empty());
            assert!(tracker.selected_triggers().is_empty());
            entry
        };

        let tracker = Tracker::open(dir.path()).unwrap();
        assert_eq!(tracker.entries(), &[logged.clone()]);

        match &tracker.entries()[0] {
            LogEntry::QuickLog(quick) => {
                assert_eq!(quick.symptoms, vec!["Dizziness", "Fatigue", "ear ringing"]);
                assert_eq!(quick.triggers, vec!["Heat"]);
                assert_eq!(quick.heart_rate, 112);
            }
            other => panic!("expected quick log, got {:?}", other),
        }
    }

    #[test]
    fn test_checklist_flow_and_day_lookup() {
        let dir = TempDir::new().unwrap();
        let mut tracker = Tracker::open(dir.path()).unwrap();

        let entry = tracker
            .submit_checklist(ChecklistInput {
                water_goal_met: true,
                ..Default::default()
            })
            .unwrap();

        let day = entry.timestamp().date_naive();
        let found = tracker.checklist_for_day(day).unwrap();
        assert!(found.water_goal_met);
        assert!(!found.medications_taken);
    }

    #[test]
    fn test_note_with_attachment_flow() {
        let dir = TempDir::new().unwrap();

        {
            let mut tracker = Tracker::open(dir.path()).unwrap();
            let image_ref = tracker.attach_image("standing_hr.png", b"png bytes").unwrap();

            tracker
                .submit_note(NoteInput {
                    note: "HR spike after standing".to_string(),
                    image_ref: Some(image_ref),
                })
                .unwrap();
        }

        let tracker = Tracker::open(dir.path()).unwrap();
        match &tracker.entries()[0] {
            LogEntry::Note(note) => {
                let image_ref = note.image_ref.as_deref().unwrap();
                assert_eq!(image_ref, "standing_hr.png");
                assert_eq!(tracker.read_attachment(image_ref).unwrap(), b"png bytes");
            }
            other => panic!("expected note, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_note_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut tracker = Tracker::open(dir.path()).unwrap();

        let err = tracker.submit_note(NoteInput::default()).unwrap_err();
        assert!(matches!(err, TiltError::Validation(_)));
        assert!(tracker.entries().is_empty());
    }

    #[test]
    fn test_custom_labels_survive_sessions() {
        let dir = TempDir::new().unwrap();

        {
            let mut tracker = Tracker::open(dir.path()).unwrap();
            tracker.add_custom_trigger("Large meal").unwrap();
        }

        let tracker = Tracker::open(dir.path()).unwrap();
        assert!(tracker.trigger_catalog().contains(&"Large meal".to_string()));
        // Remembered labels are catalog entries, not selections.
        assert!(tracker.selected_triggers().is_empty());
    }

    #[test]
    fn test_double_submit_appends_twice() {
        let dir = TempDir::new().unwrap();
        let mut tracker = Tracker::open(dir.path()).unwrap();

        let input = ChecklistInput {
            medications_taken: true,
            ..Default::default()
        };
        tracker.submit_checklist(input.clone()).unwrap();
        tracker.submit_checklist(input).unwrap();

        assert_eq!(tracker.entries().len(), 2);
    }

    #[test]
    fn test_views_run_against_live_store() {
        let dir = TempDir::new().unwrap();
        let mut tracker = Tracker::open(dir.path()).unwrap();

        let entry = tracker
            .submit_quick_log(QuickLogInput {
                severity: 8,
                ..Default::default()
            })
            .unwrap();
        tracker.submit_checklist(ChecklistInput::default()).unwrap();

        let series = tracker.time_series(&["severity"]);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].values["severity"], Value::from(8));
        assert_eq!(series[1].values["severity"], Value::Null);

        let day = entry.timestamp().date_naive();
        let document = tracker.export_range(day, day);
        assert_eq!(document.pages.len(), 2);
        assert!(document.warning.is_none());

        assert_eq!(tracker.tabular_summary().len(), 2);
        assert_eq!(tracker.recent(1).len(), 1);
    }
}
