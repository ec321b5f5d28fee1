//! Log entry data model.
//!
//! One store holds three kinds of observation. Entries share a single JSON
//! file, each serialized as a flat field-map discriminated by `kind`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, TiltError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Posture {
    Sitting,
    Standing,
    Lying,
}

impl Default for Posture {
    fn default() -> Self {
        Posture::Sitting
    }
}

impl Posture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Posture::Sitting => "sitting",
            Posture::Standing => "standing",
            Posture::Lying => "lying",
        }
    }
}

/// One tracked observation. Immutable once appended to the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogEntry {
    QuickLog(QuickLogEntry),
    Checklist(ChecklistEntry),
    Note(NoteEntry),
}

impl LogEntry {
    pub fn id(&self) -> &str {
        match self {
            LogEntry::QuickLog(entry) => &entry.id,
            LogEntry::Checklist(entry) => &entry.id,
            LogEntry::Note(entry) => &entry.id,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            LogEntry::QuickLog(entry) => entry.timestamp,
            LogEntry::Checklist(entry) => entry.timestamp,
            LogEntry::Note(entry) => entry.timestamp,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            LogEntry::QuickLog(_) => "quick_log",
            LogEntry::Checklist(_) => "checklist",
            LogEntry::Note(_) => "note",
        }
    }

    /// Whether the entry's date falls within `[start, end]`, inclusive.
    pub fn logged_between(&self, start: NaiveDate, end: NaiveDate) -> bool {
        let date = self.timestamp().date_naive();
        date >= start && date <= end
    }

    /// Rejects records the type system cannot rule out. Out-of-range fields
    /// are clamped at input time and never reach this.
    pub fn validate(&self) -> Result<()> {
        match self {
            LogEntry::Note(note) if note.note.is_empty() && note.image_ref.is_none() => Err(
                TiltError::validation("note entry has no text and no image"),
            ),
            _ => Ok(()),
        }
    }
}

/// A point-in-time symptom log: vitals, severity, and the selected
/// symptom/trigger labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuickLogEntry {
    #[serde(default)]
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub posture: Posture,
    pub heart_rate: u16,
    pub blood_pressure: Option<String>,
    pub severity: u8,
    pub hydration_ml: Option<u32>,
    pub salt_intake_g: Option<u32>,
    pub symptoms: Vec<String>,
    pub triggers: Vec<String>,
    pub what_helped: Option<String>,
}

impl QuickLogEntry {
    pub fn new(input: QuickLogInput, symptoms: Vec<String>, triggers: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            posture: input.posture,
            heart_rate: validation::clamp_heart_rate(input.heart_rate),
            blood_pressure: normalize_text(input.blood_pressure),
            severity: validation::clamp_severity(input.severity),
            hydration_ml: input.hydration_ml.map(validation::clamp_hydration_ml),
            salt_intake_g: input.salt_intake_g.map(validation::clamp_salt_intake_g),
            symptoms,
            triggers,
            what_helped: normalize_text(input.what_helped),
        }
    }
}

/// A once-a-day routine checklist. Its day is the date component of
/// `timestamp`; an unchecked flag is recorded as false, never an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChecklistEntry {
    #[serde(default)]
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub medications_taken: bool,
    pub water_goal_met: bool,
    pub compression_wear: bool,
    pub exercise_tolerance: bool,
}

impl ChecklistEntry {
    pub fn new(input: ChecklistInput) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            medications_taken: input.medications_taken,
            water_goal_met: input.water_goal_met,
            compression_wear: input.compression_wear,
            exercise_tolerance: input.exercise_tolerance,
        }
    }
}

/// A free-form note, optionally referencing a stored attachment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NoteEntry {
    #[serde(default)]
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub note: String,
    pub image_ref: Option<String>,
}

impl NoteEntry {
    pub fn new(input: NoteInput) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            note: input.note.trim().to_string(),
            image_ref: normalize_text(input.image_ref),
        }
    }
}

/// Raw widget values for a quick log. Conversion into an entry clamps the
/// numeric fields and drops blank optional text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickLogInput {
    pub posture: Posture,
    pub heart_rate: i64,
    pub blood_pressure: Option<String>,
    pub severity: i64,
    pub hydration_ml: Option<i64>,
    pub salt_intake_g: Option<i64>,
    pub what_helped: Option<String>,
}

impl Default for QuickLogInput {
    fn default() -> Self {
        Self {
            posture: Posture::Sitting,
            heart_rate: validation::DEFAULT_HEART_RATE,
            blood_pressure: None,
            severity: validation::DEFAULT_SEVERITY,
            hydration_ml: None,
            salt_intake_g: None,
            what_helped: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecklistInput {
    pub medications_taken: bool,
    pub water_goal_met: bool,
    pub compression_wear: bool,
    pub exercise_tolerance: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteInput {
    pub note: String,
    pub image_ref: Option<String>,
}

/// Field ranges applied when form input becomes an entry
pub mod validation {
    pub const MIN_HEART_RATE: i64 = 40;
    pub const MAX_HEART_RATE: i64 = 200;
    pub const DEFAULT_HEART_RATE: i64 = 70;

    pub const MIN_SEVERITY: i64 = 1;
    pub const MAX_SEVERITY: i64 = 10;
    pub const DEFAULT_SEVERITY: i64 = 5;

    pub const MAX_HYDRATION_ML: i64 = 5000;
    pub const MAX_SALT_INTAKE_G: i64 = 50;

    pub fn clamp_heart_rate(bpm: i64) -> u16 {
        bpm.clamp(MIN_HEART_RATE, MAX_HEART_RATE) as u16
    }

    pub fn clamp_severity(level: i64) -> u8 {
        level.clamp(MIN_SEVERITY, MAX_SEVERITY) as u8
    }

    pub fn clamp_hydration_ml(ml: i64) -> u32 {
        ml.clamp(0, MAX_HYDRATION_ML) as u32
    }

    pub fn clamp_salt_intake_g(grams: i64) -> u32 {
        grams.clamp(0, MAX_SALT_INTAKE_G) as u32
    }
}

fn normalize_text(value: Option<String>) -> Option<String> {
    value.and_then(|text| {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
