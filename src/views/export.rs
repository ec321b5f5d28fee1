//! Plain-text export for doctor visits.

use std::fmt;

use chrono::NaiveDate;
use log::warn;
use serde::Serialize;

use crate::models::LogEntry;

/// Signal that an export range matched no entries. Reported on the
/// document, never raised as an error.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EmptyRangeWarning {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for EmptyRangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "no entries logged between {} and {}",
            self.start, self.end
        )
    }
}

/// One exported entry: a title line and a flat dump of its fields.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExportPage {
    pub title: String,
    pub lines: Vec<String>,
}

impl fmt::Display for ExportPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExportDocument {
    pub pages: Vec<ExportPage>,
    pub warning: Option<EmptyRangeWarning>,
}

/// Renders one page per entry dated within `[start, end]`, inclusive.
///
/// No aggregation across entries. A range with no matches yields an empty
/// page list plus the warning so the UI can show its empty state.
pub fn export_range(entries: &[LogEntry], start: NaiveDate, end: NaiveDate) -> ExportDocument {
    let pages: Vec<ExportPage> = entries
        .iter()
        .filter(|entry| entry.logged_between(start, end))
        .map(render_page)
        .collect();

    let warning = if pages.is_empty() {
        let warning = EmptyRangeWarning { start, end };
        warn!("{}", warning);
        Some(warning)
    } else {
        None
    };

    ExportDocument { pages, warning }
}

fn render_page(entry: &LogEntry) -> ExportPage {
    let stamp = entry.timestamp().format("%Y-%m-%d %H:%M");

    match entry {
        LogEntry::QuickLog(quick) => {
            let mut lines = vec![
                format!("Posture: {}", quick.posture.as_str()),
                format!("Heart rate: {} bpm", quick.heart_rate),
                format!("Severity: {}/10", quick.severity),
            ];
            if let Some(blood_pressure) = &quick.blood_pressure {
                lines.push(format!("Blood pressure: {}", blood_pressure));
            }
            if let Some(ml) = quick.hydration_ml {
                lines.push(format!("Hydration: {} ml", ml));
            }
            if let Some(grams) = quick.salt_intake_g {
                lines.push(format!("Salt intake: {} g", grams));
            }
            if !quick.symptoms.is_empty() {
                lines.push(format!("Symptoms: {}", quick.symptoms.join(", ")));
            }
            if !quick.triggers.is_empty() {
                lines.push(format!("Triggers: {}", quick.triggers.join(", ")));
            }
            if let Some(helped) = &quick.what_helped {
                lines.push(format!("What helped: {}", helped));
            }

            ExportPage {
                title: format!("Quick log {}", stamp),
                lines,
            }
        }
        LogEntry::Checklist(checklist) => ExportPage {
            title: format!("Daily checklist {}", stamp),
            lines: vec![
                format!("Medications taken: {}", yes_no(checklist.medications_taken)),
                format!("Water goal met: {}", yes_no(checklist.water_goal_met)),
                format!("Compression wear: {}", yes_no(checklist.compression_wear)),
                format!(
                    "Exercise tolerance: {}",
                    yes_no(checklist.exercise_tolerance)
                ),
            ],
        },
        LogEntry::Note(note) => {
            let mut lines = Vec::new();
            if !note.note.is_empty() {
                lines.push(note.note.clone());
            }
            if let Some(image_ref) = &note.image_ref {
                lines.push(format!("Attachment: {}", image_ref));
            }

            ExportPage {
                title: format!("Note {}", stamp),
                lines,
            }
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
