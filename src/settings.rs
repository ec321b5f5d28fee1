use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

use crate::models::{self, STOCK_SYMPTOMS, STOCK_TRIGGERS};

pub const DEFAULT_WATER_GOAL_ML: u32 = 2000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSettings {
    pub custom_symptoms: Vec<String>,
    pub custom_triggers: Vec<String>,
    pub water_goal_ml: u32,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            custom_symptoms: Vec::new(),
            custom_triggers: Vec::new(),
            water_goal_ml: DEFAULT_WATER_GOAL_ML,
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn settings(&self) -> UserSettings {
        self.data.read().unwrap().clone()
    }

    pub fn water_goal_ml(&self) -> u32 {
        self.data.read().unwrap().water_goal_ml
    }

    pub fn set_water_goal_ml(&self, goal_ml: u32) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            guard.water_goal_ml = goal_ml;
            self.persist(&guard)?;
        }
        Ok(())
    }

    /// Stock symptoms plus the user's remembered additions.
    pub fn symptom_catalog(&self) -> Vec<String> {
        models::symptom_catalog(&self.data.read().unwrap().custom_symptoms)
    }

    /// Stock triggers plus the user's remembered additions.
    pub fn trigger_catalog(&self) -> Vec<String> {
        models::trigger_catalog(&self.data.read().unwrap().custom_triggers)
    }

    /// Keeps a free-text symptom available in later sessions. Stock labels
    /// and duplicates are ignored.
    pub fn remember_symptom(&self, label: &str) -> Result<()> {
        let label = label.trim();
        if label.is_empty() || STOCK_SYMPTOMS.contains(&label) {
            return Ok(());
        }

        let mut guard = self.data.write().unwrap();
        if !guard.custom_symptoms.iter().any(|existing| existing == label) {
            guard.custom_symptoms.push(label.to_string());
            self.persist(&guard)?;
        }
        Ok(())
    }

    /// Keeps a free-text trigger available in later sessions. Stock labels
    /// and duplicates are ignored.
    pub fn remember_trigger(&self, label: &str) -> Result<()> {
        let label = label.trim();
        if label.is_empty() || STOCK_TRIGGERS.contains(&label) {
            return Ok(());
        }

        let mut guard = self.data.write().unwrap();
        if !guard.custom_triggers.iter().any(|existing| existing == label) {
            guard.custom_triggers.push(label.to_string());
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}
