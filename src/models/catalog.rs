//! Stock symptom and trigger vocabularies.
//!
//! The form offers these labels out of the box; user-defined labels from
//! the settings file are merged in behind them.

pub const STOCK_SYMPTOMS: &[&str] = &[
    "Dizziness",
    "Heart Palpitations",
    "Fatigue",
    "Nausea",
    "Brain Fog",
    "Headache",
    "Sweating",
    "Tremors",
];

pub const STOCK_TRIGGERS: &[&str] = &[
    "Standing long",
    "Heat",
    "Stress",
    "Lack of sleep",
    "Dehydration",
    "Salt restriction",
];

/// Stock symptoms followed by the custom labels not already present.
pub fn symptom_catalog(custom: &[String]) -> Vec<String> {
    merge_catalog(STOCK_SYMPTOMS, custom)
}

/// Stock triggers followed by the custom labels not already present.
pub fn trigger_catalog(custom: &[String]) -> Vec<String> {
    merge_catalog(STOCK_TRIGGERS, custom)
}

fn merge_catalog(stock: &[&str], custom: &[String]) -> Vec<String> {
    let mut catalog: Vec<String> = stock.iter().map(|label| label.to_string()).collect();
    for label in custom {
        if !catalog.iter().any(|existing| existing == label) {
            catalog.push(label.clone());
        }
    }
    catalog
}
