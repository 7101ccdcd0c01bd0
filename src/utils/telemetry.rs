//! Telemetry Module
//!
//! Aggregate counters over every assessment served by the CLI or the API:
//! verdict labels, categories, fired reasons, flagged value, latency.
//!
//! Privacy-first: events keep the category and score, never addresses.

use alloy_primitives::U256;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;
use tracing::warn;

use crate::core::assessment::Assessment;
use crate::utils::constants::wei_to_eth;

/// Recordable (HIGH or CRITICAL) assessment, anonymized
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TelemetryEvent {
    /// Unix timestamp
    pub timestamp: i64,
    /// Category tag
    pub category: String,
    /// Effective persona tier
    pub tier: String,
    /// Net scorer risk, when a signal was scored
    pub risk: Option<u32>,
    /// Native value in ETH (rounded to hide exact amounts)
    pub value_eth: f64,
    pub latency_us: u64,
}

impl TelemetryEvent {
    pub fn from_assessment(assessment: &Assessment, value_wei: U256, latency_us: u64) -> Self {
        // Round value to nearest 0.1 ETH for privacy
        let rounded_value = (wei_to_eth(value_wei) * 10.0).round() / 10.0;

        Self {
            timestamp: current_timestamp(),
            category: assessment.descriptor.category.tag().to_string(),
            tier: assessment.persona.tier.as_str().to_string(),
            risk: assessment.verdict.as_ref().map(|v| v.risk),
            value_eth: rounded_value,
            latency_us,
        }
    }
}

/// Aggregated statistics for reporting
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TelemetryStats {
    /// Total assessments served
    pub total_assessed: u64,
    /// Verdicts labeled BAD
    pub total_bad: u64,
    /// Assessments flagged for the external ledger
    pub total_recorded: u64,
    pub by_category: HashMap<String, u64>,
    pub by_reason: HashMap<String, u64>,
    /// Native value carried by recorded explorer transactions (ETH)
    pub flagged_value_eth: f64,
    pub avg_latency_us: f64,
    pub period_start: i64,
    pub period_end: i64,
}

impl TelemetryStats {
    /// Export as JSON for API
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Share of assessments labeled BAD, in percent
    pub fn bad_rate_pct(&self) -> f64 {
        if self.total_assessed == 0 {
            0.0
        } else {
            self.total_bad as f64 * 100.0 / self.total_assessed as f64
        }
    }
}

/// Main telemetry collector
pub struct TelemetryCollector {
    /// Recordable events awaiting flush
    events: RwLock<Vec<TelemetryEvent>>,
    total_assessed: AtomicU64,
    total_bad: AtomicU64,
    total_recorded: AtomicU64,
    total_latency_us: AtomicU64,
    flagged_value_wei: RwLock<U256>,
    category_counts: RwLock<HashMap<String, u64>>,
    reason_counts: RwLock<HashMap<String, u64>>,
    session_start: i64,
    export_dir: PathBuf,
    /// Max events in memory before flush
    max_buffer_size: usize,
}

impl TelemetryCollector {
    /// Collector that exports into `export_dir`
    pub fn with_config(export_dir: PathBuf, max_buffer_size: usize) -> Self {
        Self {
            events: RwLock::new(Vec::with_capacity(max_buffer_size)),
            total_assessed: AtomicU64::new(0),
            total_bad: AtomicU64::new(0),
            total_recorded: AtomicU64::new(0),
            total_latency_us: AtomicU64::new(0),
            flagged_value_wei: RwLock::new(U256::ZERO),
            category_counts: RwLock::new(HashMap::new()),
            reason_counts: RwLock::new(HashMap::new()),
            session_start: current_timestamp(),
            export_dir,
            max_buffer_size: max_buffer_size.max(1),
        }
    }

    /// Count one assessment; `value_wei` is the explorer value, zero otherwise
    pub fn record(&self, assessment: &Assessment, value_wei: U256, latency_us: u64) {
        self.total_assessed.fetch_add(1, Ordering::Relaxed);
        self.total_latency_us.fetch_add(latency_us, Ordering::Relaxed);

        if let Some(verdict) = &assessment.verdict {
            if verdict.is_bad() {
                self.total_bad.fetch_add(1, Ordering::Relaxed);
            }
            if let Ok(mut counts) = self.reason_counts.write() {
                for reason in &verdict.reasons {
                    *counts.entry(reason.clone()).or_insert(0) += 1;
                }
            }
        }

        if let Ok(mut counts) = self.category_counts.write() {
            *counts
                .entry(assessment.descriptor.category.tag().to_string())
                .or_insert(0) += 1;
        }

        if !assessment.should_record {
            return;
        }

        self.total_recorded.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut value) = self.flagged_value_wei.write() {
            *value = value.saturating_add(value_wei);
        }

        let event = TelemetryEvent::from_assessment(assessment, value_wei, latency_us);
        let to_flush = match self.events.write() {
            Ok(mut events) => {
                events.push(event);
                if events.len() >= self.max_buffer_size {
                    Some(std::mem::take(&mut *events))
                } else {
                    None
                }
            }
            Err(_) => {
                warn!(category = %event.category, "telemetry event buffer poisoned, event dropped");
                None
            }
        };

        // Lock released before I/O
        if let Some(events) = to_flush {
            if let Err(e) = self.flush_events(&events) {
                warn!(error = %e, dropped = events.len(), "telemetry flush failed");
            }
        }
    }

    /// Get current statistics
    pub fn get_stats(&self) -> TelemetryStats {
        let total_assessed = self.total_assessed.load(Ordering::Relaxed);
        let total_latency = self.total_latency_us.load(Ordering::Relaxed);

        let avg_latency_us = if total_assessed > 0 {
            total_latency as f64 / total_assessed as f64
        } else {
            0.0
        };

        TelemetryStats {
            total_assessed,
            total_bad: self.total_bad.load(Ordering::Relaxed),
            total_recorded: self.total_recorded.load(Ordering::Relaxed),
            by_category: self
                .category_counts
                .read()
                .map(|c| c.clone())
                .unwrap_or_default(),
            by_reason: self
                .reason_counts
                .read()
                .map(|c| c.clone())
                .unwrap_or_default(),
            flagged_value_eth: self
                .flagged_value_wei
                .read()
                .map(|v| wei_to_eth(*v))
                .unwrap_or(0.0),
            avg_latency_us,
            period_start: self.session_start,
            period_end: current_timestamp(),
        }
    }

    /// Number of recordable events not yet flushed
    pub fn pending_events(&self) -> usize {
        self.events.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Export current stats to JSON file
    pub fn export_stats_json(&self) -> Result<PathBuf, std::io::Error> {
        fs::create_dir_all(&self.export_dir)?;
        let stats = self.get_stats();
        let path = self
            .export_dir
            .join(format!("stats_{}.json", current_timestamp()));

        let json = serde_json::to_string_pretty(&stats)?;
        fs::write(&path, json)?;

        Ok(path)
    }

    /// Flush all buffered events to disk
    pub fn flush(&self) -> Result<(), std::io::Error> {
        let events = match self.events.write() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => return Ok(()),
        };
        self.flush_events(&events)
    }

    fn flush_events(&self, events: &[TelemetryEvent]) -> Result<(), std::io::Error> {
        if events.is_empty() {
            return Ok(());
        }

        fs::create_dir_all(&self.export_dir)?;
        let path = self.export_dir.join("recorded_events.jsonl");
        let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

        for event in events {
            writeln!(file, "{}", serde_json::to_string(event)?)?;
        }

        Ok(())
    }

    /// Reset counters (for new reporting period)
    pub fn reset(&self) {
        self.total_assessed.store(0, Ordering::Relaxed);
        self.total_bad.store(0, Ordering::Relaxed);
        self.total_recorded.store(0, Ordering::Relaxed);
        self.total_latency_us.store(0, Ordering::Relaxed);

        if let Ok(mut value) = self.flagged_value_wei.write() {
            *value = U256::ZERO;
        }
        if let Ok(mut counts) = self.category_counts.write() {
            counts.clear();
        }
        if let Ok(mut counts) = self.reason_counts.write() {
            counts.clear();
        }
        if let Ok(mut events) = self.events.write() {
            events.clear();
        }
    }
}

fn current_timestamp() -> i64 {
    Utc::now().timestamp()
}
