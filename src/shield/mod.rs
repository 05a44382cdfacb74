//! Poison shield - text-level detection of data poisoning markers.
//!
//! A fixed table of regex indicators covering statistical manipulation,
//! emotional manipulation, and appeals to common knowledge, plus a
//! weighted risk score. Pure functions over the input text, no state.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// System prompt injected into the verification and scientific-validator
/// roles. See [`crate::agents`].
pub const POISON_SHIELD_PROMPT: &str = "\
DATA POISON SHIELD v2.0 - ACTIVE
=================================
DETECTION HEURISTICS:
1. STATISTICAL MANIPULATION - Flag unqualified absolute claims, p-hacking
2. FABRICATION MARKERS - Cross-check DOIs, URLs, author names
3. EMOTIONAL MANIPULATION - Flag fear/urgency/absolute language
4. LOGICAL FALLACY DETECTION - Circular reasoning, straw man, false dichotomy
5. SOURCE INTEGRITY - Verify org existence, domain age, consistency
6. CROSS-VALIDATION - Every claim must have 2+ independent sources

RESPONSE ON DETECTION:
- Flag with credibility < 30, document heuristic triggered
- Recommend re-verification. NEVER silently discard data.";

/// Category of a poison indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorType {
    /// Statistical manipulation markers.
    Statistical,
    /// Fabricated reference markers.
    Fabrication,
    /// Emotional or absolute language.
    Emotional,
    /// Logical fallacy markers.
    Logical,
    /// Source integrity issues.
    Source,
}

/// Severity of a poison indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Weighted 30 in the risk score.
    High,
    /// Weighted 15 in the risk score.
    Medium,
    /// Weighted 5 in the risk score.
    Low,
}

impl Severity {
    fn weight(self) -> u32 {
        match self {
            Severity::High => 30,
            Severity::Medium => 15,
            Severity::Low => 5,
        }
    }
}

/// Immutable indicator definition.
#[derive(Debug, Clone, Copy)]
pub struct PoisonIndicator {
    /// Regex pattern source.
    pub pattern: &'static str,
    /// Indicator category.
    pub indicator_type: IndicatorType,
    /// Indicator severity.
    pub severity: Severity,
    /// Human-readable description.
    pub description: &'static str,
}

/// The fixed indicator table.
pub static POISON_INDICATORS: [PoisonIndicator; 4] = [
    PoisonIndicator {
        pattern: r"\b(100%|0%)\s+(effective|accurate|guaranteed|proven)\b",
        indicator_type: IndicatorType::Statistical,
        severity: Severity::High,
        description: "Absolute statistical claim without qualification",
    },
    PoisonIndicator {
        pattern: r"p\s*[=<]\s*0\.0(5|49|50)\b",
        indicator_type: IndicatorType::Statistical,
        severity: Severity::Medium,
        description: "P-value suspiciously near significance threshold",
    },
    PoisonIndicator {
        pattern: r"\b(always|never|impossible|guaranteed|undeniable|unquestionable)\b",
        indicator_type: IndicatorType::Emotional,
        severity: Severity::Medium,
        description: "Absolute language discouraging critical examination",
    },
    PoisonIndicator {
        pattern: r"\b(everyone knows|it is obvious|clearly|undeniably)\b",
        indicator_type: IndicatorType::Emotional,
        severity: Severity::Low,
        description: "Appeal to common knowledge without evidence",
    },
];

// Compiled once, parallel to POISON_INDICATORS. Patterns are static and
// known-valid; a failure here is a programming error.
static COMPILED: Lazy<Vec<Regex>> = Lazy::new(|| {
    POISON_INDICATORS
        .iter()
        .map(|ind| {
            Regex::new(&format!("(?i){}", ind.pattern))
                .unwrap_or_else(|e| panic!("invalid poison indicator pattern {:?}: {}", ind.pattern, e))
        })
        .collect()
});

/// One indicator match found in scanned text.
#[derive(Debug, Clone, Serialize)]
pub struct PoisonScanResult {
    /// Category of the matched indicator.
    pub indicator_type: IndicatorType,
    /// Severity of the matched indicator.
    pub severity: Severity,
    /// Description of the matched indicator.
    pub description: &'static str,
    /// The matched text.
    pub match_text: String,
    /// Byte offset of the match.
    pub position: usize,
}

/// Scan text for known poison indicators.
///
/// Pure function; whitespace-only input yields no matches.
pub fn scan_for_poison(text: &str) -> Vec<PoisonScanResult> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    for (regex, indicator) in COMPILED.iter().zip(POISON_INDICATORS.iter()) {
        for m in regex.find_iter(text) {
            results.push(PoisonScanResult {
                indicator_type: indicator.indicator_type,
                severity: indicator.severity,
                description: indicator.description,
                match_text: m.as_str().to_string(),
                position: m.start(),
            });
        }
    }
    results
}

/// Risk score 0 (clean) to 100 (poisoned).
///
/// Weighted: high=30, medium=15, low=5. Capped at 100.
pub fn calculate_poison_risk(results: &[PoisonScanResult]) -> u8 {
    let raw: u32 = results.iter().map(|r| r.severity.weight()).sum();
    raw.min(100) as u8
}
