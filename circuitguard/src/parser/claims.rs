//! Claim extraction from generated text.
//!
//! Each field has its own ordered list of patterns; the first pattern that
//! matches anywhere in the text wins. Fields are independent of each other
//! and of their position in the text. Extraction is lossy by design of the
//! input: anything a pattern does not recognise is simply left unset. A
//! match directly followed by "limit" is skipped.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Field vocabulary shared by the parser, the rule checker and the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClaimField {
    DesignCurrent,
    DeviceRating,
    CableSize,
    TabulatedCurrent,
    VoltageDrop,
    LoopImpedance,
}

impl ClaimField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimField::DesignCurrent => "designCurrent",
            ClaimField::DeviceRating => "deviceRating",
            ClaimField::CableSize => "cableSize",
            ClaimField::TabulatedCurrent => "tabulatedCurrent",
            ClaimField::VoltageDrop => "voltageDrop",
            ClaimField::LoopImpedance => "loopImpedance",
        }
    }
}

impl fmt::Display for ClaimField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numbers a generated description asserts about a circuit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractedClaim {
    /// Ib, amps
    pub design_current: Option<f64>,
    /// In, amps
    pub device_rating: Option<f64>,
    /// Live conductor, mm²
    pub cable_size: Option<f64>,
    pub voltage_drop_percent: Option<f64>,
    /// Iz, amps
    pub tabulated_current: Option<f64>,
}

impl ExtractedClaim {
    pub fn is_empty(&self) -> bool {
        self.design_current.is_none()
            && self.device_rating.is_none()
            && self.cable_size.is_none()
            && self.voltage_drop_percent.is_none()
            && self.tabulated_current.is_none()
    }

    pub fn get(&self, field: ClaimField) -> Option<f64> {
        match field {
            ClaimField::DesignCurrent => self.design_current,
            ClaimField::DeviceRating => self.device_rating,
            ClaimField::CableSize => self.cable_size,
            ClaimField::TabulatedCurrent => self.tabulated_current,
            ClaimField::VoltageDrop => self.voltage_drop_percent,
            ClaimField::LoopImpedance => None,
        }
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("claim pattern is valid"))
        .collect()
}

static DESIGN_CURRENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)design\s+current(?:\s*\(\s*ib\s*\))?\s*(?:(?:[:=≈~]|is|of|approximately|approx\.?|about|calculated\s+as)\s*)*(\d+(?:\.\d+)?)\s*a(?:mps?|mperes?)?\b",
        r"(?i)\bib\s*(?:(?:[:=≈~]|is|of|approximately|approx\.?|about)\s*)*(\d+(?:\.\d+)?)\s*a(?:mps?|mperes?)?\b",
    ])
});

static DEVICE_RATING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)(?:device|mcb|rcbo|breaker|protective\s+device|overcurrent\s+device)\s+rating(?:\s*\(\s*in\s*\))?\s*(?:(?:[:=≈~]|is|of|at)\s*)*(\d+(?:\.\d+)?)\s*a(?:mps?|mperes?)?\b",
        r"(?i)\bin\s*[:=]\s*(\d+(?:\.\d+)?)\s*a(?:mps?|mperes?)?\b",
        // "32A Type B MCB"
        r"(?i)(\d+(?:\.\d+)?)\s*a(?:mps?)?\s+(?:type\s+[bcd]\s+)?(?:mcb|rcbo|circuit[\s-]+breaker|breaker)\b",
        // "MCB rated at 32A"
        r"(?i)\b(?:mcb|rcbo)\b[^.\n\d]{0,30}?(\d+(?:\.\d+)?)\s*a(?:mps?|mperes?)?\b",
    ])
});

static CABLE_SIZE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)(?:cable|conductor)\s+size(?:\s*\([^)]*\))?\s*(?:(?:[:=≈~]|is|of)\s*)*(\d+(?:\.\d+)?)\s*mm",
        r"(?i)(\d+(?:\.\d+)?)\s*mm(?:²|2\b|\^2|\s*sq)",
    ])
});

static VOLTAGE_DROP_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)voltage\s+drop(?:\s*\(\s*vd\s*\))?\s*(?:(?:[:=≈~]|is|of|approximately|approx\.?|about)\s*)*(\d+(?:\.\d+)?)\s*%",
        r"(?i)\bvd\s*(?:(?:[:=≈~]|is|of)\s*)*(\d+(?:\.\d+)?)\s*%",
        r"(?i)(\d+(?:\.\d+)?)\s*%\s+(?:voltage\s+drop|vd)\b",
        // "voltage drop of 4.6V (2.0%)"
        r"(?i)voltage\s+drop[^%\n]{0,40}?(\d+(?:\.\d+)?)\s*%",
    ])
});

static TABULATED_CURRENT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile(&[
        r"(?i)(?:tabulated|current[\s-]carrying)\s+(?:current|capacity|rating)(?:\s*\(\s*iz\s*\))?\s*(?:(?:[:=≈~]|is|of|at)\s*)*(\d+(?:\.\d+)?)\s*a(?:mps?|mperes?)?\b",
        r"(?i)\biz\s*(?:(?:[:=≈~]|is|of)\s*)*(\d+(?:\.\d+)?)\s*a(?:mps?|mperes?)?\b",
    ])
});

fn first_number(patterns: &[Regex], text: &str) -> Option<f64> {
    patterns.iter().find_map(|re| {
        re.captures_iter(text)
            .filter(|caps| {
                let end = caps.get(0).map_or(text.len(), |m| m.end());
                !names_a_limit(&text[end..])
            })
            .find_map(|caps| {
                caps.get(1)
                    .and_then(|m| m.as_str().parse::<f64>().ok())
                    .filter(|value| value.is_finite())
            })
    })
}

/// "the 3% limit" quotes a regulation, not a property of the circuit.
fn names_a_limit(rest: &str) -> bool {
    rest.trim_start()
        .get(..5)
        .is_some_and(|word| word.eq_ignore_ascii_case("limit"))
}

/// Extract whatever numeric claims the text makes.
pub fn extract_claims(text: &str) -> ExtractedClaim {
    ExtractedClaim {
        design_current: first_number(&DESIGN_CURRENT_PATTERNS, text),
        device_rating: first_number(&DEVICE_RATING_PATTERNS, text),
        cable_size: first_number(&CABLE_SIZE_PATTERNS, text),
        voltage_drop_percent: first_number(&VOLTAGE_DROP_PATTERNS, text),
        tabulated_current: first_number(&TABULATED_CURRENT_PATTERNS, text),
    }
}
