//! Parsing the AI reply into a health note and a specialist recommendation

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Specialist suggested when the reply names none
pub const DEFAULT_DOCTOR: &str = "General Physician";

/// Reason given alongside [`DEFAULT_DOCTOR`]
pub const DEFAULT_REASON: &str = "Initial consultation recommended.";

/// Health note shown when no AI provider answered
pub const UNAVAILABLE_NOTE: &str = "AI service unavailable.";

static MARKDOWN_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[*#`]").unwrap());
static INLINE_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());
static TRAILER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(doctor|reason)\s*:\s*(.*)$").unwrap());

/// Structured result of a symptom analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthAdvice {
    pub health: String,
    pub doctor: String,
    pub reason: String,
}

impl HealthAdvice {
    /// Fallback advice used when every provider failed
    pub fn unavailable() -> Self {
        Self {
            health: UNAVAILABLE_NOTE.to_string(),
            doctor: DEFAULT_DOCTOR.to_string(),
            reason: DEFAULT_REASON.to_string(),
        }
    }
}

/// Strip markdown emphasis and heading characters and squeeze inline whitespace.
///
/// Line structure is preserved; each line is trimmed.
pub fn clean_text(raw: &str) -> String {
    let stripped = MARKDOWN_CHARS.replace_all(raw, "");
    stripped
        .lines()
        .map(|line| INLINE_SPACE.replace_all(line, " ").trim().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split a free-text AI reply into the health note and the `Doctor:`/`Reason:` trailer.
pub fn parse_advice(raw: &str) -> HealthAdvice {
    let cleaned = clean_text(raw);

    let mut health: Vec<&str> = Vec::new();
    let mut doctor: Option<String> = None;
    let mut reason: Option<String> = None;

    for line in cleaned.lines() {
        if line.is_empty() {
            continue;
        }

        match TRAILER_LINE.captures(line) {
            Some(caps) => {
                let value = caps[2].trim().to_string();
                if caps[1].eq_ignore_ascii_case("doctor") {
                    doctor = Some(value);
                } else {
                    reason = Some(value);
                }
            }
            None => health.push(line),
        }
    }

    HealthAdvice {
        health: health.join(" "),
        doctor: doctor
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_DOCTOR.to_string()),
        reason: reason
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_REASON.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typical_reply() {
        let raw = "## Possible cause\n\
                   A **viral infection** is likely.\n\
                   \n\
                   Rest and drink fluids.\n\
                   See a doctor if fever lasts over 3 days.\n\
                   Doctor: General Physician\n\
                   Reason: To rule out bacterial infection.";

        let advice = parse_advice(raw);
        assert_eq!(
            advice.health,
            "Possible cause A viral infection is likely. Rest and drink fluids. \
             See a doctor if fever lasts over 3 days."
        );
        assert_eq!(advice.doctor, "General Physician");
        assert_eq!(advice.reason, "To rule out bacterial infection.");
    }

    #[test]
    fn test_trailer_is_case_insensitive_and_markdown_free() {
        let raw = "Skin irritation.\n**DOCTOR:** Dermatologist\n  reason :  persistent rash ";
        let advice = parse_advice(raw);
        assert_eq!(advice.health, "Skin irritation.");
        assert_eq!(advice.doctor, "Dermatologist");
        assert_eq!(advice.reason, "persistent rash");
    }

    #[test]
    fn test_last_trailer_line_wins() {
        let advice = parse_advice("x\nDoctor: ENT\nDoctor: Cardiologist\nReason: chest pain");
        assert_eq!(advice.doctor, "Cardiologist");
    }

    #[test]
    fn test_missing_trailer_uses_defaults() {
        let advice = parse_advice("Just rest.");
        assert_eq!(advice.health, "Just rest.");
        assert_eq!(advice.doctor, DEFAULT_DOCTOR);
        assert_eq!(advice.reason, DEFAULT_REASON);
    }

    #[test]
    fn test_empty_trailer_value_uses_default() {
        let advice = parse_advice("Hmm.\nDoctor:\nReason: ");
        assert_eq!(advice.doctor, DEFAULT_DOCTOR);
        assert_eq!(advice.reason, DEFAULT_REASON);
    }

    #[test]
    fn test_doctor_mentioned_mid_sentence_stays_in_note() {
        let advice = parse_advice("Visit a doctor: soon if worse.\nDoctor: Neurologist");
        assert_eq!(advice.health, "Visit a doctor: soon if worse.");
        assert_eq!(advice.doctor, "Neurologist");
    }

    #[test]
    fn test_clean_text_collapses_spaces() {
        assert_eq!(clean_text("  a \t  b  \n# c  "), "a b\nc");
        assert_eq!(clean_text("`code`"), "code");
    }

    #[test]
    fn test_unavailable_advice() {
        let advice = HealthAdvice::unavailable();
        assert_eq!(advice.health, "AI service unavailable.");
        assert_eq!(advice.doctor, "General Physician");
        assert_eq!(advice.reason, "Initial consultation recommended.");
    }
}
