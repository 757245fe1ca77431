//! Turns a classification result into the view shown in the result panel.

use crate::model::{ClassificationResult, Sentiment};
use std::fmt;
use std::time::Duration;

pub const NO_ASPECTS_TEXT: &str = "No specific aspects detected.";

const ASPECT_STAGGER: Duration = Duration::from_millis(100);
const FINDING_STAGGER: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq)]
pub struct SentimentBadge {
    pub sentiment: Sentiment,
    pub label: &'static str,
    pub confidence: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FindingEntry {
    pub aspect: String,
    pub quote: String,
    pub sentiment: Sentiment,
    pub marker: &'static str,
    pub confidence: Option<String>,
    /// (aspect index, finding index) in the flattened order.
    pub position: (usize, usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AspectEntry {
    Finding(FindingEntry),
    /// Full-width line used when no aspect was detected.
    Placeholder(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub badge: SentimentBadge,
    pub entries: Vec<AspectEntry>,
}

impl ResultView {
    pub fn findings(&self) -> impl Iterator<Item = &FindingEntry> {
        self.entries.iter().filter_map(|entry| match entry {
            AspectEntry::Finding(finding) => Some(finding),
            AspectEntry::Placeholder(_) => None,
        })
    }
}

/// Builds the view for a result. Deterministic: the same result always
/// yields the same entries in the same order.
pub fn render(result: &ClassificationResult) -> ResultView {
    let badge = SentimentBadge {
        sentiment: result.prediction,
        label: result.prediction.label(),
        confidence: result.probability.map(confidence_text),
    };

    let entries = if result.aspects.is_empty() {
        vec![AspectEntry::Placeholder(NO_ASPECTS_TEXT)]
    } else {
        result
            .aspects
            .iter()
            .enumerate()
            .flat_map(|(aspect_index, aspect)| {
                aspect
                    .findings
                    .iter()
                    .enumerate()
                    .map(move |(finding_index, finding)| {
                        AspectEntry::Finding(FindingEntry {
                            aspect: capitalize_first(&aspect.name),
                            quote: format!("\"{}\"", finding.sentence),
                            sentiment: finding.pred,
                            marker: finding.pred.marker(),
                            confidence: finding.probability.map(confidence_text),
                            position: (aspect_index, finding_index),
                        })
                    })
            })
            .collect()
    };

    ResultView { badge, entries }
}

/// "Confidence: 87%" for 0.873.
pub fn confidence_text(probability: f64) -> String {
    format!("Confidence: {}%", (probability * 100.0).round() as i64)
}

fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Delay before an entry appears in the entrance animation.
pub fn entrance_delay(entry: &AspectEntry) -> Duration {
    match entry {
        AspectEntry::Finding(finding) => {
            let (aspect, item) = finding.position;
            ASPECT_STAGGER * aspect as u32 + FINDING_STAGGER * item as u32
        }
        AspectEntry::Placeholder(_) => Duration::ZERO,
    }
}

/// Entries that should be visible `elapsed` after the panel was shown.
/// `None` disables the animation and yields every entry.
pub fn revealed(
    entries: &[AspectEntry],
    elapsed: Option<Duration>,
) -> impl Iterator<Item = &AspectEntry> {
    entries
        .iter()
        .filter(move |entry| elapsed.map_or(true, |elapsed| entrance_delay(entry) <= elapsed))
}

impl fmt::Display for ResultView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sentiment: {}", self.badge.label)?;
        if let Some(confidence) = &self.badge.confidence {
            write!(f, " ({})", confidence)?;
        }
        writeln!(f)?;

        for entry in &self.entries {
            writeln!(f)?;
            match entry {
                AspectEntry::Placeholder(text) => writeln!(f, "{}", text)?,
                AspectEntry::Finding(finding) => {
                    writeln!(f, "{}", finding.aspect)?;
                    writeln!(f, "  {}", finding.quote)?;
                    writeln!(f, "  {}", finding.marker)?;
                    if let Some(confidence) = &finding.confidence {
                        writeln!(f, "  {}", confidence)?;
                    }
                }
            }
        }
        Ok(())
    }
}
