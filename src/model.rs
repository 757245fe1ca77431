//! Wire types exchanged with the classification service.
//!
//! Replies are parsed straight from the body text so the key order of the
//! `aspects` object survives; a generic JSON map would sort it.

use serde::de::{self, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Body of the POST sent to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisRequest {
    pub text: String,
}

impl AnalysisRequest {
    /// Builds a request from raw input, or `None` when nothing but
    /// whitespace was entered.
    pub fn from_input(raw: &str) -> Option<Self> {
        let text = raw.trim();
        if text.is_empty() {
            None
        } else {
            Some(Self {
                text: text.to_string(),
            })
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// `1` is positive; anything else, including a missing value, is negative.
    pub fn from_wire(value: &Value) -> Self {
        if value.as_f64() == Some(1.0) {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
        }
    }

    pub fn marker(self) -> &'static str {
        match self {
            Sentiment::Positive => "✓ Positive",
            Sentiment::Negative => "✗ Negative",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AspectFinding {
    pub sentence: String,
    pub pred: Sentiment,
    pub probability: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aspect {
    pub name: String,
    pub findings: Vec<AspectFinding>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    pub prediction: Sentiment,
    /// Overall confidence, when the model exposes one.
    pub probability: Option<f64>,
    /// Aspects in the order the service listed them.
    pub aspects: Vec<Aspect>,
    /// Findings dropped because they did not match the wire contract.
    pub skipped_findings: usize,
}

impl ClassificationResult {
    pub fn finding_count(&self) -> usize {
        self.aspects.iter().map(|aspect| aspect.findings.len()).sum()
    }
}

/// What the service answered, once the body parsed as JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceReply {
    Classified(ClassificationResult),
    Rejected { message: String },
}

const UNKNOWN_SERVICE_ERROR: &str = "unknown error";

/// Parses a response body. Fails only when the body is not a JSON object;
/// the error flag is honoured whatever the other fields hold, and malformed
/// findings are skipped instead.
pub fn parse_reply(body: &str) -> Result<ServiceReply, serde_json::Error> {
    let wire: ReplyWire = serde_json::from_str(body)?;

    if is_truthy(&wire.error) {
        let message = non_null_text(&wire.message)
            .or_else(|| non_null_text(&wire.exception_str))
            .unwrap_or_else(|| UNKNOWN_SERVICE_ERROR.to_string());
        return Ok(ServiceReply::Rejected { message });
    }

    let mut skipped_findings = 0;
    let aspects = wire
        .aspects
        .0
        .into_iter()
        .map(|(name, raw)| {
            let (findings, skipped) = parse_findings(&name, raw);
            skipped_findings += skipped;
            Aspect { name, findings }
        })
        .collect();

    Ok(ServiceReply::Classified(ClassificationResult {
        prediction: Sentiment::from_wire(&wire.prediction),
        probability: wire.probability.as_f64(),
        aspects,
        skipped_findings,
    }))
}

fn parse_findings(aspect: &str, raw: Value) -> (Vec<AspectFinding>, usize) {
    let Value::Array(items) = raw else {
        tracing::warn!(aspect, "aspect value is not a list; ignoring it");
        return (Vec::new(), 0);
    };

    let mut findings = Vec::with_capacity(items.len());
    let mut skipped = 0;
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<FindingWire>(item) {
            Ok(wire) => findings.push(AspectFinding {
                sentence: wire.sentence,
                pred: Sentiment::from_wire(&wire.pred),
                probability: wire.probability,
            }),
            Err(err) => {
                tracing::warn!(aspect, index, error = %err, "skipping malformed finding");
                skipped += 1;
            }
        }
    }
    (findings, skipped)
}

/// JavaScript truthiness.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn non_null_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Top-level reply fields, decoded loosely so an in-band error is never
/// masked by an oddly typed side field. A repeated key keeps its last value.
#[derive(Default)]
struct ReplyWire {
    error: Value,
    message: Value,
    exception_str: Value,
    prediction: Value,
    probability: Value,
    aspects: OrderedAspects,
}

impl<'de> Deserialize<'de> for ReplyWire {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ReplyVisitor;

        impl<'de> Visitor<'de> for ReplyVisitor {
            type Value = ReplyWire;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut reply = ReplyWire::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "error" => reply.error = map.next_value()?,
                        "message" => reply.message = map.next_value()?,
                        "exception_str" => reply.exception_str = map.next_value()?,
                        "prediction" => reply.prediction = map.next_value()?,
                        "probability" => reply.probability = map.next_value()?,
                        "aspects" => reply.aspects = map.next_value()?,
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(reply)
            }
        }

        deserializer.deserialize_map(ReplyVisitor)
    }
}

#[derive(Deserialize)]
struct FindingWire {
    sentence: String,
    #[serde(default)]
    pred: Value,
    #[serde(default)]
    probability: Option<f64>,
}

/// `aspects` object kept as a list of entries in document order. Anything
/// other than an object (null, a list, a scalar) reads as no aspects.
#[derive(Default)]
struct OrderedAspects(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for OrderedAspects {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = OrderedAspects;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an object mapping aspect names to findings")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries: Vec<(String, Value)> = Vec::new();
                while let Some((name, value)) = map.next_entry::<String, Value>()? {
                    // A repeated key keeps its first position and its last value.
                    match entries.iter_mut().find(|(existing, _)| *existing == name) {
                        Some(entry) => entry.1 = value,
                        None => entries.push((name, value)),
                    }
                }
                Ok(OrderedAspects(entries))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(OrderedAspects::default())
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(OrderedAspects::default())
            }

            fn visit_bool<E>(self, _value: bool) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(OrderedAspects::default())
            }

            fn visit_i64<E>(self, _value: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(OrderedAspects::default())
            }

            fn visit_u64<E>(self, _value: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(OrderedAspects::default())
            }

            fn visit_f64<E>(self, _value: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(OrderedAspects::default())
            }

            fn visit_str<E>(self, _value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(OrderedAspects::default())
            }
        }

        deserializer.deserialize_any(OrderedVisitor)
    }
}
