use serde::{Deserialize, Serialize};

/// One record returned by the dictionary: a short form and its expansions.
///
/// Field names follow the Acromine wire format (`sf`, `lfs`).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Definition {
    #[serde(rename = "sf", default)]
    pub short_form: String,
    #[serde(rename = "lfs", default)]
    pub long_forms: Vec<LongForm>,
}

/// A single expansion of an acronym.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct LongForm {
    #[serde(rename = "lf")]
    pub text: String,
    /// Number of occurrences in the source corpus.
    #[serde(rename = "freq", default)]
    pub frequency: u32,
    /// Year the expansion first appeared.
    #[serde(default)]
    pub since: u32,
    #[serde(rename = "vars", default)]
    pub variations: Vec<Variation>,
}

impl LongForm {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }
}

/// A spelling variant of a long form (casing, hyphenation, plurals).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Variation {
    #[serde(rename = "lf")]
    pub text: String,
    #[serde(rename = "freq", default)]
    pub frequency: u32,
    #[serde(default)]
    pub since: u32,
}

/// Raw outcome of a completed HTTP exchange.
///
/// `body` is `None` when the service answered with nothing to decode.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResponse {
    pub status: u16,
    pub body: Option<Vec<Definition>>,
}

impl LookupResponse {
    pub fn ok(body: Vec<Definition>) -> Self {
        Self {
            status: 200,
            body: Some(body),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
