use serde::Serialize;

/// Label used when the backend omits a passage's provenance.
pub const UNKNOWN_SOURCE: &str = "unknown source";

/// One retrieved unit, rendered as a reference card.
///
/// Passages keep the rank order the backend returned them in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultPassage {
    /// Display label / provenance (never empty, see [`UNKNOWN_SOURCE`]).
    pub source: String,

    /// Primary body text.
    pub text: String,

    /// Optional enriched body, preferred over `text` for display.
    pub enriched_text: Option<String>,
}

impl ResultPassage {
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text: text.into(),
            enriched_text: None,
        }
    }

    pub fn with_enriched_text(mut self, enriched: impl Into<String>) -> Self {
        self.enriched_text = Some(enriched.into());
        self
    }

    /// Text to show: enriched text when present and non-empty, else `text`.
    pub fn display_text(&self) -> &str {
        match self.enriched_text.as_deref() {
            Some(enriched) if !enriched.is_empty() => enriched,
            _ => &self.text,
        }
    }
}
