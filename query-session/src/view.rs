//! Pure view-model derivations over a [`SessionSnapshot`].
//!
//! These hold no state; a presentation layer calls them on every redraw.

use std::fmt;

use serde::Serialize;

use crate::models::{MAX_STARS, RequestStatus, ResultPassage, SessionSnapshot};

/// Maximum characters of passage text shown on a reference card.
pub const CARD_TITLE_MAX_CHARS: usize = 80;

/// Answer bubble shown under the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnswerBubble {
    Searching,
    Found(usize),
    NoMatches,
}

impl fmt::Display for AnswerBubble {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerBubble::Searching => f.write_str("Searching…"),
            AnswerBubble::Found(1) => f.write_str("1 result found."),
            AnswerBubble::Found(n) => write!(f, "{n} results found."),
            AnswerBubble::NoMatches => {
                f.write_str("No matching results. Try a more specific question.")
            }
        }
    }
}

/// Answer bubble for the snapshot, if any.
///
/// `Failed` shows no bubble; [`error_line`] carries the failure instead.
pub fn answer_bubble(s: &SessionSnapshot) -> Option<AnswerBubble> {
    match s.status {
        RequestStatus::Idle | RequestStatus::Failed => None,
        RequestStatus::Pending => Some(AnswerBubble::Searching),
        RequestStatus::Success if s.results.is_empty() => Some(AnswerBubble::NoMatches),
        RequestStatus::Success => Some(AnswerBubble::Found(s.results.len())),
    }
}

/// Inline error message while the session is `Failed`.
pub fn error_line(s: &SessionSnapshot) -> Option<&str> {
    match s.status {
        RequestStatus::Failed => s.error.as_deref(),
        _ => None,
    }
}

/// One reference card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceCard {
    pub label: String,
    pub title: String,
}

impl From<&ResultPassage> for ReferenceCard {
    fn from(p: &ResultPassage) -> Self {
        Self {
            label: p.source.clone(),
            title: truncate_chars(p.display_text(), CARD_TITLE_MAX_CHARS),
        }
    }
}

/// Reference cards in backend rank order.
pub fn reference_cards(s: &SessionSnapshot) -> Vec<ReferenceCard> {
    s.results.iter().map(ReferenceCard::from).collect()
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

/// Fill state of one star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StarFill {
    Full,
    Half,
    Empty,
}

/// Fill states for the five stars, rounding the rating to the nearest half.
pub fn star_fills(rating: f32) -> [StarFill; MAX_STARS as usize] {
    let rounded = (rating * 2.0).round() / 2.0;
    std::array::from_fn(|idx| {
        let star = (idx + 1) as f32;
        if rounded >= star {
            StarFill::Full
        } else if rounded + 0.5 == star {
            StarFill::Half
        } else {
            StarFill::Empty
        }
    })
}

/// Numeric label next to the stars (`"4.5"`).
pub fn rating_label(rating: f32) -> String {
    format!("{rating:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(status: RequestStatus, n: usize) -> SessionSnapshot {
        SessionSnapshot {
            status,
            query: Some("중요관리점 설정 방법".into()),
            results: (0..n)
                .map(|i| ResultPassage::new(format!("src-{i}"), "t"))
                .collect(),
            error: (status == RequestStatus::Failed).then(|| "HTTP 502".to_string()),
            ..SessionSnapshot::default()
        }
    }

    #[test]
    fn bubble_follows_status() {
        assert_eq!(answer_bubble(&snapshot(RequestStatus::Idle, 0)), None);
        assert_eq!(
            answer_bubble(&snapshot(RequestStatus::Pending, 0)),
            Some(AnswerBubble::Searching)
        );
        assert_eq!(
            answer_bubble(&snapshot(RequestStatus::Success, 0)),
            Some(AnswerBubble::NoMatches)
        );
        assert_eq!(answer_bubble(&snapshot(RequestStatus::Failed, 0)), None);
    }

    #[test]
    fn found_bubble_counts_results() {
        let bubble = answer_bubble(&snapshot(RequestStatus::Success, 2)).unwrap();
        assert_eq!(bubble, AnswerBubble::Found(2));
        assert_eq!(bubble.to_string(), "2 results found.");
        assert_eq!(AnswerBubble::Found(1).to_string(), "1 result found.");
    }

    #[test]
    fn error_line_only_when_failed() {
        assert_eq!(error_line(&snapshot(RequestStatus::Failed, 0)), Some("HTTP 502"));
        assert_eq!(error_line(&snapshot(RequestStatus::Success, 1)), None);
    }

    #[test]
    fn card_prefers_enriched_text_and_truncates() {
        let long = "가".repeat(100);
        let p = ResultPassage::new("식품위생법 §48", "short").with_enriched_text(long);
        let card = ReferenceCard::from(&p);
        assert_eq!(card.label, "식품위생법 §48");
        assert_eq!(card.title.chars().count(), CARD_TITLE_MAX_CHARS + 1);
        assert!(card.title.ends_with('…'));
    }

    #[test]
    fn short_text_is_not_truncated() {
        let p = ResultPassage::new("A", "x".repeat(CARD_TITLE_MAX_CHARS));
        assert_eq!(ReferenceCard::from(&p).title, "x".repeat(CARD_TITLE_MAX_CHARS));
    }

    #[test]
    fn default_rating_shows_half_star() {
        use StarFill::*;
        assert_eq!(star_fills(4.5), [Full, Full, Full, Full, Half]);
        assert_eq!(star_fills(3.0), [Full, Full, Full, Empty, Empty]);
        assert_eq!(star_fills(0.0), [Empty; 5]);
        assert_eq!(rating_label(4.5), "4.5");
        assert_eq!(rating_label(5.0), "5.0");
    }
}
