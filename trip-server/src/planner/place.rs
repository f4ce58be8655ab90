//! Turning typed place text into candidate quays.

use tracing::info;

use crate::domain::QuayId;
use crate::stops::{FuzzyPlaceMatcher, StopIndex};

/// Outcome of resolving typed text to stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceResolution {
    /// The text that was finally looked up.
    pub term: String,
    /// Set when the literal text matched nothing and a known place was
    /// used instead.
    pub corrected_from: Option<String>,
    pub candidates: Vec<QuayId>,
}

impl PlaceResolution {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Look up `text`, falling back to a spelling correction.
///
/// Only when the literal lookup finds nothing is the matcher asked for a
/// known place close to the text. Blank text resolves to nothing.
pub fn resolve_place(index: &StopIndex, matcher: &FuzzyPlaceMatcher, text: &str) -> PlaceResolution {
    let term = text.trim();
    if term.is_empty() {
        return PlaceResolution {
            term: String::new(),
            corrected_from: None,
            candidates: Vec::new(),
        };
    }

    let candidates = index.lookup(term);
    if !candidates.is_empty() {
        return PlaceResolution {
            term: term.to_string(),
            corrected_from: None,
            candidates,
        };
    }

    match matcher.guess(term) {
        Some(guess) => {
            info!(input = term, guess, "corrected place name");
            PlaceResolution {
                term: guess.to_string(),
                corrected_from: Some(term.to_string()),
                candidates: index.lookup(guess),
            }
        }
        None => PlaceResolution {
            term: term.to_string(),
            corrected_from: None,
            candidates: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::StopRecord;

    fn index() -> StopIndex {
        StopIndex::new(&[
            StopRecord::new("NSR:Quay:1", "Halden"),
            StopRecord::new("NSR:Quay:2", "Halden"),
            StopRecord::new("NSR:Quay:3", "Moss stasjon"),
        ])
    }

    #[test]
    fn literal_match_needs_no_correction() {
        let r = resolve_place(&index(), &FuzzyPlaceMatcher::default(), " Halden ");
        assert_eq!(r.term, "Halden");
        assert_eq!(r.corrected_from, None);
        assert_eq!(r.candidates.len(), 2);
    }

    #[test]
    fn misspelling_is_corrected() {
        let r = resolve_place(&index(), &FuzzyPlaceMatcher::default(), "Hølden");
        assert_eq!(r.term, "halden");
        assert_eq!(r.corrected_from.as_deref(), Some("Hølden"));
        assert_eq!(r.candidates, vec![QuayId::new("NSR:Quay:1"), QuayId::new("NSR:Quay:2")]);
    }

    #[test]
    fn substring_match_beats_correction() {
        // "mos" is a substring of "moss stasjon", so no correction happens
        let r = resolve_place(&index(), &FuzzyPlaceMatcher::default(), "mos");
        assert_eq!(r.corrected_from, None);
        assert_eq!(r.candidates, vec![QuayId::new("NSR:Quay:3")]);
    }

    #[test]
    fn unknown_place_is_empty() {
        let r = resolve_place(&index(), &FuzzyPlaceMatcher::default(), "Bergen sentrum");
        assert!(r.is_empty());
        assert_eq!(r.corrected_from, None);
    }

    #[test]
    fn blank_text_is_empty() {
        let r = resolve_place(&index(), &FuzzyPlaceMatcher::default(), "   ");
        assert!(r.is_empty());
        assert_eq!(r.term, "");
    }
}
