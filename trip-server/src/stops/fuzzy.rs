//! Spelling correction for place names.
//!
//! Offers a known place when the user's text is a near miss, e.g.
//! "hølden" for "halden". Only consulted after a literal stop lookup
//! found nothing.

/// Places on the line the timetable covers.
pub const DEFAULT_KNOWN_PLACES: &[&str] = &["halden", "fredrikstad", "moss"];

/// Largest edit distance still accepted as a correction.
pub const MAX_EDIT_DISTANCE: usize = 3;

/// Matches free text against a small vocabulary by edit distance.
#[derive(Debug, Clone)]
pub struct FuzzyPlaceMatcher {
    vocabulary: Vec<String>,
}

impl Default for FuzzyPlaceMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_KNOWN_PLACES.iter().copied())
    }
}

impl FuzzyPlaceMatcher {
    /// Create a matcher over the given place names.
    pub fn new<S: AsRef<str>>(places: impl IntoIterator<Item = S>) -> Self {
        Self {
            vocabulary: places
                .into_iter()
                .map(|p| p.as_ref().trim().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// The closest known place to `text`, if close enough.
    ///
    /// Blank input never matches. On equal distance the place listed
    /// first wins.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_server::stops::FuzzyPlaceMatcher;
    ///
    /// let matcher = FuzzyPlaceMatcher::default();
    /// assert_eq!(matcher.guess("Frdrikstad"), Some("fredrikstad"));
    /// assert_eq!(matcher.guess("måsss"), Some("moss"));
    /// assert_eq!(matcher.guess("Trondheim"), None);
    /// ```
    pub fn guess(&self, text: &str) -> Option<&str> {
        let input = text.trim().to_lowercase();
        if input.is_empty() {
            return None;
        }

        let mut best: Option<(&str, usize)> = None;
        for place in &self.vocabulary {
            let distance = levenshtein(&input, place);
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((place.as_str(), distance));
            }
        }

        best.filter(|(_, d)| *d <= MAX_EDIT_DISTANCE)
            .map(|(place, _)| place)
    }
}

/// Edit distance with unit-cost insertions, deletions and substitutions.
///
/// Works on `char`s, so "ø" counts as one character.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("moss", "moss"), 0);
    }

    #[test]
    fn levenshtein_counts_chars_not_bytes() {
        assert_eq!(levenshtein("hølden", "halden"), 1);
        assert_eq!(levenshtein("hæøden", "halden"), 2);
    }

    #[test]
    fn guesses_near_misses() {
        let m = FuzzyPlaceMatcher::default();
        assert_eq!(m.guess("hølden"), Some("halden"));
        assert_eq!(m.guess("  HALDEN "), Some("halden"));
        assert_eq!(m.guess("frdrikstad"), Some("fredrikstad"));
    }

    #[test]
    fn rejects_far_input() {
        let m = FuzzyPlaceMatcher::default();
        assert_eq!(m.guess("oslo sentralstasjon"), None);
        assert_eq!(m.guess(""), None);
        assert_eq!(m.guess("   "), None);
    }

    #[test]
    fn threshold_is_inclusive() {
        let m = FuzzyPlaceMatcher::new(["abcdef"]);
        assert_eq!(m.guess("abcxyz"), Some("abcdef"));
        assert_eq!(m.guess("abwxyz"), None);
    }

    #[test]
    fn ties_prefer_first_listed() {
        let m = FuzzyPlaceMatcher::new(["ab", "ac"]);
        assert_eq!(m.guess("aa"), Some("ab"));
    }

    #[test]
    fn custom_vocabulary() {
        let m = FuzzyPlaceMatcher::new(["Sarpsborg", " "]);
        assert_eq!(m.vocabulary(), &["sarpsborg".to_string()]);
        assert_eq!(m.guess("sarpsborgg"), Some("sarpsborg"));
        assert_eq!(m.guess("sarps"), None);
        assert_eq!(m.guess("halden"), None);
    }
}
