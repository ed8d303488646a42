//! Fuzzy entity matching on company names.

use dossier_providers::SearchHit;

/// Minimum score a candidate must strictly exceed to count as the same company.
pub const MATCH_THRESHOLD: f64 = 75.0;

/// Anything that can be matched by name.
pub trait Candidate {
    /// Name compared against the wanted company name.
    fn candidate_name(&self) -> &str;
}

impl Candidate for SearchHit {
    fn candidate_name(&self) -> &str {
        &self.name
    }
}

impl Candidate for String {
    fn candidate_name(&self) -> &str {
        self
    }
}

impl Candidate for &str {
    fn candidate_name(&self) -> &str {
        self
    }
}

/// Similarity of two names on a 0 to 100 scale.
///
/// Both names are trimmed and lowercased, then compared by Levenshtein
/// distance over characters: `100 * (longest - distance) / longest`.
/// Two empty names are identical.
#[must_use]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();

    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 100.0;
    }

    let distance = strsim::levenshtein(&a, &b);
    percent(longest - distance, longest)
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: usize, whole: usize) -> f64 {
    (100 * part) as f64 / whole as f64
}

/// The best candidate together with its score, if it clears the threshold.
///
/// On equal scores the earlier candidate wins.
pub fn best_match_scored<'a, T: Candidate>(name: &str, candidates: &'a [T]) -> Option<(&'a T, f64)> {
    let mut best: Option<(&T, f64)> = None;

    for candidate in candidates {
        let score = similarity(name, candidate.candidate_name());
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((candidate, score));
        }
    }

    best.filter(|(_, score)| *score > MATCH_THRESHOLD)
}

/// The best-matching candidate for `name`, if any scores above [`MATCH_THRESHOLD`].
pub fn best_match<'a, T: Candidate>(name: &str, candidates: &'a [T]) -> Option<&'a T> {
    best_match_scored(name, candidates).map(|(candidate, _)| candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_constant() {
        const _: () = assert!(MATCH_THRESHOLD > 50.0);
        const _: () = assert!(MATCH_THRESHOLD < 100.0);
    }

    #[test]
    fn test_similarity_basics() {
        assert_eq!(similarity("", ""), 100.0);
        assert_eq!(similarity("Acme GmbH", "Acme GmbH"), 100.0);
        assert_eq!(similarity("  ACME gmbh ", "acme GmbH"), 100.0);
        assert_eq!(similarity("abc", ""), 0.0);
        assert_eq!(similarity("abcd", "wxyz"), 0.0);
    }

    #[test]
    fn test_similarity_counts_characters() {
        // One substitution in four characters, umlaut included
        assert_eq!(similarity("Müll", "Mull"), 75.0);
    }

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(similarity("abcd", "abcx"), 75.0);
        assert!(best_match("abcd", &["abcx"]).is_none());

        let wanted = "abcdefghijklmnopqrstuvwxy";
        let six_off = "abcdefghijklmnopqrs012345";
        assert_eq!(similarity(wanted, six_off), 76.0);
        assert_eq!(best_match(wanted, &[six_off]), Some(&six_off));
    }

    #[test]
    fn test_best_of_many() {
        let candidates = vec![
            "Musterfirma AG".to_string(),
            "Musterfirma GmbH".to_string(),
            "Beispiel GmbH".to_string(),
        ];
        let (found, score) =
            best_match_scored("Musterfirma GmbH", &candidates).expect("match above threshold");
        assert_eq!(found, "Musterfirma GmbH");
        assert_eq!(score, 100.0);
    }

    #[test]
    fn test_tie_keeps_first() {
        let candidates = ["Acme GmbX", "Acme GmbY"];
        assert_eq!(best_match("Acme GmbH", &candidates), Some(&"Acme GmbX"));
    }

    #[test]
    fn test_no_candidates() {
        let empty: [&str; 0] = [];
        assert!(best_match("Acme", &empty).is_none());
        assert!(best_match("", &empty).is_none());
    }

    #[test]
    fn test_search_hits_match_by_name() {
        let hits = vec![
            SearchHit {
                name: "Beispiel GmbH".to_string(),
                company_id: "DE-HRB-1-1".to_string(),
                ..SearchHit::default()
            },
            SearchHit {
                name: "Musterfirma GmbH".to_string(),
                company_id: "DE-HRB-2-2".to_string(),
                ..SearchHit::default()
            },
        ];
        let hit = best_match("musterfirma gmbh", &hits).expect("match");
        assert_eq!(hit.identifier(), "DE-HRB-2-2");
    }
}
