//! Relevance scorer
//!
//! Pure similarity scoring between two records from unrelated collections,
//! computed over their [`ExtractedAttributes`]. Every signal is optional:
//! a field missing on either side contributes nothing.
//!
//! Reasons describe the first argument, so `score(a, b)` and `score(b, a)`
//! carry the same total but may word their reasons differently.

use serde::{Deserialize, Serialize};

use crate::domain::records::ExtractedAttributes;

pub const LOCATION_EXACT: i32 = 30;
pub const LOCATION_PARTIAL: i32 = 15;
pub const YEAR_EXACT: i32 = 25;
pub const YEAR_WITHIN_2: i32 = 15;
pub const YEAR_WITHIN_5: i32 = 8;
pub const LAST_NAME: i32 = 35;
pub const FIRST_NAME: i32 = 20;
pub const FORMER_ENSLAVER: i32 = 30;
pub const STATE: i32 = 10;
pub const REGIMENT: i32 = 20;
pub const AGE_CONSISTENT: i32 = 40;

/// Aggregate score plus the human-readable signals behind it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relevance {
    pub score: i32,
    pub reasons: Vec<String>,
}

impl Relevance {
    fn add(&mut self, weight: i32, reason: String) {
        self.score += weight;
        self.reasons.push(reason);
    }

    pub fn is_empty(&self) -> bool {
        self.reasons.is_empty()
    }
}

fn normalized(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(|v| v.trim().to_lowercase())
        .filter(|v| !v.is_empty())
}

fn same_text(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((normalized(a), normalized(b)), (Some(a), Some(b)) if a == b)
}

/// Score how strongly `candidate` relates to `current`
pub fn score(candidate: &ExtractedAttributes, current: &ExtractedAttributes) -> Relevance {
    let mut relevance = Relevance::default();

    if candidate.id == current.id {
        return relevance;
    }

    if let (Some(ours), Some(theirs)) = (normalized(&candidate.location), normalized(&current.location)) {
        let shown = candidate.location.as_deref().unwrap_or_default().trim();
        if ours == theirs {
            relevance.add(LOCATION_EXACT, format!("Same location: {}", shown));
        } else if ours.contains(&theirs) || theirs.contains(&ours) {
            relevance.add(LOCATION_PARTIAL, format!("Similar location: {}", shown));
        }
    }

    if let (Some(ours), Some(theirs)) = (candidate.year, current.year) {
        match (i64::from(ours) - i64::from(theirs)).abs() {
            0 => relevance.add(YEAR_EXACT, format!("Same year: {}", ours)),
            1..=2 => relevance.add(YEAR_WITHIN_2, format!("Year within 2: {}", ours)),
            3..=5 => relevance.add(YEAR_WITHIN_5, format!("Year within 5: {}", ours)),
            _ => {}
        }
    }

    let exact_signals = [
        (&candidate.last_name, &current.last_name, LAST_NAME, "Same surname"),
        (&candidate.first_name, &current.first_name, FIRST_NAME, "Same first name"),
        (
            &candidate.former_enslaver,
            &current.former_enslaver,
            FORMER_ENSLAVER,
            "Same former enslaver",
        ),
        (&candidate.state, &current.state, STATE, "Same state"),
        (&candidate.regiment, &current.regiment, REGIMENT, "Same regiment"),
    ];
    for (ours, theirs, weight, label) in exact_signals {
        if same_text(ours, theirs) {
            let shown = ours.as_deref().unwrap_or_default().trim();
            relevance.add(weight, format!("{}: {}", label, shown));
        }
    }

    // A person aged between two records by roughly the years that passed
    if let (Some(age), Some(year), Some(other_age), Some(other_year)) =
        (candidate.age, candidate.year, current.age, current.year)
    {
        // Widened so extreme stored values cannot overflow
        let drift = (i64::from(age) - i64::from(other_age))
            - (i64::from(year) - i64::from(other_year));
        if drift.abs() <= 2 {
            relevance.add(AGE_CONSISTENT, format!("Consistent age: {} in {}", age, year));
        }
    }

    relevance
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(id: &str) -> ExtractedAttributes {
        ExtractedAttributes {
            id: Some(id.to_string()),
            ..Default::default()
        }
    }

    fn text(v: &str) -> Option<String> {
        Some(v.to_string())
    }

    #[test]
    fn test_surname_year_and_location_scenario() {
        let current = ExtractedAttributes {
            last_name: text("Johnson"),
            year: Some(1850),
            location: text("Camden"),
            ..attrs("cur")
        };
        let candidate = ExtractedAttributes {
            last_name: text("Johnson"),
            year: Some(1851),
            location: text("Camden County"),
            ..attrs("cand")
        };

        let relevance = score(&candidate, &current);
        assert!(relevance.score >= 65);
        assert_eq!(relevance.score, LAST_NAME + YEAR_WITHIN_2 + LOCATION_PARTIAL);
        assert!(relevance.reasons.contains(&"Same surname: Johnson".to_string()));
    }

    #[test]
    fn test_same_record_scores_nothing() {
        let a = ExtractedAttributes {
            last_name: text("Green"),
            location: text("Beaufort"),
            year: Some(1866),
            ..attrs("r1")
        };
        assert_eq!(score(&a, &a), Relevance::default());
        assert_eq!(score(&a, &a.clone()), Relevance::default());
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let a = ExtractedAttributes {
            first_name: text("Mary"),
            state: text("SC"),
            ..attrs("a")
        };
        let b = ExtractedAttributes {
            first_name: text("mary"),
            state: text("sc"),
            ..attrs("b")
        };
        let first = score(&a, &b);
        for _ in 0..5 {
            assert_eq!(score(&a, &b), first);
        }
        assert_eq!(first.score, FIRST_NAME + STATE);
    }

    #[test]
    fn test_reasons_quote_the_first_argument() {
        let a = ExtractedAttributes {
            last_name: text("JOHNSON"),
            location: text("Camden County"),
            year: Some(1850),
            ..attrs("a")
        };
        let b = ExtractedAttributes {
            last_name: text("Johnson"),
            location: text("Camden"),
            year: Some(1853),
            ..attrs("b")
        };

        let ab = score(&a, &b);
        let ba = score(&b, &a);

        assert_eq!(ab.score, ba.score);
        assert_ne!(ab.reasons, ba.reasons);
        assert!(ab.reasons.contains(&"Same surname: JOHNSON".to_string()));
        assert!(ab.reasons.contains(&"Similar location: Camden County".to_string()));
        assert!(ab.reasons.contains(&"Year within 5: 1850".to_string()));
        assert!(ba.reasons.contains(&"Same surname: Johnson".to_string()));
        assert!(ba.reasons.contains(&"Year within 5: 1853".to_string()));
    }

    #[test]
    fn test_missing_fields_do_not_penalize() {
        let a = ExtractedAttributes {
            former_enslaver: text("John Hart"),
            ..attrs("a")
        };
        let b = ExtractedAttributes {
            former_enslaver: text("john hart"),
            location: text("Camden"),
            regiment: text("54th Massachusetts"),
            ..attrs("b")
        };
        let relevance = score(&a, &b);
        assert_eq!(relevance.score, FORMER_ENSLAVER);
        assert_eq!(relevance.reasons, vec!["Same former enslaver: John Hart".to_string()]);
    }

    #[test]
    fn test_year_bands() {
        let base = ExtractedAttributes {
            year: Some(1860),
            ..attrs("a")
        };
        let at = |year| ExtractedAttributes {
            year: Some(year),
            ..attrs("b")
        };

        assert_eq!(score(&base, &at(1860)).score, YEAR_EXACT);
        assert_eq!(score(&base, &at(1858)).score, YEAR_WITHIN_2);
        assert_eq!(score(&base, &at(1865)).score, YEAR_WITHIN_5);
        assert_eq!(score(&base, &at(1866)).score, 0);
    }

    #[test]
    fn test_exact_location_beats_partial() {
        let a = ExtractedAttributes {
            location: text("Charleston"),
            ..attrs("a")
        };
        let b = ExtractedAttributes {
            location: text(" charleston "),
            ..attrs("b")
        };
        let relevance = score(&a, &b);
        assert_eq!(relevance.score, LOCATION_EXACT);
        assert_eq!(relevance.reasons, vec!["Same location: Charleston".to_string()]);
    }

    #[test]
    fn test_age_consistent_with_elapsed_years() {
        let census = ExtractedAttributes {
            age: Some(30),
            year: Some(1870),
            ..attrs("census")
        };
        let manifest = ExtractedAttributes {
            age: Some(11),
            year: Some(1850),
            ..attrs("manifest")
        };

        let relevance = score(&census, &manifest);
        assert!(relevance.reasons.contains(&"Consistent age: 30 in 1870".to_string()));
        assert_eq!(relevance.score, AGE_CONSISTENT);

        let older = ExtractedAttributes {
            age: Some(40),
            ..manifest.clone()
        };
        assert_eq!(score(&census, &older).score, 0);
    }

    #[test]
    fn test_extreme_years_and_ages_do_not_overflow() {
        let corrupt = ExtractedAttributes {
            year: Some(i32::MIN),
            age: Some(i32::MAX),
            ..attrs("corrupt")
        };
        let ordinary = ExtractedAttributes {
            year: Some(1850),
            age: Some(i32::MIN),
            ..attrs("ordinary")
        };

        assert!(score(&corrupt, &ordinary).is_empty());
        assert!(score(&ordinary, &corrupt).is_empty());

        let far_future = ExtractedAttributes {
            year: Some(i32::MAX),
            ..attrs("future")
        };
        assert!(score(&corrupt, &far_future).is_empty());
    }

    #[test]
    fn test_records_without_ids_compare_equal() {
        let a = ExtractedAttributes {
            last_name: text("Ball"),
            ..Default::default()
        };
        assert!(score(&a, &a.clone()).is_empty());
    }
}
