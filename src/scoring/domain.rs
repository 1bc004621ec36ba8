//! Domain heuristics
//!
//! Each [`Domain`] carries a small cue-word list. A sentence "hits" when any
//! cue occurs as a substring of its lowercased text, so `"studying"` counts
//! as a hit for `"study"`.

use crate::types::Domain;

pub const ACADEMIC_CUES: &[&str] = &[
    "research",
    "study",
    "analysis",
    "results",
    "conclusion",
    "findings",
    "methodology",
    "hypothesis",
    "data",
    "significant",
];

pub const LEGAL_CUES: &[&str] = &[
    "shall",
    "hereby",
    "pursuant",
    "agreement",
    "party",
    "rights",
    "contract",
    "liability",
    "obligation",
    "terms",
];

/// Reporting verbs typical of news copy
pub const JOURNALISTIC_CUES: &[&str] = &["said", "according", "reported", "announced", "stated"];

/// Boost for an academic or legal cue hit
const CUE_BOOST: f64 = 1.3;
/// Boost for the lead of a news article
const LEAD_BOOST: f64 = 1.4;
/// Sentences counted as the lead
const LEAD_SENTENCES: usize = 3;
const REPORTING_BOOST: f64 = 1.1;

/// Cue words for a domain (empty for [`Domain::General`])
pub fn cues(domain: Domain) -> &'static [&'static str] {
    match domain {
        Domain::General => &[],
        Domain::Academic => ACADEMIC_CUES,
        Domain::Legal => LEGAL_CUES,
        Domain::Journalistic => JOURNALISTIC_CUES,
    }
}

/// Whether any cue occurs in the lowercased sentence
fn has_cue(lowered: &str, cues: &[&str]) -> bool {
    cues.iter().any(|cue| lowered.contains(cue))
}

/// Multiplier a domain applies to the sentence at `index`.
pub fn domain_multiplier(domain: Domain, index: usize, text: &str) -> f64 {
    let lowered = text.to_lowercase();
    match domain {
        Domain::General => 1.0,
        Domain::Academic | Domain::Legal => {
            if has_cue(&lowered, cues(domain)) {
                CUE_BOOST
            } else {
                1.0
            }
        }
        Domain::Journalistic => {
            let mut m = 1.0;
            if index < LEAD_SENTENCES {
                m *= LEAD_BOOST;
            }
            if has_cue(&lowered, JOURNALISTIC_CUES) {
                m *= REPORTING_BOOST;
            }
            m
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_is_neutral() {
        assert_eq!(domain_multiplier(Domain::General, 0, "The study shall be reported."), 1.0);
    }

    #[test]
    fn test_academic_substring_hit() {
        assert_eq!(domain_multiplier(Domain::Academic, 7, "We are STUDYING the outcome."), 1.3);
        assert_eq!(domain_multiplier(Domain::Academic, 7, "Nothing relevant here."), 1.0);
    }

    #[test]
    fn test_legal_hit() {
        assert_eq!(domain_multiplier(Domain::Legal, 4, "Each party keeps its rights."), 1.3);
    }

    #[test]
    fn test_journalistic_lead_and_reporting() {
        let lead = domain_multiplier(Domain::Journalistic, 0, "The mayor said the bridge opens today.");
        assert!((lead - 1.4 * 1.1).abs() < 1e-12);

        let lead_only = domain_multiplier(Domain::Journalistic, 2, "The bridge opens today.");
        assert!((lead_only - 1.4).abs() < 1e-12);

        let body = domain_multiplier(Domain::Journalistic, 9, "Officials announced a delay.");
        assert!((body - 1.1).abs() < 1e-12);
    }
}
