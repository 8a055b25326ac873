// ********* Input data structures ***********

use std::fmt::Display;

/// The accepted answers of the survey.
///
/// This is a closed vocabulary: any response that does not map to one of these
/// values through the [VariantMap] is dropped.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Answer {
    /// "dýl", the dialect form.
    Dyl,
    /// "později", the standard form.
    Pozdeji,
}

impl Answer {
    pub const ALL: [Answer; 2] = [Answer::Dyl, Answer::Pozdeji];

    /// The spelling used as a key in the output.
    pub fn label(&self) -> &'static str {
        match self {
            Answer::Dyl => "dýl",
            Answer::Pozdeji => "později",
        }
    }
}

impl Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ********* Configuration **********

/// The table of accepted spelling variants.
///
/// Keys are compared against the output of
/// [normalize_for_lookup](crate::normalize::normalize_for_lookup), so they
/// must be lower-cased and free of accents to ever match.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VariantMap {
    pub variants: &'static [(&'static str, Answer)],
}

impl VariantMap {
    pub const DEFAULT: VariantMap = VariantMap {
        variants: &[
            ("dyl", Answer::Dyl),
            ("pozdeji", Answer::Pozdeji),
        ],
    };

    /// Exact lookup of a normalized key. No fuzzy matching is attempted.
    pub fn classify(&self, key: &str) -> Option<Answer> {
        self.variants
            .iter()
            .find(|(variant, _)| *variant == key)
            .map(|(_, answer)| *answer)
    }

    /// All the answers that this table can produce, in table order.
    pub fn labels(&self) -> Vec<Answer> {
        let mut res: Vec<Answer> = Vec::new();
        for (_, answer) in self.variants.iter() {
            if !res.contains(answer) {
                res.push(*answer);
            }
        }
        res
    }
}

impl Default for VariantMap {
    fn default() -> Self {
        VariantMap::DEFAULT
    }
}

// ******** Output data structures *********

/// Statistics for one region.
///
/// `counts` and `percentages` list the answers in the order they were first
/// seen in the region.
#[derive(PartialEq, Debug, Clone)]
pub struct RegionSummary {
    pub total: u64,
    pub counts: Vec<(Answer, u64)>,
    /// Share of each answer in percent, rounded half-up to 2 decimals.
    pub percentages: Vec<(Answer, f64)>,
    pub dominant: Answer,
    pub dominant_share: f64,
}

impl RegionSummary {
    pub fn count(&self, answer: Answer) -> Option<u64> {
        self.counts
            .iter()
            .find(|(a, _)| *a == answer)
            .map(|(_, c)| *c)
    }

    pub fn percentage(&self, answer: Answer) -> Option<f64> {
        self.percentages
            .iter()
            .find(|(a, _)| *a == answer)
            .map(|(_, p)| *p)
    }
}
