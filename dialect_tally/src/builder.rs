use std::collections::BTreeMap;

use log::debug;

pub use crate::config::*;
use crate::normalize::{normalize, normalize_for_lookup};
use crate::{summarize, Summary, Tally, VoteCount};

/// What happened to a record handed to the builder.
///
/// None of these cases is an error: anything but `Counted` means that the
/// record was silently dropped.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum RecordOutcome {
    Counted(Answer),
    /// Fewer than two fields.
    TooShort,
    /// The answer does not match any known variant.
    Unclassified,
    /// The region is blank after normalization.
    EmptyRegion,
}

/// Accumulates the responses of the survey, region by region.
///
/// ```
/// use dialect_tally::builder::Builder;
/// use dialect_tally::{Answer, VariantMap};
///
/// let mut builder = Builder::new(&VariantMap::DEFAULT);
/// builder.add_response("Dýl", "Praha");
/// builder.add_response("pozdeji", "Praha");
/// builder.add_response("dyl", "Praha");
///
/// let summary = builder.finish();
/// assert_eq!(summary["Praha"].total, 3);
/// assert_eq!(summary["Praha"].dominant, Answer::Dyl);
/// ```
pub struct Builder {
    pub(crate) _variants: VariantMap,
    pub(crate) _tallies: BTreeMap<String, Tally>,
}

impl Builder {
    pub fn new(variants: &VariantMap) -> Builder {
        Builder {
            _variants: variants.clone(),
            _tallies: BTreeMap::new(),
        }
    }

    /// Adds a raw record. Only the first two fields (answer, region) are read.
    pub fn add_record<S: AsRef<str>>(&mut self, fields: &[S]) -> RecordOutcome {
        match fields {
            [answer, region, ..] => self.add_response(answer.as_ref(), region.as_ref()),
            _ => {
                debug!("add_record: skipping record with {} field(s)", fields.len());
                RecordOutcome::TooShort
            }
        }
    }

    /// Adds one response, given the free-text answer and the region name.
    pub fn add_response(&mut self, answer_text: &str, region: &str) -> RecordOutcome {
        let answer = match self._variants.classify(&normalize_for_lookup(answer_text)) {
            Some(a) => a,
            None => {
                debug!("add_response: unclassified answer {:?}", answer_text);
                return RecordOutcome::Unclassified;
            }
        };
        let region = normalize(region);
        if region.is_empty() {
            debug!("add_response: empty region for answer {:?}", answer_text);
            return RecordOutcome::EmptyRegion;
        }
        let tally = self._tallies.entry(region).or_default();
        match tally.iter_mut().find(|(a, _)| *a == answer) {
            Some((_, vc)) => *vc += VoteCount(1),
            None => tally.push((answer, VoteCount(1))),
        }
        RecordOutcome::Counted(answer)
    }

    /// The number of regions that received at least one vote so far.
    pub fn num_regions(&self) -> usize {
        self._tallies.len()
    }

    /// Computes the statistics of every region, in lexicographic order of the
    /// region names.
    pub fn finish(self) -> Summary {
        let mut res: Summary = BTreeMap::new();
        for (region, tally) in self._tallies {
            match summarize(&tally) {
                Some(rs) => {
                    res.insert(region, rs);
                }
                None => {
                    debug!("finish: region {:?} has no votes, skipping", region);
                }
            }
        }
        res
    }
}
