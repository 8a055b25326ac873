mod config;
use log::{debug, info};

use std::{
    collections::BTreeMap,
    ops::AddAssign,
};

pub use crate::config::*;

pub mod builder;
pub mod manual;
pub mod normalize;

use crate::builder::{Builder, RecordOutcome};

/// The statistics of all the regions, sorted by region name.
pub type Summary = BTreeMap<String, RegionSummary>;

// **** Private structures ****

#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord, Hash)]
pub(crate) struct VoteCount(pub(crate) u64);

impl VoteCount {
    const EMPTY: VoteCount = VoteCount(0);
}

impl std::iter::Sum for VoteCount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        VoteCount(iter.map(|vc| vc.0).sum())
    }
}

impl AddAssign for VoteCount {
    fn add_assign(&mut self, rhs: VoteCount) {
        self.0 += rhs.0;
    }
}

// The votes of one region. The answers are stored in the order they were first seen:
// this order breaks the ties for the dominant answer.
pub(crate) type Tally = Vec<(Answer, VoteCount)>;

/// Aggregates a sequence of raw records.
///
/// Each record is a list of fields: the answer, then the region. Records that cannot
/// be used are dropped without error.
///
/// Arguments:
/// * `records` the raw records, in input order
/// * `variants` the accepted spelling variants
pub fn aggregate<I, R, S>(records: I, variants: &VariantMap) -> Summary
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    let mut builder = Builder::new(variants);
    let mut num_records: usize = 0;
    let mut num_skipped: usize = 0;
    for r in records {
        num_records += 1;
        if !matches!(builder.add_record(r.as_ref()), RecordOutcome::Counted(_)) {
            num_skipped += 1;
        }
    }
    info!(
        "aggregate: processed {} records, skipped {}, {} regions",
        num_records,
        num_skipped,
        builder.num_regions()
    );
    builder.finish()
}

/// Computes the statistics of a region.
///
/// Returns None if the tally holds no vote.
pub(crate) fn summarize(tally: &Tally) -> Option<RegionSummary> {
    let total: VoteCount = tally.iter().map(|(_, vc)| *vc).sum();
    if total == VoteCount::EMPTY {
        return None;
    }

    // First strictly greater count wins: ties go to the answer seen first.
    let mut dominant: Option<(Answer, VoteCount)> = None;
    for (answer, vc) in tally.iter() {
        match dominant {
            Some((_, best)) if *vc <= best => {}
            _ => dominant = Some((*answer, *vc)),
        }
    }
    let (dominant, dominant_count) = dominant?;

    let percentages: Vec<(Answer, f64)> = tally
        .iter()
        .map(|(answer, vc)| (*answer, share(*vc, total)))
        .collect();
    debug!(
        "summarize: total {:?} dominant {} percentages {:?}",
        total, dominant, percentages
    );

    Some(RegionSummary {
        total: total.0,
        counts: tally.iter().map(|(a, vc)| (*a, vc.0)).collect(),
        percentages,
        dominant,
        dominant_share: share(dominant_count, total),
    })
}

/// The share of `count` in `total`, in percent, rounded half-up to 2 decimals.
///
/// The rounding is done on integers to be exact.
fn share(count: VoteCount, total: VoteCount) -> f64 {
    let hundredths = share_hundredths(count.0, total.0);
    hundredths as f64 / 100.0
}

// round(count / total * 10000), half-up. total must not be zero.
fn share_hundredths(count: u64, total: u64) -> u64 {
    let num = (count as u128) * 20_000 + total as u128;
    (num / (2 * total as u128)) as u64
}
