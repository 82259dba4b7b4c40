use super::domain::{EvaluatedListing, RawListing};
use super::evaluation::{ListingEvaluator, Verdict};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

/// Accepted listings for one run, keeping the first record seen per VIN.
#[derive(Debug, Default)]
pub struct CandidateSet {
    seen_vins: HashSet<String>,
    candidates: Vec<EvaluatedListing>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when a candidate with the same VIN was already kept.
    pub fn offer(&mut self, candidate: EvaluatedListing) -> bool {
        if !self.seen_vins.insert(candidate.vin.clone()) {
            return false;
        }

        self.candidates.push(candidate);
        true
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn into_ranked(self) -> Vec<EvaluatedListing> {
        let mut candidates = self.candidates;
        rank(&mut candidates);
        candidates
    }
}

/// Highest score first, cheapest first among equal scores. Full ties keep
/// their input order.
pub fn rank(candidates: &mut [EvaluatedListing]) {
    candidates.sort_by(compare_candidates);
}

fn compare_candidates(left: &EvaluatedListing, right: &EvaluatedListing) -> Ordering {
    right
        .score
        .cmp(&left.score)
        .then_with(|| left.price_value().total_cmp(&right.price_value()))
}

/// Result of pushing a whole feed through the evaluator.
#[derive(Debug, Default)]
pub struct ScanReport {
    pub scanned: usize,
    pub candidates: Vec<EvaluatedListing>,
    pub duplicates: usize,
    pub rejections: BTreeMap<&'static str, usize>,
}

pub fn scan(listings: &[RawListing], evaluator: &ListingEvaluator) -> ScanReport {
    let mut set = CandidateSet::new();
    let mut duplicates = 0;
    let mut rejections: BTreeMap<&'static str, usize> = BTreeMap::new();

    for listing in listings {
        match evaluator.assess(listing) {
            Verdict::Accepted(candidate) => {
                let vin = candidate.vin.clone();
                if !set.offer(candidate) {
                    debug!(%vin, "dropping duplicate candidate");
                    duplicates += 1;
                }
            }
            Verdict::Rejected(reason) => {
                debug!(
                    vin = listing.vin.as_deref().unwrap_or("Unknown"),
                    reason = %reason.summary(),
                    "listing rejected"
                );
                *rejections.entry(reason.kind()).or_default() += 1;
            }
        }
    }

    info!(
        scanned = listings.len(),
        accepted = set.len(),
        duplicates,
        ?rejections,
        "scan complete"
    );

    ScanReport {
        scanned: listings.len(),
        candidates: set.into_ranked(),
        duplicates,
        rejections,
    }
}
