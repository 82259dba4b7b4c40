//! Van listing triage: load a feed, score each listing against the Todd
//! rubric, keep the first accepted record per VIN and export the ranking.

pub mod candidates;
pub mod domain;
pub(crate) mod evaluation;
pub mod export;
pub mod loader;

#[cfg(test)]
mod tests;

pub use candidates::{rank, scan, CandidateSet, ScanReport};
pub use domain::{EvaluatedListing, ListingFields, ListingId, RawListing, MILEAGE_SENTINEL};
pub use evaluation::{FilterConfig, ListingEvaluator, ModelFamily, RejectionReason, Verdict};
pub use export::{CandidateExporter, ExportError, ExportSummary};
pub use loader::{parse_payload, ListingLoader, LoadError, LoadedListings};
