mod config;
mod policy;
mod rules;

pub use config::FilterConfig;
pub use policy::RejectionReason;
pub use rules::ModelFamily;

use super::domain::{EvaluatedListing, ListingFields, RawListing};
use rules::ScoreCard;

const NOTE_SEPARATOR: &str = " | ";

/// Outcome of running one listing through the filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Accepted(EvaluatedListing),
    Rejected(RejectionReason),
}

impl Verdict {
    pub fn accepted(self) -> Option<EvaluatedListing> {
        match self {
            Verdict::Accepted(listing) => Some(listing),
            Verdict::Rejected(_) => None,
        }
    }
}

/// Stateless evaluator applying the filter configuration to one listing at a time.
#[derive(Debug, Clone, Default)]
pub struct ListingEvaluator {
    config: FilterConfig,
}

impl ListingEvaluator {
    pub fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn evaluate(&self, listing: &RawListing) -> Option<EvaluatedListing> {
        self.assess(listing).accepted()
    }

    pub fn assess(&self, listing: &RawListing) -> Verdict {
        let fields = ListingFields::extract(listing);

        match self.judge(&fields) {
            Ok(card) => {
                let notes = card.notes.join(NOTE_SEPARATOR);
                Verdict::Accepted(fields.into_evaluated(card.score, notes))
            }
            Err(reason) => Verdict::Rejected(reason),
        }
    }

    fn judge(&self, fields: &ListingFields) -> Result<ScoreCard, RejectionReason> {
        policy::screen_globals(fields, &self.config)?;
        let card = rules::score_listing(fields)?;
        policy::decide(card, &self.config)
    }
}
