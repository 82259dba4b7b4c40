use super::super::domain::ListingFields;
use super::config::FilterConfig;
use super::rules::ScoreCard;
use serde::{Deserialize, Serialize};

/// Why a listing was excluded, kept so a run can explain its tallies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RejectionReason {
    MileageTooHigh { mileage: i64, ceiling: i64 },
    PriceTooHigh { price: f64, ceiling: f64 },
    ExcludedDisplacement { liters: f64 },
    ExcludedTransmission { description: String },
    TurboEngine,
    BelowThreshold { score: i32, required: i32 },
}

impl RejectionReason {
    /// Stable label used when tallying rejections across a run.
    pub fn kind(&self) -> &'static str {
        match self {
            RejectionReason::MileageTooHigh { .. } => "mileage_too_high",
            RejectionReason::PriceTooHigh { .. } => "price_too_high",
            RejectionReason::ExcludedDisplacement { .. } => "excluded_displacement",
            RejectionReason::ExcludedTransmission { .. } => "excluded_transmission",
            RejectionReason::TurboEngine => "turbo_engine",
            RejectionReason::BelowThreshold { .. } => "below_threshold",
        }
    }

    pub fn summary(&self) -> String {
        match self {
            RejectionReason::MileageTooHigh { mileage, ceiling } => {
                format!("mileage {mileage} exceeds {ceiling}")
            }
            RejectionReason::PriceTooHigh { price, ceiling } => {
                format!("price {price} exceeds {ceiling}")
            }
            RejectionReason::ExcludedDisplacement { liters } => {
                format!("{liters}L engine is excluded")
            }
            RejectionReason::ExcludedTransmission { description } => {
                format!("transmission '{description}' is excluded")
            }
            RejectionReason::TurboEngine => "turbocharged engine".to_string(),
            RejectionReason::BelowThreshold { score, required } => {
                format!("score {score} below required {required}")
            }
        }
    }
}

pub(crate) fn screen_globals(
    fields: &ListingFields,
    config: &FilterConfig,
) -> Result<(), RejectionReason> {
    if fields.mileage > config.max_mileage {
        return Err(RejectionReason::MileageTooHigh {
            mileage: fields.mileage,
            ceiling: config.max_mileage,
        });
    }

    let price = fields.price_value();
    if price > config.max_price {
        return Err(RejectionReason::PriceTooHigh {
            price,
            ceiling: config.max_price,
        });
    }

    Ok(())
}

pub(crate) fn decide(card: ScoreCard, config: &FilterConfig) -> Result<ScoreCard, RejectionReason> {
    if card.score >= config.acceptance_threshold {
        Ok(card)
    } else {
        Err(RejectionReason::BelowThreshold {
            score: card.score,
            required: config.acceptance_threshold,
        })
    }
}
