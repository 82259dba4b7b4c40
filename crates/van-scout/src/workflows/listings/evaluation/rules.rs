use super::super::domain::ListingFields;
use super::policy::RejectionReason;

/// Van family a listing is judged as, picked by substring of the model name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFamily {
    Express,
    Transit,
    Other,
}

impl ModelFamily {
    pub fn of(model: &str) -> Self {
        if model.contains("Express") {
            ModelFamily::Express
        } else if model.contains("Transit") {
            ModelFamily::Transit
        } else {
            ModelFamily::Other
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ScoreCard {
    pub score: i32,
    pub notes: Vec<String>,
}

impl ScoreCard {
    fn award(&mut self, points: i32, note: &str) {
        self.score += points;
        self.notes.push(note.to_string());
    }
}

pub(crate) fn score_listing(fields: &ListingFields) -> Result<ScoreCard, RejectionReason> {
    match ModelFamily::of(&fields.model) {
        ModelFamily::Express => score_express(fields),
        ModelFamily::Transit => score_transit(fields),
        ModelFamily::Other => Ok(ScoreCard::default()),
    }
}

// Displacement checks compare the published value exactly; 4.3 and 4.8 are
// the literal values the feed uses for the small V6/V8.
#[allow(clippy::float_cmp)]
fn score_express(fields: &ListingFields) -> Result<ScoreCard, RejectionReason> {
    let mut card = ScoreCard::default();
    let liters = fields.liters();

    if (5.9..=6.1).contains(&liters) {
        card.award(100, "Good Engine Size (6.0L)");
    } else if liters == 4.3 || liters == 4.8 {
        return Err(RejectionReason::ExcludedDisplacement { liters });
    }

    if fields.transmission.contains("8-speed") {
        return Err(RejectionReason::ExcludedTransmission {
            description: fields.transmission.clone(),
        });
    } else if fields.transmission.contains("6-speed") {
        card.score += 50;
    }

    if fields.vin_engine_code() == Some('G') {
        card.award(100, "VIN Confirmed L96");
    }

    Ok(card)
}

#[allow(clippy::float_cmp)]
fn score_transit(fields: &ListingFields) -> Result<ScoreCard, RejectionReason> {
    let mut card = ScoreCard::default();
    let liters = fields.liters();

    if liters == 3.7 {
        card.award(100, "Good Engine Size (3.7L)");
    } else if liters == 3.5 {
        return Err(RejectionReason::ExcludedDisplacement { liters });
    }

    if fields.engine_name.contains("turbo") || fields.description.contains("ecoboost") {
        return Err(RejectionReason::TurboEngine);
    }

    if fields.transmission.contains("10-speed") {
        return Err(RejectionReason::ExcludedTransmission {
            description: fields.transmission.clone(),
        });
    }

    if fields.description.contains("high roof") {
        card.notes.push("Warning: High Roof".to_string());
    }

    if fields.vin_engine_code() == Some('M') {
        card.award(100, "VIN Confirmed 3.7L");
    }

    Ok(card)
}
