use serde_json::{json, Value};

use crate::workflows::listings::domain::{EvaluatedListing, ListingFields, RawListing};
use crate::workflows::listings::evaluation::{FilterConfig, ListingEvaluator};

/// 17 character VIN whose eighth character is `code`.
pub(super) fn vin_with_code(code: char) -> String {
    format!("1GCWGAF{code}5K1234567")
}

pub(super) fn evaluator() -> ListingEvaluator {
    ListingEvaluator::new(FilterConfig::todd())
}

pub(super) fn listing(value: Value) -> RawListing {
    serde_json::from_value(value).expect("listing fixture deserializes")
}

pub(super) fn express_json(liters: f64, transmission: &str, vin: &str) -> Value {
    json!({
        "id": 700000001,
        "vin": vin,
        "year": 2018,
        "make": { "name": "Chevrolet" },
        "model": { "name": "Express 2500" },
        "specifications": { "mileage": { "value": "50,000" } },
        "pricingDetail": { "salePrice": 18000 },
        "displacementUOM": liters,
        "engine": { "name": "V8 Gas" },
        "transmission": { "description": transmission },
        "description": { "label": "Express Cargo Van" },
        "color": { "exteriorColorSimple": "White" },
        "images": { "sources": [{ "src": "https://images.example/express.jpg" }] }
    })
}

pub(super) fn transit_json(liters: f64, engine: &str, label: &str, vin: &str) -> Value {
    json!({
        "id": "700000002",
        "vin": vin,
        "year": 2016,
        "make": { "name": "Ford" },
        "model": { "name": "Transit 250" },
        "specifications": { "mileage": { "value": "72,410" } },
        "pricingDetail": { "salePrice": 15000 },
        "displacementUOM": liters,
        "engine": { "name": engine },
        "transmission": { "description": "6-Speed Automatic" },
        "description": { "label": label },
        "color": { "exteriorColorSimple": "Silver" }
    })
}

pub(super) fn express(liters: f64, transmission: &str, vin: &str) -> RawListing {
    listing(express_json(liters, transmission, vin))
}

pub(super) fn transit(liters: f64, engine: &str, label: &str, vin: &str) -> RawListing {
    listing(transit_json(liters, engine, label, vin))
}

pub(super) fn candidate(vin: &str, score: i32, price: i64) -> EvaluatedListing {
    let mut fields = ListingFields::extract(&RawListing::default());
    fields.vin = vin.to_string();
    fields.model = "Express 2500".to_string();
    fields.price = price.into();
    fields.into_evaluated(score, String::new())
}
