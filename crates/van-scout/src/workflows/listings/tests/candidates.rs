use super::common::*;
use crate::workflows::listings::candidates::{rank, scan, CandidateSet};
use serde_json::json;

#[test]
fn candidate_set_keeps_first_vin() {
    let mut set = CandidateSet::new();

    assert!(set.offer(candidate("VIN-A", 150, 19_000)));
    assert!(!set.offer(candidate("VIN-A", 250, 9_000)));
    assert!(set.offer(candidate("VIN-B", 150, 21_000)));

    let ranked = set.into_ranked();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].vin, "VIN-A");
    assert_eq!(ranked[0].price_value(), 19_000.0);
}

#[test]
fn rank_orders_by_score_then_price() {
    let mut candidates = vec![
        candidate("LOW", 100, 9_000),
        candidate("MID-PRICEY", 200, 21_000),
        candidate("TOP", 250, 20_000),
        candidate("MID-CHEAP", 200, 12_500),
    ];

    rank(&mut candidates);

    let order: Vec<&str> = candidates.iter().map(|c| c.vin.as_str()).collect();
    assert_eq!(order, ["TOP", "MID-CHEAP", "MID-PRICEY", "LOW"]);
}

#[test]
fn rank_keeps_input_order_on_full_ties() {
    let mut candidates = vec![
        candidate("FIRST", 150, 15_000),
        candidate("SECOND", 150, 15_000),
    ];

    rank(&mut candidates);

    assert_eq!(candidates[0].vin, "FIRST");
    assert_eq!(candidates[1].vin, "SECOND");
}

#[test]
fn scan_dedups_ranks_and_tallies() {
    let shared_vin = vin_with_code('G');
    let mut cheaper_duplicate = express_json(6.0, "Automatic", &shared_vin);
    cheaper_duplicate["pricingDetail"]["salePrice"] = json!(9_000);

    let listings = vec![
        listing(express_json(6.0, "Automatic", &shared_vin)),
        listing(cheaper_duplicate),
        transit(3.7, "V6", "Transit Cargo", &vin_with_code('M')),
        express(4.3, "Automatic", &vin_with_code('G')),
        transit(3.5, "V6", "Transit Cargo", "SHORTVIN"),
    ];

    let report = scan(&listings, &evaluator());

    assert_eq!(report.scanned, 5);
    assert_eq!(report.duplicates, 1);
    assert_eq!(report.candidates.len(), 2);
    assert_eq!(report.candidates[0].vin, vin_with_code('M'));
    assert_eq!(report.candidates[0].price_value(), 15_000.0);
    assert_eq!(report.candidates[1].vin, shared_vin);
    assert_eq!(report.candidates[1].price_value(), 18_000.0);
    assert!(report.candidates.iter().all(|c| c.score == 200));
    assert_eq!(report.rejections.get("excluded_displacement"), Some(&2));
}

#[test]
fn scan_of_nothing_is_empty() {
    let report = scan(&[], &evaluator());
    assert_eq!(report.scanned, 0);
    assert!(report.candidates.is_empty());
    assert!(report.rejections.is_empty());
}
