use serde::{Deserialize, Serialize};

/// Global ceilings and the acceptance bar applied to every listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub max_mileage: i64,
    pub max_price: f64,
    pub acceptance_threshold: i32,
}

impl FilterConfig {
    /// The hand-tuned Todd rubric.
    pub fn todd() -> Self {
        Self {
            max_mileage: 110_000,
            max_price: 22_000.0,
            acceptance_threshold: 100,
        }
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::todd()
    }
}
