// Cost estimates attached to segments and whole itineraries

use serde::{Deserialize, Serialize};

use super::base::Currency;
use super::error::{check_http_url, check_non_negative, SchemaError};

/// Breakdown of how an estimate was reached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostDetails {
    pub base_cost: f64,
    pub time_cost: f64,
    pub traffic_adjustment: f64,
    pub fuel_price: f64,
    pub fuel_consumption: f64,
}

impl CostDetails {
    pub fn validate(&self) -> Result<(), SchemaError> {
        check_non_negative("base_cost", self.base_cost)?;
        check_non_negative("time_cost", self.time_cost)?;
        check_non_negative("traffic_adjustment", self.traffic_adjustment)?;
        check_non_negative("fuel_price", self.fuel_price)?;
        check_non_negative("fuel_consumption", self.fuel_consumption)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    /// Where the figures came from. Usually at least one, but an empty list is accepted.
    pub source_urls: Vec<String>,
    pub source_description: String,
    pub estimated_cost: f64,
    pub currency: Currency,
    pub cost_details: CostDetails,
}

impl CostEstimate {
    pub fn validate(&self) -> Result<(), SchemaError> {
        for (i, url) in self.source_urls.iter().enumerate() {
            check_http_url(&format!("source_urls[{}]", i), url)?;
        }
        check_non_negative("estimated_cost", self.estimated_cost)?;
        self.currency.validate().map_err(|e| e.at("currency"))?;
        self.cost_details.validate().map_err(|e| e.at("cost_details"))
    }
}
