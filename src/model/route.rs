use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Itinerary summary returned by the route optimization service.
///
/// Fields not listed here (such as the route geometry) are ignored on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub total_distance_miles: f64,
    pub total_gallons_used: f64,
    pub total_fuel_cost: f64,
    pub fuel_stops: Vec<FuelStop>,
}

impl RouteSummary {
    /// Number of planned fuel stops.
    pub fn stop_count(&self) -> usize {
        self.fuel_stops.len()
    }
}

/// A single planned fuel stop.
///
/// The payload is kept as-is; only well-known keys are surfaced for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FuelStop(pub Value);

impl FuelStop {
    /// Station name, when the service supplied one.
    pub fn station(&self) -> Option<&str> {
        self.0.get("station").and_then(Value::as_str)
    }

    /// Price per gallon at this stop, when the service supplied one.
    pub fn price(&self) -> Option<f64> {
        self.0.get("price").and_then(Value::as_f64)
    }
}
