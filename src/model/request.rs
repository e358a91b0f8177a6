use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::trip::{TripField, TripInput};

/// Errors raised when form text cannot be turned into a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("{}: enter \"longitude, latitude\" in decimal degrees", .field.label())]
    InvalidCoordinates { field: TripField, value: String },
    #[error("{}: enter a number greater than zero", .field.label())]
    InvalidNumber { field: TripField, value: String },
}

impl InputError {
    /// The form field the error refers to.
    pub fn field(&self) -> TripField {
        match self {
            Self::InvalidCoordinates { field, .. } | Self::InvalidNumber { field, .. } => *field,
        }
    }
}

static COORDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*,\s*(-?\d+(?:\.\d+)?)\s*$").expect("valid hardcoded regex")
});

/// A `[longitude, latitude]` pair in decimal degrees.
pub type Coordinates = [f64; 2];

/// Body of the POST sent to the route optimization service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub start_coords: Coordinates,
    pub end_coords: Coordinates,
    pub mpg: f64,
    pub tank_size: f64,
}

impl RouteRequest {
    /// The legacy request body that ignores the form entirely.
    pub fn fixed() -> Self {
        Self {
            start_coords: [77.5946, 12.9716],
            end_coords: [72.8777, 19.076],
            mpg: 15.0,
            tank_size: 50.0,
        }
    }

    /// Builds a request from the live form contents.
    pub fn from_trip(trip: &TripInput) -> Result<Self, InputError> {
        Ok(Self {
            start_coords: parse_coordinates(TripField::Start, &trip.start)?,
            end_coords: parse_coordinates(TripField::End, &trip.end)?,
            mpg: parse_positive(TripField::Mpg, &trip.mpg)?,
            tank_size: parse_positive(TripField::TankSize, &trip.tank_size)?,
        })
    }
}

/// Where the outbound request body comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestSource {
    /// Use what the user typed.
    #[default]
    Form,
    /// Always send [`RouteRequest::fixed`].
    Fixed,
}

impl RequestSource {
    /// Produces the request body for a submission.
    pub fn build(self, trip: &TripInput) -> Result<RouteRequest, InputError> {
        match self {
            Self::Form => RouteRequest::from_trip(trip),
            Self::Fixed => Ok(RouteRequest::fixed()),
        }
    }
}

/// Parses `"lon, lat"` text into [`Coordinates`], checking both ranges.
pub fn parse_coordinates(field: TripField, text: &str) -> Result<Coordinates, InputError> {
    let invalid = || InputError::InvalidCoordinates {
        field,
        value: text.to_string(),
    };
    let caps = COORDS_RE.captures(text).ok_or_else(invalid)?;
    let lon: f64 = caps[1].parse().map_err(|_| invalid())?;
    let lat: f64 = caps[2].parse().map_err(|_| invalid())?;
    if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
        return Err(invalid());
    }
    Ok([lon, lat])
}

/// Parses a finite number strictly greater than zero.
pub fn parse_positive(field: TripField, text: &str) -> Result<f64, InputError> {
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(InputError::InvalidNumber {
            field,
            value: text.to_string(),
        }),
    }
}
