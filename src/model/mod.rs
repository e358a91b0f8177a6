mod request;
mod route;
mod trip;

pub use request::{
    Coordinates, InputError, RequestSource, RouteRequest, parse_coordinates, parse_positive,
};
pub use route::{FuelStop, RouteSummary};
pub use trip::{DEFAULT_MPG, DEFAULT_TANK_SIZE, TripField, TripInput};
