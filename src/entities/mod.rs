mod location;
mod route;

pub use location::{Coordinates, Location};
pub use route::{Plan, RouteRequest};
