pub mod detect;
pub mod detour;
pub mod models;
pub mod score;
pub mod spatial;

pub use detect::{route_crosses_zones, zones_crossing_segment};
pub use detour::{attempt_plan, detour_point, order_along_chord, Attempt, Side};
pub use models::{Candidate, Point, Zone, ZoneLevel, DEFAULT_RISK_WEIGHT};
pub use score::{score_route, RouteScore};
pub use spatial::haversine_distance;
