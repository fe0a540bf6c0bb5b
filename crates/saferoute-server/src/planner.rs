//! Routing orchestrator: steers the external gateway around risk zones with
//! synthetic detour waypoints.
//!
//! This is a bounded greedy search, not an exhaustive planner. It asks the
//! gateway for base alternatives, and if none clears every zone it walks a
//! fixed strategy list of detour-waypoint attempts, returning the first fully
//! safe result. At most `4 + n` gateway calls follow the base call, where `n`
//! is the number of target zones. Dropping the returned future aborts the
//! in-flight gateway call and skips the remaining strategies.

use saferoute_core::{
    attempt_plan, detour_point, order_along_chord, route_crosses_zones, score_route,
    zones_crossing_segment, Candidate, Point, Zone,
};
use saferoute_osrm::{OsrmClient, OsrmError, OsrmRoute};
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;

/// When the straight chord crosses no zone but every curved alternative is
/// unsafe, detour around the first few configured zones instead.
/// Heuristic; see DESIGN.md.
const FALLBACK_ZONE_COUNT: usize = 3;

/// Routing mode requested by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMode {
    #[default]
    Safe,
    Fastest,
    Shortest,
}

/// Terminal planning failures surfaced to the caller.
///
/// Gateway errors inside the strategy loop never reach here; they degrade to
/// an empty candidate set for that attempt.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("no route found between the requested points")]
    NoRouteFound,
}

/// External routing capability: ordered waypoints and a travel profile in,
/// ranked decoded candidates out. Fallible and possibly slow.
pub trait RouteGateway: Send + Sync {
    fn fetch_routes(
        &self,
        points: &[Point],
        profile: &str,
        alternatives: bool,
    ) -> impl Future<Output = Result<Vec<OsrmRoute>, OsrmError>> + Send;
}

impl RouteGateway for OsrmClient {
    async fn fetch_routes(
        &self,
        points: &[Point],
        profile: &str,
        alternatives: bool,
    ) -> Result<Vec<OsrmRoute>, OsrmError> {
        self.routes(points, profile, alternatives).await
    }
}

impl<G: RouteGateway> RouteGateway for Arc<G> {
    async fn fetch_routes(
        &self,
        points: &[Point],
        profile: &str,
        alternatives: bool,
    ) -> Result<Vec<OsrmRoute>, OsrmError> {
        self.as_ref().fetch_routes(points, profile, alternatives).await
    }
}

/// Outcome of a planning request.
#[derive(Debug, Clone)]
pub struct RoutePlan {
    pub safe: bool,
    pub note: String,
    pub candidate: Candidate,
}

/// The retry state machine. Holds the gateway and the read-only zone list;
/// constructed once at startup and shared across requests.
pub struct RoutePlanner<G> {
    gateway: G,
    zones: Arc<Vec<Zone>>,
}

impl<G: RouteGateway> RoutePlanner<G> {
    pub fn new(gateway: G, zones: Arc<Vec<Zone>>) -> Self {
        Self { gateway, zones }
    }

    /// Plan a route between `start` and `end` under the requested mode.
    pub async fn plan(
        &self,
        start: Point,
        end: Point,
        mode: RouteMode,
        profile: &str,
    ) -> Result<RoutePlan, PlanError> {
        for p in [start, end] {
            if !p.lat.is_finite()
                || !p.lng.is_finite()
                || !(-90.0..=90.0).contains(&p.lat)
                || !(-180.0..=180.0).contains(&p.lng)
            {
                return Err(PlanError::InvalidInput(format!(
                    "coordinate out of range: {},{}",
                    p.lat, p.lng
                )));
            }
        }
        match mode {
            RouteMode::Safe => self.plan_safe(start, end, profile).await,
            RouteMode::Fastest | RouteMode::Shortest => {
                self.plan_direct(start, end, mode, profile).await
            }
        }
    }

    /// Fastest/shortest: one alternatives request, arg-min by duration or
    /// distance. Safety is reported but never triggers re-routing.
    async fn plan_direct(
        &self,
        start: Point,
        end: Point,
        mode: RouteMode,
        profile: &str,
    ) -> Result<RoutePlan, PlanError> {
        let routes = self
            .gateway
            .fetch_routes(&[start, end], profile, true)
            .await
            .map_err(|err| {
                tracing::warn!(%err, "gateway request failed");
                PlanError::NoRouteFound
            })?;
        let candidates = self.evaluate(routes, Vec::new());
        let chosen = match mode {
            RouteMode::Shortest => candidates
                .into_iter()
                .min_by(|a, b| a.distance_m.total_cmp(&b.distance_m)),
            _ => candidates
                .into_iter()
                .min_by(|a, b| a.duration_s.total_cmp(&b.duration_s)),
        }
        .ok_or(PlanError::NoRouteFound)?;
        let safe = !route_crosses_zones(&chosen.geometry, &self.zones);
        Ok(RoutePlan {
            safe,
            note: "picked from gateway alternatives".to_string(),
            candidate: chosen,
        })
    }

    async fn plan_safe(
        &self,
        start: Point,
        end: Point,
        profile: &str,
    ) -> Result<RoutePlan, PlanError> {
        let zones = &self.zones;

        // Base alternatives for the direct pair.
        let base = match self.gateway.fetch_routes(&[start, end], profile, true).await {
            Ok(routes) => routes,
            Err(err) => {
                tracing::warn!(%err, "base route request failed");
                Vec::new()
            }
        };
        let mut safe_base = Vec::new();
        let mut fallback = Vec::new();
        for candidate in self.evaluate(base, Vec::new()) {
            if route_crosses_zones(&candidate.geometry, zones) {
                fallback.push(candidate);
            } else {
                safe_base.push(candidate);
            }
        }
        if !safe_base.is_empty() {
            let count = safe_base.len();
            safe_base.sort_by(|a, b| a.score.total_cmp(&b.score));
            return Ok(RoutePlan {
                safe: true,
                note: format!("found safe base route ({count} safe alternatives)"),
                candidate: safe_base.swap_remove(0),
            });
        }

        // Which zones must a detour clear? If the straight chord crosses
        // none but the curved alternatives were still unsafe, target the
        // head of the zone list.
        let crossing = zones_crossing_segment(start, end, zones);
        let targets = if crossing.is_empty() {
            zones.iter().take(FALLBACK_ZONE_COUNT).cloned().collect()
        } else {
            crossing
        };

        // Strategy loop: first fully safe result wins. A failed gateway call
        // only costs that one attempt.
        for attempt in attempt_plan(targets.len()) {
            let waypoints: Vec<Point> = targets
                .iter()
                .zip(&attempt.sides)
                .map(|(zone, &side)| detour_point(start, end, zone, side, attempt.margin_m))
                .collect();
            let waypoints = order_along_chord(start, end, waypoints);

            let mut points = Vec::with_capacity(waypoints.len() + 2);
            points.push(start);
            points.extend(&waypoints);
            points.push(end);

            let routes = match self.gateway.fetch_routes(&points, profile, false).await {
                Ok(routes) => routes,
                Err(err) => {
                    tracing::warn!(%err, margin_m = attempt.margin_m, "detour attempt failed");
                    continue;
                }
            };
            let Some(candidate) = self.evaluate(routes, waypoints).into_iter().next() else {
                continue;
            };
            if route_crosses_zones(&candidate.geometry, zones) {
                fallback.push(candidate);
                continue;
            }
            return Ok(RoutePlan {
                safe: true,
                note: format!(
                    "safe route found with {} waypoint(s)",
                    candidate.used_waypoints.len()
                ),
                candidate,
            });
        }

        // No fully safe route: least penalty wins, distance breaks ties.
        if !fallback.is_empty() {
            fallback.sort_by(|a, b| {
                a.penalty
                    .total_cmp(&b.penalty)
                    .then(a.distance_m.total_cmp(&b.distance_m))
            });
            return Ok(RoutePlan {
                safe: false,
                note: "no fully safe route; returning least-risky fallback".to_string(),
                candidate: fallback.swap_remove(0),
            });
        }

        Err(PlanError::NoRouteFound)
    }

    fn evaluate(&self, routes: Vec<OsrmRoute>, used_waypoints: Vec<Point>) -> Vec<Candidate> {
        routes
            .into_iter()
            .map(|route| {
                let meta = score_route(&route.geometry, &self.zones);
                Candidate {
                    geometry: route.geometry,
                    distance_m: route.distance_m,
                    duration_s: route.duration_s,
                    penalty: meta.penalty,
                    score: meta.score,
                    used_waypoints: used_waypoints.clone(),
                }
            })
            .collect()
    }
}
