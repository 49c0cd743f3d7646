//! Map focus coordination.
//!
//! Mediates between user selections (address search hits, station list
//! clicks) and the map viewport: each selection becomes the single
//! authoritative focus target, optionally extended with a route endpoint.
//! The coordinator only holds and transitions state; panning the viewport
//! and fetching route geometry are done by collaborators reacting to the
//! emitted target.

use serde::Serialize;

use crate::domain::GeoPoint;

/// Zoom applied when focusing a free-text address search hit. Address
/// search implies intentional navigation to a precise point.
pub const ADDRESS_SEARCH_ZOOM: u8 = 17;

/// Zoom applied when focusing a clicked station pin. A station click
/// implies contextual orientation around a cluster of known points.
pub const STATION_FOCUS_ZOOM: u8 = 13;

/// Where the map should currently be looking.
///
/// At most one target is active at a time; a new selection always replaces
/// the previous target, it never merges with it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FocusTarget {
    pub point: GeoPoint,
    pub label: String,
    pub zoom_level: u8,
    pub route_endpoint: Option<GeoPoint>,
}

/// The coordinator's observable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusState {
    /// No focus target is active.
    Idle,
    /// A target is active, no route requested.
    Focused,
    /// A target is active and a route endpoint is set.
    Routed,
}

/// State machine coordinating selections with the map viewport.
///
/// Every transition is a total function over the state space: a trigger
/// whose precondition state does not match is a no-op, never an error.
///
/// # Examples
///
/// ```
/// use fireside_server::domain::GeoPoint;
/// use fireside_server::focus::{FocusCoordinator, FocusState};
///
/// let mut focus = FocusCoordinator::new();
/// assert_eq!(focus.state(), FocusState::Idle);
///
/// let pin = GeoPoint::new(34.05, -118.24).unwrap();
/// focus.select_station(pin, "Echo Park Depot");
/// assert_eq!(focus.state(), FocusState::Focused);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FocusCoordinator {
    target: Option<FocusTarget>,
}

impl FocusCoordinator {
    /// Create a coordinator with no active focus.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn state(&self) -> FocusState {
        match &self.target {
            None => FocusState::Idle,
            Some(target) if target.route_endpoint.is_some() => FocusState::Routed,
            Some(_) => FocusState::Focused,
        }
    }

    /// The active focus target, if any.
    pub fn current_target(&self) -> Option<&FocusTarget> {
        self.target.as_ref()
    }

    /// Focus a point chosen via free-text address search.
    ///
    /// Replaces any previous target; any requested route is dropped with it.
    pub fn select_address(&mut self, point: GeoPoint, label: impl Into<String>) -> &FocusTarget {
        self.select(point, label.into(), ADDRESS_SEARCH_ZOOM)
    }

    /// Focus a station chosen by clicking its pin or list entry.
    ///
    /// Replaces any previous target; any requested route is dropped with it.
    pub fn select_station(&mut self, point: GeoPoint, label: impl Into<String>) -> &FocusTarget {
        self.select(point, label.into(), STATION_FOCUS_ZOOM)
    }

    fn select(&mut self, point: GeoPoint, label: String, zoom_level: u8) -> &FocusTarget {
        self.target.insert(FocusTarget {
            point,
            label,
            zoom_level,
            route_endpoint: None,
        })
    }

    /// Attach a route endpoint to the active target.
    ///
    /// Replaces any previously requested endpoint (last writer wins).
    /// No-op while idle; returns whether a route is now set.
    pub fn request_route(&mut self, endpoint: GeoPoint) -> bool {
        match &mut self.target {
            Some(target) => {
                target.route_endpoint = Some(endpoint);
                true
            }
            None => false,
        }
    }

    /// Drop the route endpoint, keeping the focus target.
    ///
    /// No-op unless a route is set; returns whether a route was cleared.
    pub fn clear_route(&mut self) -> bool {
        match &mut self.target {
            Some(target) if target.route_endpoint.is_some() => {
                target.route_endpoint = None;
                true
            }
            _ => false,
        }
    }

    /// Clear all focus state.
    pub fn reset(&mut self) {
        self.target = None;
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        SelectAddress(GeoPoint, String),
        SelectStation(GeoPoint, String),
        RequestRoute(GeoPoint),
        ClearRoute,
        Reset,
    }

    fn valid_point() -> impl Strategy<Value = GeoPoint> {
        (-90.0f64..=90.0, -180.0f64..=180.0)
            .prop_map(|(lat, lon)| GeoPoint::new(lat, lon).unwrap())
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            (valid_point(), "[a-z]{1,8}").prop_map(|(p, l)| Op::SelectAddress(p, l)),
            (valid_point(), "[a-z]{1,8}").prop_map(|(p, l)| Op::SelectStation(p, l)),
            valid_point().prop_map(Op::RequestRoute),
            Just(Op::ClearRoute),
            Just(Op::Reset),
        ]
    }

    fn apply(focus: &mut FocusCoordinator, op: Op) {
        match op {
            Op::SelectAddress(p, l) => {
                focus.select_address(p, l);
            }
            Op::SelectStation(p, l) => {
                focus.select_station(p, l);
            }
            Op::RequestRoute(p) => {
                focus.request_route(p);
            }
            Op::ClearRoute => {
                focus.clear_route();
            }
            Op::Reset => focus.reset(),
        }
    }

    proptest! {
        /// After any sequence of triggers the reported state matches the
        /// held target, and any selection ends in Focused with no route.
        #[test]
        fn transitions_are_total_and_consistent(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let mut focus = FocusCoordinator::new();

            for op in ops {
                let was_selection = matches!(op, Op::SelectAddress(..) | Op::SelectStation(..));
                apply(&mut focus, op);

                match focus.state() {
                    FocusState::Idle => prop_assert!(focus.current_target().is_none()),
                    FocusState::Focused => {
                        let target = focus.current_target().unwrap();
                        prop_assert!(target.route_endpoint.is_none());
                    }
                    FocusState::Routed => {
                        let target = focus.current_target().unwrap();
                        prop_assert!(target.route_endpoint.is_some());
                    }
                }

                if was_selection {
                    prop_assert_eq!(focus.state(), FocusState::Focused);
                }
            }
        }

        /// Selections always install one of the two zoom tiers
        #[test]
        fn zoom_is_always_a_known_tier(ops in prop::collection::vec(op_strategy(), 1..40)) {
            let mut focus = FocusCoordinator::new();

            for op in ops {
                apply(&mut focus, op);
                if let Some(target) = focus.current_target() {
                    prop_assert!(
                        target.zoom_level == ADDRESS_SEARCH_ZOOM
                            || target.zoom_level == STATION_FOCUS_ZOOM
                    );
                }
            }
        }
    }
}
