//! Fireside emergency supply-station server.
//!
//! A web application that answers: "a wildfire is active near me —
//! which supply stations are closest, and how do I reach one
//! without crossing the fire?"

pub mod alerts;
pub mod cache;
pub mod domain;
pub mod focus;
pub mod geocode;
pub mod hazard;
pub mod ranking;
pub mod registry;
pub mod routing;
pub mod web;
