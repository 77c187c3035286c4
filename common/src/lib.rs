//! Data contracts shared between the planner backend and its clients.
//!
//! Everything in here is plain serde data: sites and their nested
//! descriptors, library items, RBAC rows, demo scenario presets, job
//! status and the request payloads accepted by the HTTP API.

pub mod events;
pub mod jobs;
pub mod model;
pub mod requests;
