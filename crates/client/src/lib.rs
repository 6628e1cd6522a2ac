//! Clean room REST API client.
//!
//! This crate provides a typed async client for the clean room backend.
//! It covers the federation lifecycle (create, invite, join, pulsing,
//! sync statistics) and the analysis project surface (create, CSV
//! ingestion, exploration queries). All durable state and all privacy
//! machinery live server-side; this client only shapes requests, logs
//! them uniformly, and propagates errors unmodified.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;

pub use client::{CleanRoomClient, CleanRoomClientBuilder};
pub use error::{ClientError, Result};
pub use models::{
    CreateProjectParams, ExploreMetric, ExploreRequest, FederationConfig, JoinRequest,
    ProjectKind, SyncSchedule, SyncStat,
};
