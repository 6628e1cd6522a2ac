//! Wire types for the clean room REST API.
//!
//! Field names are camelCase on the wire, matching what the backend
//! expects; Rust-side names stay snake_case via serde renames.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// How often federation peers synchronize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SyncSchedule {
    /// Every 1 minute.
    #[default]
    #[serde(rename = "m1")]
    EveryMinute,
    /// Every 5 minutes.
    #[serde(rename = "m5")]
    EveryFiveMinutes,
    /// Every 1 hour.
    #[serde(rename = "h1")]
    Hourly,
    /// Every 6 hours.
    #[serde(rename = "h6")]
    EverySixHours,
    /// Daily.
    #[serde(rename = "d1")]
    Daily,
}

impl SyncSchedule {
    /// All schedules, in selector order.
    pub const ALL: [SyncSchedule; 5] = [
        Self::EveryMinute,
        Self::EveryFiveMinutes,
        Self::Hourly,
        Self::EverySixHours,
        Self::Daily,
    ];

    /// Wire value (`m1`, `m5`, `h1`, `h6`, `d1`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::EveryMinute => "m1",
            Self::EveryFiveMinutes => "m5",
            Self::Hourly => "h1",
            Self::EverySixHours => "h6",
            Self::Daily => "d1",
        }
    }

    /// Human-readable label for selector surfaces.
    pub fn label(self) -> &'static str {
        match self {
            Self::EveryMinute => "Every 1 minute",
            Self::EveryFiveMinutes => "Every 5 minutes",
            Self::Hourly => "Every 1 hour",
            Self::EverySixHours => "Every 6 hours",
            Self::Daily => "Daily",
        }
    }

    /// Next schedule in the cycle (used by the setup form selector).
    pub fn cycle_next(self) -> Self {
        match self {
            Self::EveryMinute => Self::EveryFiveMinutes,
            Self::EveryFiveMinutes => Self::Hourly,
            Self::Hourly => Self::EverySixHours,
            Self::EverySixHours => Self::Daily,
            Self::Daily => Self::EveryMinute,
        }
    }
}

impl fmt::Display for SyncSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameters for creating a federation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FederationConfig {
    /// Unique identifier for the clean room.
    pub pid: String,
    /// NATS server connection string.
    pub nats_hosts: String,
    /// Peer synchronization cadence.
    pub sync_schedule: SyncSchedule,
}

impl Default for FederationConfig {
    fn default() -> Self {
        Self {
            pid: "clean-room-1".to_string(),
            nats_hosts: "nats://charm:4222".to_string(),
            sync_schedule: SyncSchedule::EveryMinute,
        }
    }
}

/// Body for the invite generation endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct InviteRequest {
    pub password: String,
}

/// Body for joining an existing federation.
///
/// `invite_json` is the opaque payload handed over by the federation
/// leader; it is forwarded verbatim and validated server-side only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub pid: String,
    pub invite_json: String,
}

/// One sync status record as returned by the syncStats endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SyncStat {
    pub timestamp: String,
    pub status: String,
    pub merged_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl SyncStat {
    /// True when the record carries at least one error message.
    pub fn has_errors(&self) -> bool {
        self.errors.as_ref().is_some_and(|e| !e.is_empty())
    }
}

/// Processing backend for an analysis project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProjectKind {
    #[default]
    Cpu,
    Gpu,
}

impl ProjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Gpu => "gpu",
        }
    }

    /// Human-readable label for selector surfaces.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cpu => "CPU (Standard)",
            Self::Gpu => "GPU (Accelerated)",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Cpu => Self::Gpu,
            Self::Gpu => Self::Cpu,
        }
    }
}

/// Parameters for creating an analysis project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectParams {
    pub pid: String,
    #[serde(rename = "type")]
    pub kind: ProjectKind,
    pub persist: bool,
    pub enable_histogram: bool,
    /// Free-form key/value settings forwarded to the backend
    /// (target/condition lists travel here, comma-joined).
    pub extra: BTreeMap<String, String>,
}

/// Analysis mode for exploration queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExploreMetric {
    #[default]
    Uni,
    Bi,
    Predictive,
}

impl ExploreMetric {
    /// All metrics, in toggle order.
    pub const ALL: [ExploreMetric; 3] = [Self::Uni, Self::Bi, Self::Predictive];

    /// Query-parameter value (`uni`, `bi`, `predictive`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uni => "uni",
            Self::Bi => "bi",
            Self::Predictive => "predictive",
        }
    }

    /// Human-readable label for the toggle group.
    pub fn label(self) -> &'static str {
        match self {
            Self::Uni => "Univariate",
            Self::Bi => "Bivariate",
            Self::Predictive => "Predictive",
        }
    }
}

impl fmt::Display for ExploreMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Body for an exploration query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExploreRequest {
    pub cohort: String,
    pub attributes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_schedule_wire_values() {
        assert_eq!(
            serde_json::to_string(&SyncSchedule::EveryMinute).unwrap(),
            "\"m1\""
        );
        assert_eq!(serde_json::to_string(&SyncSchedule::Daily).unwrap(), "\"d1\"");
        let parsed: SyncSchedule = serde_json::from_str("\"h6\"").unwrap();
        assert_eq!(parsed, SyncSchedule::EverySixHours);
    }

    #[test]
    fn test_sync_schedule_cycle_covers_all() {
        let mut seen = vec![SyncSchedule::EveryMinute];
        let mut current = SyncSchedule::EveryMinute;
        for _ in 0..4 {
            current = current.cycle_next();
            seen.push(current);
        }
        assert_eq!(seen, SyncSchedule::ALL.to_vec());
        assert_eq!(current.cycle_next(), SyncSchedule::EveryMinute);
    }

    #[test]
    fn test_federation_config_serializes_camel_case() {
        let config = FederationConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["pid"], "clean-room-1");
        assert_eq!(json["natsHosts"], "nats://charm:4222");
        assert_eq!(json["syncSchedule"], "m1");
    }

    #[test]
    fn test_join_request_serializes_camel_case() {
        let req = JoinRequest {
            pid: "clean-room-1-peer".to_string(),
            invite_json: "{\"token\":\"abc\"}".to_string(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("inviteJson").is_some());
        assert!(json.get("invite_json").is_none());
    }

    #[test]
    fn test_sync_stat_deserializes_with_optional_errors() {
        let json = r#"[
            {"timestamp": "2024-05-01T10:00:00Z", "status": "success", "mergedCount": 120},
            {"timestamp": "2024-05-01T10:01:00Z", "status": "error", "mergedCount": 0,
             "errors": ["peer timeout"]}
        ]"#;
        let stats: Vec<SyncStat> = serde_json::from_str(json).unwrap();
        assert_eq!(stats.len(), 2);
        assert!(!stats[0].has_errors());
        assert_eq!(stats[0].merged_count, 120);
        assert!(stats[1].has_errors());
    }

    #[test]
    fn test_create_project_params_type_field() {
        let params = CreateProjectParams {
            pid: "healthcare-clean-room".to_string(),
            kind: ProjectKind::Gpu,
            persist: true,
            enable_histogram: false,
            extra: BTreeMap::new(),
        };
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["type"], "gpu");
        assert_eq!(json["enableHistogram"], false);
    }

    #[test]
    fn test_explore_metric_as_str() {
        assert_eq!(ExploreMetric::Uni.as_str(), "uni");
        assert_eq!(ExploreMetric::Bi.as_str(), "bi");
        assert_eq!(ExploreMetric::Predictive.as_str(), "predictive");
    }
}
