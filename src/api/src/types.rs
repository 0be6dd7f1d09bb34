//! Record model and response types for the report API.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ReportError;

/// One row of the `racers` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Racer {
    pub position: i64,
    /// Driver code, unique per record.
    pub abr: String,
    pub racer_name: String,
    pub team: String,
    pub time: String,
}

impl Racer {
    /// Split off the driver code, keeping the remaining fields in column order.
    pub fn into_entry(self) -> (String, RacerStats) {
        (
            self.abr,
            RacerStats {
                position: self.position,
                racer_name: self.racer_name,
                team: self.team,
                time: self.time,
            },
        )
    }
}

/// A racer record without its code, as published by the JSON/XML report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RacerStats {
    pub position: i64,
    pub racer_name: String,
    pub team: String,
    pub time: String,
}

impl RacerStats {
    /// Join all fields with `sep`, position first.
    pub fn to_line(&self, sep: &str) -> String {
        let position = self.position.to_string();
        [
            position.as_str(),
            self.racer_name.as_str(),
            self.team.as_str(),
            self.time.as_str(),
        ]
        .join(sep)
    }
}

/// Mapping keyed by driver code that keeps store-native insertion order.
pub type DriverMap<V> = IndexMap<String, V>;

/// Single driver view: name plus `"position |team |time"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DriverStatistic {
    pub name: String,
    pub driver_statistic: String,
}

/// Body returned for an unsupported `format`. Sent with HTTP 200.
#[derive(Debug, Serialize)]
pub struct BadRequestResponse {
    pub status: u16,
    pub message: String,
}

impl Default for BadRequestResponse {
    fn default() -> Self {
        Self {
            status: 400,
            message: "Bad Request".to_string(),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Output format of the API report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Xml,
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(ReportFormat::Json),
            "xml" => Ok(ReportFormat::Xml),
            other => Err(ReportError::invalid("format", other)),
        }
    }
}

/// Row order of the HTML report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ReportError::invalid("order", other)),
        }
    }
}
