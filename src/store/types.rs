/// Record types for users, DNA processes, worksheets, groups and measurements
///
/// Entities are flat rows with explicit foreign-key ids; anything that needs
/// data from several tables is a separate read-side projection built by a join.
/// JSON uses camelCase field names.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};

/// Longest accepted value for any name or email column
pub const MAX_NAME_LEN: usize = 255;

/// Closed set of user roles, stored as 0/1/2
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
pub enum UserRole {
    Admin = 0,
    Technician = 1,
    Analyst = 2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub user_name: String,
    pub email: Option<String>,
    pub role: UserRole,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub user_name: String,
    pub email: Option<String>,
    pub role: UserRole,
}

/// A named laboratory process type (e.g., Extraction)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DnaProcess {
    pub id: i64,
    pub name: String,
    pub created_by: i64,
}

/// DnaProcess joined with the user name of its creator
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DnaProcessView {
    pub id: i64,
    pub name: String,
    pub created_by: i64,
    pub created_by_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDnaProcess {
    pub name: String,
    pub created_by: i64,
}

/// Worksheets that jointly execute one workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowGroup {
    pub id: i64,
    pub workflow_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkflowGroup {
    pub workflow_id: i64,
}

/// One concrete execution of a single DnaProcess, owned by an analyst
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Worksheet {
    pub id: i64,
    pub name: String,
    pub analyst_id: i64,
    pub dna_process_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorksheet {
    pub name: String,
    pub analyst_id: i64,
    pub dna_process_id: i64,
}

/// Placement of a worksheet at a step position within a workflow group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorksheetPlacement {
    pub id: i64,
    pub worksheet_id: i64,
    pub workflow_group_id: i64,
    pub step_order: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorksheetPlacement {
    pub worksheet_id: i64,
    pub workflow_group_id: i64,
    pub step_order: i64,
}

/// One row of the ordered group report
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GroupReportRow {
    pub workflow_name: String,
    pub step_order: i64,
    pub process_name: String,
    pub worksheet_name: String,
    pub analyst_name: String,
}

/// Which per-step measurement table a record lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasurementKind {
    Extraction,
    Amplification,
    Quantification,
}

impl MeasurementKind {
    pub const ALL: [MeasurementKind; 3] = [
        MeasurementKind::Extraction,
        MeasurementKind::Amplification,
        MeasurementKind::Quantification,
    ];

    /// Backing table; only ever one of these three literals
    pub fn table(self) -> &'static str {
        match self {
            MeasurementKind::Extraction => "extractions",
            MeasurementKind::Amplification => "amplifications",
            MeasurementKind::Quantification => "quantifications",
        }
    }

    /// Singular name used in messages
    pub fn label(self) -> &'static str {
        match self {
            MeasurementKind::Extraction => "extraction",
            MeasurementKind::Amplification => "amplification",
            MeasurementKind::Quantification => "quantification",
        }
    }
}

/// Extraction, amplification or quantification readings for one worksheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub id: i64,
    pub worksheet_id: i64,
    pub prop1: i64,
    pub prop2: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMeasurement {
    pub worksheet_id: i64,
    pub prop1: i64,
    pub prop2: i64,
}

/// Reject blank or over-long names before they reach the database
pub fn check_name(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::Validation(format!("{} must not be empty", field)));
    }
    if value.chars().count() > MAX_NAME_LEN {
        return Err(ApiError::Validation(format!(
            "{} must be at most {} characters",
            field, MAX_NAME_LEN
        )));
    }
    Ok(())
}

/// An update body must address the same row as its path
pub fn check_same_id(path_id: i64, body_id: i64) -> ApiResult<()> {
    if path_id != body_id {
        return Err(ApiError::Validation(format!(
            "path id {} does not match body id {}",
            path_id, body_id
        )));
    }
    Ok(())
}
