/// Workflow type definitions
///
/// A workflow is a named, ordered sequence of DNA processes. The sequence is
/// stored as `workflow_processes` rows carrying a 1-based `process_order`;
/// reads join each step with its process name.

use serde::{Deserialize, Serialize};

/// A workflow row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    /// Auto-assigned identifier
    pub id: i64,
    /// Human-readable workflow name (e.g., "Default Workflow")
    pub name: String,
    /// User who created the workflow
    pub created_by: i64,
}

/// Request body for workflow creation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkflow {
    pub name: String,
    pub created_by: i64,
}

/// One entry of a workflow's process sequence, joined with the process name
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStep {
    /// Identifier of the workflow_processes row
    pub id: i64,
    pub dna_process_id: i64,
    pub process_name: String,
    pub process_order: i64,
}

/// A workflow together with its ordered process sequence
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDetail {
    pub id: i64,
    pub name: String,
    pub created_by: i64,
    /// Steps sorted by `process_order`
    pub processes: Vec<WorkflowStep>,
}

impl WorkflowDetail {
    pub fn new(workflow: Workflow, processes: Vec<WorkflowStep>) -> Self {
        Self {
            id: workflow.id,
            name: workflow.name,
            created_by: workflow.created_by,
            processes,
        }
    }

    /// Process ids in sequence order
    pub fn process_ids(&self) -> Vec<i64> {
        self.processes.iter().map(|step| step.dna_process_id).collect()
    }
}

/// Body of `PUT /api/workflows/{id}/processes`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceProcessesRequest {
    pub dna_process_ids: Vec<i64>,
}

/// Query string of `POST /api/workflows/{id}/add-process`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddProcessQuery {
    pub dna_process_id: i64,
    pub process_order: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_request_uses_camel_case() {
        let req: ReplaceProcessesRequest =
            serde_json::from_str(r#"{ "dnaProcessIds": [3, 1] }"#).unwrap();
        assert_eq!(req.dna_process_ids, vec![3, 1]);
    }

    #[test]
    fn detail_lists_process_ids_in_order() {
        let detail = WorkflowDetail::new(
            Workflow {
                id: 1,
                name: "Default Workflow".into(),
                created_by: 1,
            },
            vec![
                WorkflowStep {
                    id: 10,
                    dna_process_id: 3,
                    process_name: "Quantification".into(),
                    process_order: 1,
                },
                WorkflowStep {
                    id: 11,
                    dna_process_id: 1,
                    process_name: "Extraction".into(),
                    process_order: 2,
                },
            ],
        );
        assert_eq!(detail.process_ids(), vec![3, 1]);

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["createdBy"], 1);
        assert_eq!(json["processes"][0]["processName"], "Quantification");
    }
}
