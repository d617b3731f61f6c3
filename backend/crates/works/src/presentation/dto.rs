//! API DTOs

use kernel::id::{UserId, WorkId};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{Work, WorkDraft};

/// Body of `POST /private/create-work`
///
/// Missing fields decode to their empty value and are reported by
/// validation rather than rejected as malformed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkRequest {
    #[serde(default)]
    pub creator: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub links: Vec<String>,
}

impl From<CreateWorkRequest> for WorkDraft {
    fn from(req: CreateWorkRequest) -> Self {
        WorkDraft::new(UserId::new(req.creator), req.name, req.description, req.links)
    }
}

/// Body of `POST /private/delete-work`
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteWorkRequest {
    #[serde(default)]
    pub creator: i64,
    #[serde(default)]
    pub work: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkResponse {
    pub id: WorkId,
    pub creator_id: UserId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub links: Vec<String>,
}

impl From<Work> for WorkResponse {
    fn from(work: Work) -> Self {
        Self {
            id: work.id,
            creator_id: work.creator_id,
            name: work.name,
            description: work.description,
            links: work.document_links,
        }
    }
}

pub fn to_responses(works: Vec<Work>) -> Vec<WorkResponse> {
    works.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_response_shape() {
        let work = Work {
            id: WorkId::new(3),
            creator_id: UserId::new(1),
            name: "my work".to_string(),
            description: None,
            document_links: vec!["https://a.example".to_string()],
        };

        let value = serde_json::to_value(WorkResponse::from(work)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 3,
                "creator_id": 1,
                "name": "my work",
                "links": ["https://a.example"],
            })
        );
    }

    #[test]
    fn test_missing_fields_decode_empty() {
        let req: CreateWorkRequest = serde_json::from_str("{}").unwrap();
        let draft = WorkDraft::from(req);

        assert!(!draft.creator.is_positive());
        assert!(draft.name.is_empty());
        assert!(draft.document_links.is_empty());
    }
}
