//! HTTP transport client speaking the folder API wire envelope

use crate::error::ExplorerError;
use crate::source::{FolderSource, SourceResult};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tree_state::tree::{NodeId, TreeNode};

/// Wire representation of one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    pub name: String,
    pub is_folder: bool,
    #[serde(default)]
    pub children_ids: Vec<String>,
    #[serde(default)]
    pub has_more_children: bool,
}

impl From<NodeRecord> for TreeNode {
    fn from(record: NodeRecord) -> Self {
        let parent_id = record.parent_id.map(NodeId::from);
        if record.is_folder {
            TreeNode::folder(record.id, parent_id, record.name)
                .with_children(record.children_ids.into_iter().map(NodeId::from).collect())
                .with_more_children(record.has_more_children)
        } else {
            // the constructor drops any children a malformed record carries
            TreeNode::file(record.id, parent_id, record.name)
        }
    }
}

/// Response envelope returned by every folder endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<NodeRecord>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateBody<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parent_id: Option<&'a str>,
}

#[derive(Serialize)]
struct UpdateBody<'a> {
    name: &'a str,
}

/// `FolderSource` over the remote folder API
///
/// Endpoints follow the envelope contract: list at the base URL, node and
/// children under `/{id}` and `/{id}/children`, create/update/delete as
/// POST/PUT/DELETE. Non-2xx responses surface the server's message verbatim.
pub struct HttpFolderSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpFolderSource {
    /// Create a client for the folder API rooted at `base_url`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a client reusing an existing `reqwest::Client`
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    fn node_url(&self, id: &NodeId) -> String {
        format!("{}/{}", self.base_url, id)
    }

    async fn read_body(response: reqwest::Response) -> SourceResult<(StatusCode, String)> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ExplorerError::Transport(err.to_string()))?;
        Ok((status, body))
    }

    fn check_status(status: StatusCode, body: &str) -> SourceResult<()> {
        if status.is_success() {
            return Ok(());
        }

        let message = serde_json::from_str::<ApiEnvelope>(body)
            .ok()
            .and_then(|envelope| envelope.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        Err(if status == StatusCode::NOT_FOUND {
            ExplorerError::NotFound(message)
        } else {
            ExplorerError::Transport(format!("{}: {message}", status.as_u16()))
        })
    }

    fn parse_envelope(body: &str) -> SourceResult<ApiEnvelope> {
        let envelope: ApiEnvelope = serde_json::from_str(body)
            .map_err(|err| ExplorerError::Transport(format!("malformed envelope: {err}")))?;
        if !envelope.success {
            return Err(ExplorerError::Transport(
                envelope
                    .message
                    .unwrap_or_else(|| "request failed".to_string()),
            ));
        }
        Ok(envelope)
    }

    async fn get_envelope(&self, url: &str) -> SourceResult<ApiEnvelope> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| ExplorerError::Transport(err.to_string()))?;
        let (status, body) = Self::read_body(response).await?;
        Self::check_status(status, &body)?;
        Self::parse_envelope(&body)
    }
}

impl FolderSource for HttpFolderSource {
    async fn list_all(&self) -> SourceResult<Vec<TreeNode>> {
        let envelope = self.get_envelope(&self.base_url).await?;
        Ok(envelope.data.into_iter().map(TreeNode::from).collect())
    }

    async fn fetch_folder(&self, id: &NodeId) -> SourceResult<Option<TreeNode>> {
        if id.as_str().is_empty() {
            return Err(ExplorerError::Validation("folder id is required".into()));
        }
        match self.get_envelope(&self.node_url(id)).await {
            Ok(envelope) => Ok(envelope.data.into_iter().next().map(TreeNode::from)),
            Err(ExplorerError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn fetch_children(&self, parent_id: &NodeId) -> SourceResult<Vec<TreeNode>> {
        if parent_id.as_str().is_empty() {
            return Err(ExplorerError::Validation("folder id is required".into()));
        }
        let url = format!("{}/children", self.node_url(parent_id));
        let envelope = self.get_envelope(&url).await?;
        Ok(envelope.data.into_iter().map(TreeNode::from).collect())
    }

    async fn create(&mut self, name: &str, parent_id: Option<&NodeId>) -> SourceResult<TreeNode> {
        if name.trim().is_empty() {
            return Err(ExplorerError::Validation("folder name is required".into()));
        }
        let body = CreateBody {
            name,
            parent_id: parent_id.map(NodeId::as_str),
        };
        let response = self
            .client
            .post(&self.base_url)
            .json(&body)
            .send()
            .await
            .map_err(|err| ExplorerError::Transport(err.to_string()))?;
        let (status, body) = Self::read_body(response).await?;
        Self::check_status(status, &body)?;
        let envelope = Self::parse_envelope(&body)?;
        envelope
            .data
            .into_iter()
            .next()
            .map(TreeNode::from)
            .ok_or_else(|| ExplorerError::Transport("empty create response".into()))
    }

    async fn update(&mut self, id: &NodeId, name: &str) -> SourceResult<TreeNode> {
        if name.trim().is_empty() {
            return Err(ExplorerError::Validation("folder name is required".into()));
        }
        let response = self
            .client
            .put(&self.node_url(id))
            .json(&UpdateBody { name })
            .send()
            .await
            .map_err(|err| ExplorerError::Transport(err.to_string()))?;
        let (status, body) = Self::read_body(response).await?;
        Self::check_status(status, &body)?;
        let envelope = Self::parse_envelope(&body)?;
        envelope
            .data
            .into_iter()
            .next()
            .map(TreeNode::from)
            .ok_or_else(|| ExplorerError::Transport("empty update response".into()))
    }

    async fn delete(&mut self, id: &NodeId) -> SourceResult<()> {
        let response = self
            .client
            .delete(&self.node_url(id))
            .send()
            .await
            .map_err(|err| ExplorerError::Transport(err.to_string()))?;
        let (status, body) = Self::read_body(response).await?;
        Self::check_status(status, &body)?;
        // some backends answer a delete with an empty body
        if !body.trim().is_empty() {
            Self::parse_envelope(&body)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_round_trip() {
        let json = r#"{
            "success": true,
            "data": [{
                "id": "f1",
                "parentId": null,
                "name": "Documents",
                "isFolder": true,
                "childrenIds": ["f2"],
                "hasMoreChildren": true
            }],
            "message": "Folders retrieved successfully"
        }"#;

        let envelope: ApiEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.len(), 1);

        let node = TreeNode::from(envelope.data[0].clone());
        assert_eq!(node.id, NodeId::from("f1"));
        assert!(node.is_root());
        assert_eq!(node.children_ids, vec![NodeId::from("f2")]);
        assert!(node.has_more_children);
    }

    #[test]
    fn test_envelope_missing_optional_fields() {
        let json = r#"{
            "success": true,
            "data": [{"id": "x", "name": "notes.txt", "isFolder": false}]
        }"#;

        let envelope: ApiEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.message.is_none());

        let node = TreeNode::from(envelope.data[0].clone());
        assert!(!node.is_folder);
        assert!(node.children_ids.is_empty());
    }

    #[test]
    fn test_malformed_file_record_loses_children() {
        let record = NodeRecord {
            id: "x".into(),
            parent_id: Some("f1".into()),
            name: "notes.txt".into(),
            is_folder: false,
            children_ids: vec!["bogus".into()],
            has_more_children: true,
        };

        let node = TreeNode::from(record);
        assert!(node.children_ids.is_empty());
        assert!(!node.has_more_children);
    }

    #[test]
    fn test_failed_envelope_maps_to_transport() {
        let err = HttpFolderSource::parse_envelope(
            r#"{"success": false, "data": [], "message": "Folder not found"}"#,
        )
        .unwrap_err();
        assert_eq!(err, ExplorerError::Transport("Folder not found".into()));
    }

    #[test]
    fn test_status_mapping() {
        let body = r#"{"success": false, "data": [], "message": "Folder not found"}"#;
        let err = HttpFolderSource::check_status(StatusCode::NOT_FOUND, body).unwrap_err();
        assert_eq!(err, ExplorerError::NotFound("Folder not found".into()));

        let err = HttpFolderSource::check_status(StatusCode::INTERNAL_SERVER_ERROR, "").unwrap_err();
        assert_eq!(
            err,
            ExplorerError::Transport("500: Internal Server Error".into())
        );

        assert!(HttpFolderSource::check_status(StatusCode::OK, "{}").is_ok());
    }

    #[test]
    fn test_create_body_omits_missing_parent() {
        let body = CreateBody { name: "docs", parent_id: None };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"name":"docs"}"#);

        let body = CreateBody { name: "docs", parent_id: Some("f1") };
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"name":"docs","parentId":"f1"}"#
        );
    }
}
