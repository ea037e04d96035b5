//! Wire contract of the update-idea function: the invocation event it
//! receives and the response it returns.

use serde::{Deserialize, Serialize};

use crate::types::{IdeaId, UserId};

/// Top-level invocation event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationEvent {
    pub ctx: InvocationContext,
}

/// Resolver context: who is calling and with which arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationContext {
    /// Caller identity resolved by the invoking platform. `None` for
    /// unauthenticated calls.
    #[serde(default)]
    pub identity: Option<Identity>,
    pub arguments: UpdateIdeaArguments,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
}

/// Arguments of an update. Optional fields accept both absence and `null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIdeaArguments {
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    pub idea_id: IdeaId,
    pub idea_owner_id: UserId,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub image_attachments: Option<Vec<String>>,
    #[serde(default)]
    pub file_attachments: Option<Vec<String>>,
    #[serde(default)]
    pub is_private: Option<bool>,
}

impl UpdateIdeaArguments {
    #[must_use]
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn image_attachments(&self) -> &[String] {
        self.image_attachments.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn file_attachments(&self) -> &[String] {
        self.file_attachments.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn is_private(&self) -> bool {
        self.is_private.unwrap_or(false)
    }
}

/// `result` member of the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultStatus {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `idea` member of a successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaRef {
    pub idea_id: IdeaId,
    pub slug: String,
}

/// Response returned to the invoking platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateIdeaResponse {
    pub result: ResultStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idea: Option<IdeaRef>,
}

impl UpdateIdeaResponse {
    #[must_use]
    pub fn success(idea_id: IdeaId, slug: String) -> Self {
        Self {
            result: ResultStatus {
                ok: true,
                error: None,
            },
            idea: Some(IdeaRef { idea_id, slug }),
        }
    }

    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            result: ResultStatus {
                ok: false,
                error: Some(error.into()),
            },
            idea: None,
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.result.ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_event_uses_defaults() {
        let event: InvocationEvent = serde_json::from_value(serde_json::json!({
            "ctx": {
                "identity": {"username": "u1"},
                "arguments": {"title": "T", "ideaId": "i1", "ideaOwnerId": "u1"}
            }
        }))
        .unwrap();

        let args = &event.ctx.arguments;
        assert_eq!(event.ctx.identity.unwrap().username, "u1");
        assert!(args.content.is_none());
        assert!(args.tags().is_empty());
        assert!(args.image_attachments().is_empty());
        assert!(args.file_attachments().is_empty());
        assert!(!args.is_private());
    }

    #[test]
    fn explicit_nulls_mean_absent() {
        let args: UpdateIdeaArguments = serde_json::from_value(serde_json::json!({
            "title": "T", "ideaId": "i1", "ideaOwnerId": "u1",
            "content": null, "tags": null, "imageAttachments": null,
            "fileAttachments": null, "isPrivate": null
        }))
        .unwrap();
        assert!(args.tags().is_empty());
        assert!(!args.is_private());
    }

    #[test]
    fn missing_required_argument_is_rejected() {
        let result: Result<UpdateIdeaArguments, _> =
            serde_json::from_value(serde_json::json!({"title": "T", "ideaId": "i1"}));
        assert!(result.is_err());
    }

    #[test]
    fn success_response_shape() {
        let response = UpdateIdeaResponse::success(IdeaId::new("i1"), "my-idea".into());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"result": {"ok": true}, "idea": {"ideaId": "i1", "slug": "my-idea"}})
        );
    }

    #[test]
    fn failure_response_shape() {
        let response = UpdateIdeaResponse::failure("Too much tags");
        assert!(!response.is_ok());
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            serde_json::json!({"result": {"ok": false, "error": "Too much tags"}})
        );
    }
}
