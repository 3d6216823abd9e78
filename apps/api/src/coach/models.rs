use serde::{Deserialize, Serialize};

use crate::extract::ExtractionOrigin;

/// One coach submission. The match bio and conversation excerpt are both
/// optional; at least one must be present for the request to mean anything.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoachRequest {
    pub match_bio: Option<String>,
    pub conversation: Option<String>,
    pub tone: Option<String>,
}

impl CoachRequest {
    pub fn has_content(&self) -> bool {
        self.match_bio.as_deref().is_some_and(|s| !s.trim().is_empty())
            || self
                .conversation
                .as_deref()
                .is_some_and(|s| !s.trim().is_empty())
    }
}

/// What the coach pipeline returns: three items per category when the model
/// cooperates, best-effort otherwise, never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachReply {
    pub openers: Vec<String>,
    pub tips: Vec<String>,
    pub follow_ups: Vec<String>,
    pub origin: ExtractionOrigin,
}

/// Wire shape of a structured coach reply.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoachWire {
    pub openers: Vec<String>,
    pub tips: Vec<String>,
    pub follow_ups: Vec<String>,
}

impl CoachWire {
    pub fn is_usable(&self) -> bool {
        !self.openers.is_empty() || !self.tips.is_empty() || !self.follow_ups.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_content_check() {
        assert!(!CoachRequest::default().has_content());
        let with_bio = CoachRequest {
            match_bio: Some("Dog mom, oat-milk latte enthusiast".to_string()),
            ..Default::default()
        };
        assert!(with_bio.has_content());
    }

    #[test]
    fn test_wire_deserializes_camel_case() {
        let wire: CoachWire = serde_json::from_str(
            r#"{"openers": ["Hi!"], "tips": [], "followUps": ["How was the trip?"]}"#,
        )
        .unwrap();
        assert_eq!(wire.openers.len(), 1);
        assert_eq!(wire.follow_ups[0], "How was the trip?");
        assert!(wire.is_usable());
    }
}
