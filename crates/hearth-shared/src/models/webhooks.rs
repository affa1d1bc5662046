use serde::{Deserialize, Serialize};

use crate::marshal::{impl_record, null_as_default, LinkMismatch};
use crate::time::Timestamp;

/// An outbound HTTP callback fired on household events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    pub id: String,
    pub name: String,
    pub content_type: String,
    pub url: String,
    pub method: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<WebhookTriggerEvent>,
    pub belongs_to_household: String,
    pub created_at: Timestamp,
    pub last_updated_at: Option<Timestamp>,
    pub archived_at: Option<Timestamp>,
}

impl_record!(Webhook, "webhook", links = event_links);

impl Webhook {
    fn event_links(&self) -> Vec<LinkMismatch> {
        LinkMismatch::check(
            "events",
            &self.id,
            self.events.iter().map(|e| e.belongs_to_webhook.as_str()),
        )
    }

    pub fn fires_on(&self, trigger_event: &str) -> bool {
        self.events
            .iter()
            .any(|e| e.archived_at.is_none() && e.trigger_event == trigger_event)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookTriggerEvent {
    pub id: String,
    pub trigger_event: String,
    pub belongs_to_webhook: String,
    pub created_at: Timestamp,
    pub archived_at: Option<Timestamp>,
}

impl_record!(WebhookTriggerEvent, "webhook trigger event");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookCreationRequestInput {
    pub name: String,
    pub content_type: String,
    pub url: String,
    pub method: String,
    pub events: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookTriggerEventCreationRequestInput {
    pub trigger_event: String,
    pub belongs_to_webhook: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use serde_json::json;

    #[test]
    fn test_archived_trigger_does_not_fire() {
        let mut json = fixtures::webhook("wh_1");
        json["events"][0]["archivedAt"] = json!("2025-02-01T00:00:00Z");
        let webhook: Webhook = serde_json::from_value(json).unwrap();
        assert!(!webhook.fires_on("meal_plan_created"));
        assert!(webhook.fires_on("recipe_created"));
    }

    #[test]
    fn test_webhook_round_trip() {
        let webhook: Webhook = fixtures::assert_round_trip(fixtures::webhook("wh_1"));
        assert_eq!(webhook.events.len(), 2);
    }
}
