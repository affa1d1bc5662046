use chrono::Utc;
use tracing::debug;

use hearth_shared::invite::InvitationAction;
use hearth_shared::models::{
    HouseholdInvitation, HouseholdInvitationCreationRequestInput,
    HouseholdInvitationUpdateRequestInput,
};
use hearth_shared::{ListQuery, Page, Result};

use crate::client::HearthClient;
use crate::dispatcher::{ApiRequest, Dispatcher, Method, RequestBody, RequestContext};

impl<D: Dispatcher> HearthClient<D> {
    pub async fn invite_to_household(
        &self,
        ctx: &RequestContext,
        household_id: &str,
        input: &HouseholdInvitationCreationRequestInput,
    ) -> Result<HouseholdInvitation> {
        let request =
            ApiRequest::create("households/{householdID}/invite", input)?
                .var("householdID", household_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn get_household_invitation(
        &self,
        ctx: &RequestContext,
        invitation_id: &str,
    ) -> Result<HouseholdInvitation> {
        let request = ApiRequest::read("household_invitations/{householdInvitationID}")
            .var("householdInvitationID", invitation_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn list_sent_invitations(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Page<HouseholdInvitation>> {
        self.fetch_page(
            ctx,
            ApiRequest::list("household_invitations/sent", query),
            query.include_archived,
        )
        .await
    }

    pub async fn list_received_invitations(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Page<HouseholdInvitation>> {
        self.fetch_page(
            ctx,
            ApiRequest::list("household_invitations/received", query),
            query.include_archived,
        )
        .await
    }

    pub async fn accept_household_invitation(
        &self,
        ctx: &RequestContext,
        invitation: &HouseholdInvitation,
        input: &HouseholdInvitationUpdateRequestInput,
    ) -> Result<()> {
        self.act_on_invitation(ctx, invitation, InvitationAction::Accept, input)
            .await
    }

    pub async fn reject_household_invitation(
        &self,
        ctx: &RequestContext,
        invitation: &HouseholdInvitation,
        input: &HouseholdInvitationUpdateRequestInput,
    ) -> Result<()> {
        self.act_on_invitation(ctx, invitation, InvitationAction::Reject, input)
            .await
    }

    pub async fn cancel_household_invitation(
        &self,
        ctx: &RequestContext,
        invitation: &HouseholdInvitation,
        input: &HouseholdInvitationUpdateRequestInput,
    ) -> Result<()> {
        self.act_on_invitation(ctx, invitation, InvitationAction::Cancel, input)
            .await
    }

    /// Refuses locally when the held invitation can no longer take `action`.
    async fn act_on_invitation(
        &self,
        ctx: &RequestContext,
        invitation: &HouseholdInvitation,
        action: InvitationAction,
        input: &HouseholdInvitationUpdateRequestInput,
    ) -> Result<()> {
        let target = invitation.check(action, Utc::now())?;
        debug!(
            invitation = %invitation.id,
            action = action.as_str(),
            target = %target,
            "Invitation transition allowed locally"
        );

        let template = match action {
            InvitationAction::Accept => "household_invitations/{householdInvitationID}/accept",
            InvitationAction::Reject => "household_invitations/{householdInvitationID}/reject",
            InvitationAction::Cancel => "household_invitations/{householdInvitationID}/cancel",
        };
        let request = ApiRequest::action(Method::Put, template)
            .var("householdInvitationID", invitation.id.as_str())
            .body(RequestBody::action(input)?);
        self.acknowledge(ctx, request).await
    }
}

#[cfg(test)]
mod tests {
    use crate::dispatcher::{BodyKind, Method};
    use crate::testing::MockDispatcher;
    use crate::{HearthClient, RequestContext};
    use hearth_shared::models::{HouseholdInvitation, HouseholdInvitationUpdateRequestInput};
    use hearth_shared::{fixtures, EncodingError, HearthError};
    use serde_json::json;

    fn invitation(status: &str) -> HouseholdInvitation {
        let mut value = fixtures::invitation("inv_1", status);
        value["expiresAt"] = json!("2999-01-01T00:00:00Z");
        serde_json::from_value(value).unwrap()
    }

    fn input() -> HouseholdInvitationUpdateRequestInput {
        HouseholdInvitationUpdateRequestInput {
            token: "tok".into(),
            note: "see you soon".into(),
        }
    }

    #[tokio::test]
    async fn test_accepting_accepted_invitation_never_dispatches() {
        let client = HearthClient::new(MockDispatcher::new());

        let err = client
            .accept_household_invitation(
                &RequestContext::default(),
                &invitation("accepted"),
                &input(),
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            HearthError::Encoding(EncodingError::IllegalTransition { ref from, ref action, .. })
                if from == "accepted" && action == "accept"
        ));
        assert!(client.dispatcher().requests().is_empty());
    }

    #[tokio::test]
    async fn test_expired_invitation_cannot_be_cancelled() {
        let mut value = fixtures::invitation("inv_1", "pending");
        value["expiresAt"] = json!("2000-01-01T00:00:00Z");
        let stale: HouseholdInvitation = serde_json::from_value(value).unwrap();
        let client = HearthClient::new(MockDispatcher::new());

        let err = client
            .cancel_household_invitation(&RequestContext::default(), &stale, &input())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            HearthError::Encoding(EncodingError::IllegalTransition { .. })
        ));
        assert!(client.dispatcher().requests().is_empty());
    }

    #[tokio::test]
    async fn test_reject_pending_invitation() {
        let mock = MockDispatcher::new();
        mock.respond(200, fixtures::ok(json!({})));
        let client = HearthClient::new(mock);

        client
            .reject_household_invitation(
                &RequestContext::default(),
                &invitation("pending"),
                &input(),
            )
            .await
            .unwrap();

        let sent = client.dispatcher().last_request();
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.target, "/api/v1/household_invitations/inv_1/reject");
        assert_eq!(sent.body_kind, Some(BodyKind::Action));
        assert_eq!(sent.body, Some(json!({"token": "tok", "note": "see you soon"})));
    }
}
