//! Service settings and the per-user or per-household values chosen for them.

use hearth_shared::models::{
    ServiceSetting, ServiceSettingConfiguration, ServiceSettingConfigurationCreationRequestInput,
    ServiceSettingConfigurationUpdateRequestInput, ServiceSettingCreationRequestInput,
};
use hearth_shared::{ListQuery, Page, Result};

use crate::client::HearthClient;
use crate::dispatcher::{ApiRequest, Dispatcher, RequestContext};

const CONFIGURATION: &str = "settings/configurations/{serviceSettingConfigurationID}";

impl<D: Dispatcher> HearthClient<D> {
    pub async fn list_service_settings(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Page<ServiceSetting>> {
        self.fetch_page(ctx, ApiRequest::list("settings", query), query.include_archived)
            .await
    }

    pub async fn search_service_settings(
        &self,
        ctx: &RequestContext,
        text: &str,
        query: &ListQuery,
    ) -> Result<Page<ServiceSetting>> {
        let request = ApiRequest::list("settings/search", query).param("q", text);
        self.fetch_page(ctx, request, query.include_archived).await
    }

    pub async fn get_service_setting(
        &self,
        ctx: &RequestContext,
        setting_id: &str,
    ) -> Result<ServiceSetting> {
        let request = ApiRequest::read("settings/{serviceSettingID}")
            .var("serviceSettingID", setting_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn create_service_setting(
        &self,
        ctx: &RequestContext,
        input: &ServiceSettingCreationRequestInput,
    ) -> Result<ServiceSetting> {
        self.fetch_one(ctx, ApiRequest::create("settings", input)?).await
    }

    pub async fn archive_service_setting(
        &self,
        ctx: &RequestContext,
        setting_id: &str,
    ) -> Result<()> {
        let request = ApiRequest::archive("settings/{serviceSettingID}")
            .var("serviceSettingID", setting_id);
        self.acknowledge(ctx, request).await
    }

    // -- Configurations --

    pub async fn user_setting_configurations(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Page<ServiceSettingConfiguration>> {
        self.fetch_page(
            ctx,
            ApiRequest::list("settings/configurations/user", query),
            query.include_archived,
        )
        .await
    }

    pub async fn household_setting_configurations(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Page<ServiceSettingConfiguration>> {
        let request = ApiRequest::list("settings/configurations/household", query);
        self.fetch_page(ctx, request, query.include_archived).await
    }

    /// The caller's configuration for the setting called `name`.
    pub async fn user_setting_configuration_by_name(
        &self,
        ctx: &RequestContext,
        name: &str,
    ) -> Result<ServiceSettingConfiguration> {
        let request =
            ApiRequest::read("settings/configurations/user/{serviceSettingConfigurationName}")
                .var("serviceSettingConfigurationName", name);
        self.fetch_one(ctx, request).await
    }

    pub async fn create_setting_configuration(
        &self,
        ctx: &RequestContext,
        input: &ServiceSettingConfigurationCreationRequestInput,
    ) -> Result<ServiceSettingConfiguration> {
        self.fetch_one(ctx, ApiRequest::create("settings/configurations", input)?)
            .await
    }

    pub async fn update_setting_configuration(
        &self,
        ctx: &RequestContext,
        configuration_id: &str,
        input: &ServiceSettingConfigurationUpdateRequestInput,
    ) -> Result<ServiceSettingConfiguration> {
        let request =
            ApiRequest::update(CONFIGURATION, input)?
                .var("serviceSettingConfigurationID", configuration_id);
        self.fetch_one(ctx, request).await
    }

    pub async fn archive_setting_configuration(
        &self,
        ctx: &RequestContext,
        configuration_id: &str,
    ) -> Result<()> {
        let request = ApiRequest::archive(CONFIGURATION)
            .var("serviceSettingConfigurationID", configuration_id);
        self.acknowledge(ctx, request).await
    }
}
