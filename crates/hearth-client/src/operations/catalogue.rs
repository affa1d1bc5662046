//! Server-owned reference data.
//!
//! The seven catalogue kinds share one set of generic operations, keyed by
//! [`CatalogueRecord`]. Reads by id can go through the client's
//! [`CatalogueCache`](crate::cache::CatalogueCache); writes invalidate it.

use serde::Serialize;
use tracing::debug;

use hearth_shared::models::{
    ValidIngredient, ValidIngredientCreationRequestInput, ValidIngredientMeasurementUnit,
    ValidIngredientMeasurementUnitCreationRequestInput,
    ValidIngredientMeasurementUnitUpdateRequestInput, ValidIngredientState,
    ValidIngredientStateCreationRequestInput, ValidIngredientStateUpdateRequestInput,
    ValidIngredientUpdateRequestInput, ValidInstrument, ValidInstrumentCreationRequestInput,
    ValidInstrumentUpdateRequestInput, ValidMeasurementUnit,
    ValidMeasurementUnitCreationRequestInput, ValidMeasurementUnitUpdateRequestInput,
    ValidPreparation, ValidPreparationCreationRequestInput, ValidPreparationUpdateRequestInput,
    ValidVessel, ValidVesselCreationRequestInput, ValidVesselUpdateRequestInput,
};
use hearth_shared::{EncodingError, ListQuery, Page, Record, Result};

use crate::client::HearthClient;
use crate::dispatcher::{ApiRequest, Dispatcher, RequestContext};

/// Routing and input shapes of one catalogue kind.
pub trait CatalogueRecord: Record + Clone {
    /// Collection path, e.g. `valid_ingredients`
    const COLLECTION: &'static str;
    /// Item path with one placeholder named [`ID_VAR`](Self::ID_VAR)
    const ITEM: &'static str;
    const ID_VAR: &'static str;
    /// Search path, when the kind can be searched by name
    const SEARCH: Option<&'static str>;

    type Creation: Serialize + Send + Sync;
    type Update: Serialize + Send + Sync;
}

macro_rules! catalogue_record {
    ($ty:ty, $collection:literal, $id_var:literal, $search:expr, $creation:ty, $update:ty) => {
        impl CatalogueRecord for $ty {
            const COLLECTION: &'static str = $collection;
            const ITEM: &'static str = concat!($collection, "/{", $id_var, "}");
            const ID_VAR: &'static str = $id_var;
            const SEARCH: Option<&'static str> = $search;

            type Creation = $creation;
            type Update = $update;
        }
    };
}

catalogue_record!(
    ValidIngredient,
    "valid_ingredients",
    "validIngredientID",
    Some("valid_ingredients/search"),
    ValidIngredientCreationRequestInput,
    ValidIngredientUpdateRequestInput
);
catalogue_record!(
    ValidMeasurementUnit,
    "valid_measurement_units",
    "validMeasurementUnitID",
    Some("valid_measurement_units/search"),
    ValidMeasurementUnitCreationRequestInput,
    ValidMeasurementUnitUpdateRequestInput
);
catalogue_record!(
    ValidPreparation,
    "valid_preparations",
    "validPreparationID",
    Some("valid_preparations/search"),
    ValidPreparationCreationRequestInput,
    ValidPreparationUpdateRequestInput
);
catalogue_record!(
    ValidInstrument,
    "valid_instruments",
    "validInstrumentID",
    Some("valid_instruments/search"),
    ValidInstrumentCreationRequestInput,
    ValidInstrumentUpdateRequestInput
);
catalogue_record!(
    ValidVessel,
    "valid_vessels",
    "validVesselID",
    Some("valid_vessels/search"),
    ValidVesselCreationRequestInput,
    ValidVesselUpdateRequestInput
);
catalogue_record!(
    ValidIngredientMeasurementUnit,
    "valid_ingredient_measurement_units",
    "validIngredientMeasurementUnitID",
    None,
    ValidIngredientMeasurementUnitCreationRequestInput,
    ValidIngredientMeasurementUnitUpdateRequestInput
);
catalogue_record!(
    ValidIngredientState,
    "valid_ingredient_states",
    "validIngredientStateID",
    Some("valid_ingredient_states/search"),
    ValidIngredientStateCreationRequestInput,
    ValidIngredientStateUpdateRequestInput
);

impl<D: Dispatcher> HearthClient<D> {
    pub async fn list_catalogue<T: CatalogueRecord>(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Page<T>> {
        self.fetch_page(ctx, ApiRequest::list(T::COLLECTION, query), query.include_archived)
            .await
    }

    /// Search a catalogue kind by name.
    pub async fn search_catalogue<T: CatalogueRecord>(
        &self,
        ctx: &RequestContext,
        text: &str,
        query: &ListQuery,
    ) -> Result<Page<T>> {
        let path = T::SEARCH.ok_or_else(|| {
            EncodingError::InvalidRequest(format!("{} cannot be searched", T::KIND))
        })?;
        let request = ApiRequest::list(path, query).param("q", text);
        self.fetch_page(ctx, request, query.include_archived).await
    }

    /// Read from the server and refresh the cached copy.
    pub async fn get_catalogue<T: CatalogueRecord>(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<T> {
        let record: T = self
            .fetch_one(ctx, ApiRequest::read(T::ITEM).var(T::ID_VAR, id))
            .await?;
        self.cache().insert(&record).await;
        Ok(record)
    }

    /// Serve from the cache, fetching on a miss.
    pub async fn cached_catalogue<T: CatalogueRecord>(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<T> {
        if let Some(record) = self.cache().get::<T>(id).await {
            return Ok(record);
        }
        debug!(kind = T::KIND, id, "Catalogue cache miss");
        self.get_catalogue(ctx, id).await
    }

    pub async fn create_catalogue<T: CatalogueRecord>(
        &self,
        ctx: &RequestContext,
        input: &T::Creation,
    ) -> Result<T> {
        self.fetch_one(ctx, ApiRequest::create(T::COLLECTION, input)?)
            .await
    }

    pub async fn update_catalogue<T: CatalogueRecord>(
        &self,
        ctx: &RequestContext,
        id: &str,
        input: &T::Update,
    ) -> Result<T> {
        let request = ApiRequest::update(T::ITEM, input)?.var(T::ID_VAR, id);
        self.cache().invalidate::<T>(id).await;
        let record: T = self.fetch_one(ctx, request).await?;
        self.cache().insert(&record).await;
        Ok(record)
    }

    pub async fn archive_catalogue<T: CatalogueRecord>(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<()> {
        self.cache().invalidate::<T>(id).await;
        self.acknowledge(ctx, ApiRequest::archive(T::ITEM).var(T::ID_VAR, id))
            .await
    }

    pub async fn measurement_units_for_ingredient(
        &self,
        ctx: &RequestContext,
        ingredient_id: &str,
        query: &ListQuery,
    ) -> Result<Page<ValidMeasurementUnit>> {
        let request = ApiRequest::list(
            "valid_measurement_units/by_ingredient/{validIngredientID}",
            query,
        )
        .var("validIngredientID", ingredient_id);
        self.fetch_page(ctx, request, query.include_archived).await
    }

    pub async fn ingredients_for_preparation(
        &self,
        ctx: &RequestContext,
        preparation_id: &str,
        query: &ListQuery,
    ) -> Result<Page<ValidIngredient>> {
        let request =
            ApiRequest::list("valid_ingredients/by_preparation/{validPreparationID}", query)
                .var("validPreparationID", preparation_id);
        self.fetch_page(ctx, request, query.include_archived).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockDispatcher;
    use hearth_shared::{fixtures, ServerErrorKind};

    #[test]
    fn test_item_paths() {
        assert_eq!(ValidIngredient::ITEM, "valid_ingredients/{validIngredientID}");
        assert_eq!(
            ValidIngredientMeasurementUnit::ITEM,
            "valid_ingredient_measurement_units/{validIngredientMeasurementUnitID}"
        );
        assert_eq!(ValidIngredientMeasurementUnit::SEARCH, None);
    }

    #[tokio::test]
    async fn test_cached_read_hits_network_once() {
        let mock = MockDispatcher::new();
        mock.respond(200, fixtures::ok(fixtures::valid_ingredient("vi_1")));
        let client = HearthClient::new(mock);
        let ctx = RequestContext::default();

        let first: ValidIngredient = client.cached_catalogue(&ctx, "vi_1").await.unwrap();
        let second: ValidIngredient = client.cached_catalogue(&ctx, "vi_1").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(client.dispatcher().requests().len(), 1);
        assert_eq!(
            client.dispatcher().last_request().target,
            "/api/v1/valid_ingredients/vi_1"
        );
    }

    #[tokio::test]
    async fn test_archive_invalidates_cache() {
        let mock = MockDispatcher::new();
        mock.respond(200, fixtures::ok(fixtures::valid_instrument("vin_1")));
        mock.respond(200, fixtures::ok(serde_json::json!({})));
        let client = HearthClient::new(mock);
        let ctx = RequestContext::default();

        client.get_catalogue::<ValidInstrument>(&ctx, "vin_1").await.unwrap();
        assert_eq!(client.cache().len().await, 1);

        client.archive_catalogue::<ValidInstrument>(&ctx, "vin_1").await.unwrap();
        assert!(client.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_failed_update_leaves_no_stale_entry() {
        let mock = MockDispatcher::new();
        mock.respond(200, fixtures::ok(fixtures::valid_preparation("vp_1")));
        mock.respond(
            422,
            fixtures::error("validation_failed", "name required", Some("name")),
        );
        let client = HearthClient::new(mock);
        let ctx = RequestContext::default();

        client.get_catalogue::<ValidPreparation>(&ctx, "vp_1").await.unwrap();
        let input = ValidPreparationUpdateRequestInput {
            name: Some(String::new()),
            ..ValidPreparationUpdateRequestInput::default()
        };
        let err = client
            .update_catalogue::<ValidPreparation>(&ctx, "vp_1", &input)
            .await
            .unwrap_err();

        assert_eq!(err.server_kind(), Some(ServerErrorKind::ValidationFailed));
        assert!(client.cache().get::<ValidPreparation>("vp_1").await.is_none());
    }

    #[tokio::test]
    async fn test_search_sends_query_text() {
        let mock = MockDispatcher::new();
        mock.respond(200, fixtures::page(vec![fixtures::valid_measurement_unit("vmu_1")]));
        let client = HearthClient::new(mock);

        let page: Page<ValidMeasurementUnit> = client
            .search_catalogue(&RequestContext::default(), "cup", &ListQuery::default())
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        assert!(client
            .dispatcher()
            .last_request()
            .target
            .starts_with("/api/v1/valid_measurement_units/search?page=1"));
        assert!(client.dispatcher().last_request().target.ends_with("&q=cup"));
    }

    #[tokio::test]
    async fn test_search_unsupported_kind() {
        let client = HearthClient::new(MockDispatcher::new());
        let err = client
            .search_catalogue::<ValidIngredientMeasurementUnit>(
                &RequestContext::default(),
                "x",
                &ListQuery::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            hearth_shared::HearthError::Encoding(EncodingError::InvalidRequest(_))
        ));
    }
}
