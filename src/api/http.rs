//! reqwest-backed implementation of the REST service traits

use async_trait::async_trait;
use pedigree_types::{
    FamilyTreeNode, Horse, HorseDetail, HorseId, HorseSearchFilter, Owner, OwnerSearchFilter,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::{horse_query_pairs, owner_query_pairs, HorseApi, OwnerApi};
use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};

/// HTTP client for the horse and owner endpoints
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ApiError::connection(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!("Request to {} failed: {}", self.base_url, e);
            ApiError::connection(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("HTTP {} body: {}", status, body);
            return Err(ApiError::from_response(status.as_u16(), body));
        }
        Ok(response)
    }

    async fn json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl HorseApi for HttpClient {
    async fn search(&self, filter: &HorseSearchFilter) -> ApiResult<Vec<Horse>> {
        let params = horse_query_pairs(filter);
        debug!("GET /horses {:?}", params);
        self.json(self.client.get(self.url("/horses")).query(&params))
            .await
    }

    async fn get_by_id(&self, id: HorseId) -> ApiResult<HorseDetail> {
        debug!("GET /horses/{}", id);
        self.json(self.client.get(self.url(&format!("/horses/{}", id))))
            .await
    }

    async fn create(&self, horse: &HorseDetail) -> ApiResult<HorseDetail> {
        info!("POST /horses name={}", horse.name);
        self.json(self.client.post(self.url("/horses")).json(horse))
            .await
    }

    async fn update(&self, horse: &HorseDetail) -> ApiResult<HorseDetail> {
        let id = horse
            .id
            .ok_or_else(|| ApiError::InvalidRequest("Horse to be updated has no id".to_string()))?;
        info!("PUT /horses/{}", id);
        self.json(
            self.client
                .put(self.url(&format!("/horses/{}", id)))
                .json(horse),
        )
        .await
    }

    async fn delete(&self, id: HorseId) -> ApiResult<()> {
        info!("DELETE /horses/{}", id);
        self.send(self.client.delete(self.url(&format!("/horses/{}", id))))
            .await?;
        Ok(())
    }

    async fn family_tree(&self, id: HorseId, limit: u32) -> ApiResult<FamilyTreeNode> {
        debug!("GET /horses/{}/familyTree?limit={}", id, limit);
        self.json(
            self.client
                .get(self.url(&format!("/horses/{}/familyTree", id)))
                .query(&[("limit", limit)]),
        )
        .await
    }
}

#[async_trait]
impl OwnerApi for HttpClient {
    async fn list_all(&self) -> ApiResult<Vec<Owner>> {
        debug!("GET /owners");
        self.json(self.client.get(self.url("/owners"))).await
    }

    async fn search(&self, filter: &OwnerSearchFilter) -> ApiResult<Vec<Owner>> {
        let params = owner_query_pairs(filter);
        debug!("GET /owners {:?}", params);
        self.json(self.client.get(self.url("/owners")).query(&params))
            .await
    }

    async fn create(&self, owner: &Owner) -> ApiResult<Owner> {
        info!("POST /owners name={}", owner.full_name());
        self.json(self.client.post(self.url("/owners")).json(owner))
            .await
    }
}
