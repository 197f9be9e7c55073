//! Client helpers for listing endpoints. Paths come from [`ApiPaths`] and ids
//! are validated before any request is sent; authorization is enforced by
//! the backend.

use crate::{
    config::ApiPaths,
    errors::AppError,
    gateway::{Method, Payload, RequestGateway, decode, ensure_success},
    properties::types::{
        Acknowledgement, Property, PropertyForm, PropertyListResponse, PropertyResponse,
    },
};
use serde_json::json;

#[derive(Clone, Debug)]
pub struct PropertyClient {
    gateway: RequestGateway,
    paths: ApiPaths,
}

impl PropertyClient {
    #[must_use]
    pub const fn new(gateway: RequestGateway, paths: ApiPaths) -> Self {
        Self { gateway, paths }
    }

    /// Fetches every listing.
    ///
    /// # Errors
    /// Returns the normalized gateway failure, or `AppError::Parse` on an unexpected shape.
    pub async fn list(&self) -> Result<Vec<Property>, AppError> {
        let body = self
            .gateway
            .send(&self.paths.list_properties, Method::Get, Payload::empty())
            .await?;
        let body = ensure_success(body, 200, "Failed to load properties.")?;
        Ok(decode::<PropertyListResponse>(body)?.into_properties())
    }

    /// Fetches one listing by id.
    ///
    /// # Errors
    /// Returns `AppError::Input` for an invalid id, otherwise the normalized gateway failure.
    pub async fn get(&self, id: &str) -> Result<Property, AppError> {
        let path = ApiPaths::resolve(&self.paths.get_property, id)?;
        let body = self
            .gateway
            .send(&path, Method::Get, Payload::empty())
            .await?;
        let body = ensure_success(body, 200, "Failed to load property.")?;
        Ok(decode::<PropertyResponse>(body)?.into_property())
    }

    /// Creates a listing from a complete form including its image.
    ///
    /// # Errors
    /// Returns `AppError::Input` when required fields are missing, otherwise the
    /// normalized gateway failure.
    pub async fn create(&self, form: &PropertyForm) -> Result<Acknowledgement, AppError> {
        form.validate_for_create()?;
        let payload = Payload::Multipart(form.to_create_multipart());
        self.mutate(&self.paths.create_property, Method::Post, payload, "Failed to add property.")
            .await
    }

    /// Updates a listing. Only non-empty fields are sent; the image is optional.
    ///
    /// # Errors
    /// Returns `AppError::Input` for an invalid id, otherwise the normalized gateway failure.
    pub async fn update(&self, id: &str, form: &PropertyForm) -> Result<Acknowledgement, AppError> {
        let path = ApiPaths::resolve(&self.paths.update_property, id)?;
        let payload = Payload::Multipart(form.to_multipart());
        self.mutate(&path, Method::Put, payload, "Failed to update property.")
            .await
    }

    /// Deletes a listing.
    ///
    /// # Errors
    /// Returns `AppError::Input` for an invalid id, otherwise the normalized gateway failure.
    pub async fn delete(&self, id: &str) -> Result<Acknowledgement, AppError> {
        let path = ApiPaths::resolve(&self.paths.delete_property, id)?;
        self.mutate(&path, Method::Delete, Payload::empty(), "Failed to delete property.")
            .await
    }

    /// Full-text search over listings.
    ///
    /// # Errors
    /// Returns `AppError::Input` for a blank query, otherwise the normalized gateway failure.
    pub async fn search(&self, query: &str) -> Result<Vec<Property>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::Input("A search query is required.".to_string()));
        }

        let body = self
            .gateway
            .send(
                &self.paths.search_properties,
                Method::Get,
                Payload::Json(json!({ "query": query })),
            )
            .await?;
        let body = ensure_success(body, 200, "Search failed.")?;
        Ok(decode::<PropertyListResponse>(body)?.into_properties())
    }

    /// Records the current user's interest in a listing.
    ///
    /// # Errors
    /// Returns `AppError::Input` for an invalid id, otherwise the normalized gateway failure.
    pub async fn mark_interested(&self, id: &str) -> Result<Acknowledgement, AppError> {
        let path = ApiPaths::resolve(&self.paths.mark_interested, id)?;
        self.mutate(&path, Method::Put, Payload::empty(), "Failed to register interest.")
            .await
    }

    async fn mutate(
        &self,
        path: &str,
        method: Method,
        payload: Payload,
        fallback: &str,
    ) -> Result<Acknowledgement, AppError> {
        let body = self.gateway.send(path, method, payload).await?;
        let body = ensure_success(body, 200, fallback)?;
        if body.is_null() {
            return Ok(Acknowledgement {
                success: true,
                message: None,
            });
        }
        decode(body)
    }
}
