//! Client helpers for inbound inquiry endpoints.

use crate::{
    config::ApiPaths,
    errors::AppError,
    gateway::{Method, Payload, RequestGateway, decode, ensure_success},
    inquiries::types::{
        Inquiry, InquiryListResponse, InquiryResponse, InquiryStatus, StatusUpdate,
    },
};

#[derive(Clone, Debug)]
pub struct InquiryClient {
    gateway: RequestGateway,
    paths: ApiPaths,
}

impl InquiryClient {
    #[must_use]
    pub const fn new(gateway: RequestGateway, paths: ApiPaths) -> Self {
        Self { gateway, paths }
    }

    /// Fetches all inquiries.
    ///
    /// # Errors
    /// Returns the normalized gateway failure, or `AppError::Parse` on an unexpected shape.
    pub async fn list(&self) -> Result<Vec<Inquiry>, AppError> {
        let body = self
            .gateway
            .send(&self.paths.list_inquiries, Method::Get, Payload::empty())
            .await?;
        let body = ensure_success(body, 200, "Failed to load inquiries.")?;
        Ok(decode::<InquiryListResponse>(body)?.into_inquiries())
    }

    /// Moves an inquiry to a new status and returns the updated record.
    ///
    /// # Errors
    /// Returns `AppError::Input` for an invalid id, otherwise the normalized gateway failure.
    pub async fn update_status(&self, id: &str, status: InquiryStatus) -> Result<Inquiry, AppError> {
        let path = ApiPaths::resolve(&self.paths.update_inquiry, id)?;
        let payload = Payload::json(&StatusUpdate { status }).map_err(|err| {
            AppError::Serialization(format!("Failed to encode status update: {err}"))
        })?;

        let body = self.gateway.send(&path, Method::Put, payload).await?;
        let body = ensure_success(body, 200, "Failed to update inquiry status.")?;
        Ok(decode::<InquiryResponse>(body)?.into_inquiry())
    }
}
