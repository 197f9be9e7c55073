//! Client configuration: one base address for every backend call, the request
//! timeout, the endpoint path convention and the location of the persisted
//! session. Values are supplied externally (CLI flags or env) and are public;
//! do not store secrets here.

use crate::errors::AppError;
use std::{path::PathBuf, time::Duration};
use url::Url;

/// Default request timeout applied to every backend call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
const SESSION_DIR: &str = "estate-admin";
const SESSION_FILE: &str = "session.json";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: Url,
    pub timeout: Duration,
    pub paths: ApiPaths,
    pub session_file: PathBuf,
}

impl AppConfig {
    /// Builds a config around a base URL with default timeout, paths and session file.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the base URL is empty or not an absolute URL.
    pub fn new(api_base_url: &str) -> Result<Self, AppError> {
        Ok(Self {
            api_base_url: parse_base_url(api_base_url)?,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            paths: ApiPaths::latest(),
            session_file: default_session_file(),
        })
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_paths(mut self, paths: ApiPaths) -> Self {
        self.paths = paths;
        self
    }

    #[must_use]
    pub fn with_session_file(mut self, path: PathBuf) -> Self {
        self.session_file = path;
        self
    }
}

/// Parses and normalizes a base URL so joining paths never doubles or drops a slash.
///
/// # Errors
/// Returns `AppError::Config` if the value is blank, unparsable or cannot carry a path.
pub fn parse_base_url(value: &str) -> Result<Url, AppError> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(AppError::Config("API base URL is not configured.".to_string()));
    }

    let url = Url::parse(trimmed)
        .map_err(|err| AppError::Config(format!("Invalid API base URL '{trimmed}': {err}")))?;
    if url.cannot_be_a_base() {
        return Err(AppError::Config(format!(
            "API base URL '{trimmed}' cannot carry a path"
        )));
    }

    Ok(url)
}

/// Joins the configured base with an endpoint path.
#[must_use]
pub fn build_url(base: &Url, endpoint: &str) -> String {
    let base = base.as_str().trim_end_matches('/');
    let endpoint = endpoint.trim().trim_start_matches('/');
    if endpoint.is_empty() {
        base.to_string()
    } else {
        format!("{base}/{endpoint}")
    }
}

/// Session file under the user's config dir, falling back to the working directory.
#[must_use]
pub fn default_session_file() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SESSION_DIR)
        .join(SESSION_FILE)
}

/// Endpoint path templates. `{id}` is substituted by [`ApiPaths::resolve`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiPaths {
    pub login: String,
    pub register: String,
    pub current_user: String,
    pub list_properties: String,
    pub get_property: String,
    pub create_property: String,
    pub update_property: String,
    pub delete_property: String,
    pub search_properties: String,
    pub mark_interested: String,
    pub list_inquiries: String,
    pub update_inquiry: String,
}

impl ApiPaths {
    #[must_use]
    pub fn latest() -> Self {
        Self {
            login: "/users/login".to_string(),
            register: "/users/register".to_string(),
            current_user: "/users/me".to_string(),
            list_properties: "/properties".to_string(),
            get_property: "/properties/{id}".to_string(),
            create_property: "/properties/createProperty".to_string(),
            update_property: "/properties/{id}".to_string(),
            delete_property: "/properties/{id}".to_string(),
            search_properties: "/properties/search".to_string(),
            mark_interested: "/properties/{id}/interested".to_string(),
            list_inquiries: "/inquiries".to_string(),
            update_inquiry: "/inquiries/{id}".to_string(),
        }
    }

    /// Path convention of the earlier backend revision.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            login: "/user/login".to_string(),
            register: "/user/register".to_string(),
            current_user: "/user/getUserInfo".to_string(),
            list_properties: "/properties/getAllProperties".to_string(),
            get_property: "/properties/getPropertyById/{id}".to_string(),
            create_property: "/properties/createProperty".to_string(),
            update_property: "/properties/updateProperty/{id}".to_string(),
            delete_property: "/properties/deleteProperty/{id}".to_string(),
            search_properties: "/properties/search".to_string(),
            mark_interested: "/properties/AddUpdateIntrestedUser/{id}".to_string(),
            list_inquiries: "/inquiries".to_string(),
            update_inquiry: "/inquiries/{id}".to_string(),
        }
    }

    /// Looks up a convention by name (`latest` or `legacy`).
    #[must_use]
    pub fn by_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "latest" => Some(Self::latest()),
            "legacy" => Some(Self::legacy()),
            _ => None,
        }
    }

    /// Substitutes `{id}` in a template after validating the id.
    ///
    /// # Errors
    /// Returns `AppError::Input` if the id is blank, a dot segment, or contains
    /// a path separator, URL delimiter, `%` or whitespace.
    pub fn resolve(template: &str, id: &str) -> Result<String, AppError> {
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(AppError::Input("An id is required.".to_string()));
        }
        let reserved = |c: char| matches!(c, '/' | '?' | '#' | '%' | '\\') || c.is_whitespace();
        if trimmed == "." || trimmed == ".." || trimmed.contains(reserved) {
            return Err(AppError::Input(format!("Invalid id '{trimmed}'.")));
        }
        Ok(template.replace("{id}", trimmed))
    }
}

impl Default for ApiPaths {
    fn default() -> Self {
        Self::latest()
    }
}
