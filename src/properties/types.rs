use crate::{
    errors::AppError,
    gateway::{FilePart, MultipartForm},
    session::RecordId,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;

pub const IMAGE_FIELD: &str = "image";

/// Listing record as returned by the backend. Numeric fields arrive either as
/// numbers or as form strings, so they are kept as raw JSON values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(alias = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub listing_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum PropertyListResponse {
    Wrapped { properties: Vec<Property> },
    Data { data: Vec<Property> },
    Bare(Vec<Property>),
}

impl PropertyListResponse {
    pub fn into_properties(self) -> Vec<Property> {
        match self {
            Self::Wrapped { properties } | Self::Data { data: properties } | Self::Bare(properties) => {
                properties
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum PropertyResponse {
    Wrapped { property: Property },
    Data { data: Property },
    Bare(Property),
}

impl PropertyResponse {
    pub fn into_property(self) -> Property {
        match self {
            Self::Wrapped { property } | Self::Data { data: property } | Self::Bare(property) => {
                property
            }
        }
    }
}

/// Client-side search over a fetched listing set: a case-insensitive
/// substring match on title, city, type, address and description. An empty
/// term keeps everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyFilter {
    term: String,
}

impl PropertyFilter {
    #[must_use]
    pub fn new(term: &str) -> Self {
        Self {
            term: term.trim().to_lowercase(),
        }
    }

    #[must_use]
    pub fn matches(&self, property: &Property) -> bool {
        if self.term.is_empty() {
            return true;
        }
        [
            Some(property.title.as_str()),
            property.city.as_deref(),
            property.listing_type.as_deref(),
            property.address.as_deref(),
            property.description.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&self.term))
    }

    #[must_use]
    pub fn apply(&self, properties: Vec<Property>) -> Vec<Property> {
        properties
            .into_iter()
            .filter(|property| self.matches(property))
            .collect()
    }
}

/// `{success, message}` reply to a mutation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Editable listing fields, sent as a multipart form. Every text field is the
/// raw form value; empty ones are left out of the request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PropertyForm {
    pub title: String,
    pub price: String,
    pub city: String,
    pub listing_type: String,
    pub address: String,
    pub description: String,
    pub bedroom: String,
    pub bathroom: String,
    pub size: String,
    pub area: String,
    pub year: String,
    pub zip_code: String,
    pub city_area: String,
    pub state: String,
    pub country: String,
    /// Left out of updates when unset; creation sends zero instead.
    pub garage: Option<u32>,
    pub image: Option<FilePart>,
}

impl PropertyForm {
    /// Checks the fields a new listing cannot be created without.
    ///
    /// # Errors
    /// Returns `AppError::Input` naming the missing fields.
    pub fn validate_for_create(&self) -> Result<(), AppError> {
        let required = [
            ("title", &self.title),
            ("price", &self.price),
            ("city", &self.city),
            ("type", &self.listing_type),
            ("address", &self.address),
        ];
        let mut missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if self.image.is_none() {
            missing.push(IMAGE_FIELD);
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Input(format!(
                "Missing required fields: {}.",
                missing.join(", ")
            )))
        }
    }

    /// Encodes a new listing. A missing `garage` is sent as zero.
    #[must_use]
    pub fn to_create_multipart(&self) -> MultipartForm {
        self.encode(Some(self.garage.unwrap_or(0)))
    }

    /// Encodes only the fields that are set, for an update.
    #[must_use]
    pub fn to_multipart(&self) -> MultipartForm {
        self.encode(self.garage)
    }

    fn encode(&self, garage: Option<u32>) -> MultipartForm {
        let text_fields = [
            ("title", &self.title),
            ("price", &self.price),
            ("city", &self.city),
            ("description", &self.description),
            ("type", &self.listing_type),
            ("address", &self.address),
            ("size", &self.size),
            ("area", &self.area),
            ("bedroom", &self.bedroom),
            ("bathroom", &self.bathroom),
            ("year", &self.year),
            ("zip_code", &self.zip_code),
            ("city_area", &self.city_area),
            ("state", &self.state),
            ("country", &self.country),
        ];

        let mut form = text_fields
            .iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .fold(MultipartForm::new(), |form, (name, value)| {
                form.text(*name, value.trim())
            });

        if let Some(garage) = garage {
            form = form.text("garage", garage.to_string());
        }

        if let Some(image) = &self.image {
            form = form.file(image.clone());
        }
        form
    }
}

/// Wraps image bytes as the form's `image` part, guessing the MIME type from
/// the file extension.
#[must_use]
pub fn image_part(file_name: &str, bytes: Vec<u8>) -> FilePart {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let mime = match extension.as_deref() {
        Some("jpg" | "jpeg") => Some("image/jpeg"),
        Some("png") => Some("image/png"),
        Some("gif") => Some("image/gif"),
        Some("webp") => Some("image/webp"),
        _ => None,
    };

    FilePart {
        field: IMAGE_FIELD.to_string(),
        file_name: file_name.to_string(),
        mime: mime.map(str::to_string),
        bytes,
    }
}
