use crate::{errors::AppError, session::RecordId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InquiryStatus {
    Pending,
    Resolved,
    Archived,
}

impl InquiryStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Resolved => "Resolved",
            Self::Archived => "Archived",
        }
    }
}

impl fmt::Display for InquiryStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for InquiryStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "resolved" => Ok(Self::Resolved),
            "archived" => Ok(Self::Archived),
            other => Err(AppError::Input(format!(
                "Unknown inquiry status '{other}'. Expected Pending, Resolved or Archived."
            ))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    #[serde(alias = "_id")]
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: String,
    /// Status as sent by the backend; see [`Inquiry::status`] for the parsed form.
    #[serde(rename = "status", default)]
    pub raw_status: String,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Inquiry {
    /// The known status, or `None` when the backend sent a value this client
    /// does not recognize.
    #[must_use]
    pub fn status(&self) -> Option<InquiryStatus> {
        self.raw_status.parse().ok()
    }
}

/// Client-side view filter over a fetched inquiry list. Inquiries with an
/// unrecognized status only pass `All`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(InquiryStatus),
}

impl StatusFilter {
    #[must_use]
    pub fn matches(self, inquiry: &Inquiry) -> bool {
        match self {
            Self::All => true,
            Self::Only(status) => inquiry.status() == Some(status),
        }
    }

    #[must_use]
    pub fn apply(self, inquiries: Vec<Inquiry>) -> Vec<Inquiry> {
        inquiries
            .into_iter()
            .filter(|inquiry| self.matches(inquiry))
            .collect()
    }
}

impl FromStr for StatusFilter {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            value.parse().map(Self::Only)
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum InquiryListResponse {
    Wrapped { data: Vec<Inquiry> },
    Bare(Vec<Inquiry>),
}

impl InquiryListResponse {
    pub fn into_inquiries(self) -> Vec<Inquiry> {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum InquiryResponse {
    Wrapped { data: Inquiry },
    Bare(Inquiry),
}

impl InquiryResponse {
    pub fn into_inquiry(self) -> Inquiry {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

#[derive(Serialize)]
pub(crate) struct StatusUpdate {
    pub status: InquiryStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn inquiry(id: &str, status: &str) -> Inquiry {
        serde_json::from_value(json!({
            "_id": id,
            "name": "Ana",
            "email": "ana@example.com",
            "message": "Is the loft still available?",
            "status": status,
            "createdAt": "2024-05-01T10:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("resolved".parse::<InquiryStatus>().unwrap(), InquiryStatus::Resolved);
        assert_eq!(" Archived ".parse::<InquiryStatus>().unwrap(), InquiryStatus::Archived);
        assert!(matches!("done".parse::<InquiryStatus>(), Err(AppError::Input(_))));
    }

    #[test]
    fn filter_keeps_matching_status() {
        let all = vec![inquiry("1", "Pending"), inquiry("2", "Resolved"), inquiry("3", "Pending")];

        assert_eq!(StatusFilter::All.apply(all.clone()).len(), 3);

        let pending = "pending".parse::<StatusFilter>().unwrap().apply(all);
        let ids: Vec<String> = pending.iter().map(|item| item.id.to_string()).collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert_eq!("ALL".parse::<StatusFilter>().unwrap(), StatusFilter::All);
    }

    #[test]
    fn unknown_status_is_listed_but_not_matched() {
        let parsed: InquiryListResponse = serde_json::from_value(json!({
            "success": true,
            "data": [
                {"_id": "a1", "status": "Pending"},
                {"_id": "a2", "status": "New"}
            ]
        }))
        .unwrap();
        let inquiries = parsed.into_inquiries();
        assert_eq!(inquiries.len(), 2);
        assert_eq!(inquiries[1].status(), None);
        assert_eq!(inquiries[1].raw_status, "New");

        assert_eq!(StatusFilter::All.apply(inquiries.clone()).len(), 2);
        let pending = StatusFilter::Only(InquiryStatus::Pending).apply(inquiries);
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id.to_string(), "a1");

        let rendered = serde_json::to_value(&pending[0]).unwrap();
        assert_eq!(rendered["status"], json!("Pending"));
    }

    #[test]
    fn status_update_serializes_wire_name() {
        let body = serde_json::to_value(StatusUpdate {
            status: InquiryStatus::Resolved,
        })
        .unwrap();
        assert_eq!(body, json!({"status": "Resolved"}));
    }

    #[test]
    fn list_response_reads_data_envelope() {
        let parsed: InquiryListResponse = serde_json::from_value(json!({
            "success": true,
            "data": [{"_id": "a1", "status": "Archived", "propertyId": "p9"}]
        }))
        .unwrap();
        let inquiries = parsed.into_inquiries();
        assert_eq!(inquiries[0].status(), Some(InquiryStatus::Archived));
        assert_eq!(inquiries[0].extra.get("propertyId"), Some(&json!("p9")));
    }
}
