//! Inbound inquiries and their review status.

pub mod client;
pub mod types;

pub use client::InquiryClient;
pub use types::{Inquiry, InquiryStatus, StatusFilter};
