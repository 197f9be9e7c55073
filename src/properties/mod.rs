//! Property listings: browse, search, create, edit, delete and interest
//! tracking. Create and update travel as multipart forms so the listing image
//! can be uploaded alongside its fields.

pub mod client;
pub mod types;

pub use client::PropertyClient;
pub use types::{Acknowledgement, Property, PropertyFilter, PropertyForm, image_part};
