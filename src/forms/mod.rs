//! Dashboard forms built on the schema layer.
//!
//! - [`business_info`]: the intake schema and its typed record
//! - [`submit`]: validate-then-upsert flow against the profile store

pub mod business_info;
pub mod submit;

pub use business_info::{
    business_info, business_info_schema, parse_business_info, BusinessInfoSchema,
    BusinessProfile, FulfillmentType, OfferRecord, OfferType, RetentionModel, RevenueBand,
    TrafficSource,
};
pub use submit::{BusinessInfoForm, ProfileStore, SubmitError};
