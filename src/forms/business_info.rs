//! The business-information intake form.
//!
//! Clients describe their business and up to three offers. The payload is
//! checked structurally and decoded into [`BusinessProfile`]. The offer
//! naming rules run on the `offers` array as soon as it is well-formed, so
//! they are reported alongside issues in sibling fields.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::path::IssuePath;
use crate::schema::{
    Decode, EnumSchema, ObjectSchema, RefinementCtx, Schema, SchemaExt, SchemaLike,
};
use crate::ParseResult;

/// Maximum length of the core promise, in characters.
pub const CORE_PROMISE_MAX_LEN: usize = 120;

/// Number of offer slots on the form.
pub const OFFER_SLOTS: usize = 3;

/// Shown when the core promise is empty.
pub const CORE_PROMISE_REQUIRED: &str = "Core promise is required";
/// Shown when the core promise exceeds [`CORE_PROMISE_MAX_LEN`].
pub const CORE_PROMISE_TOO_LONG: &str = "Core promise must be 120 characters or fewer";
/// Shown when the average transaction value is below zero.
pub const AVG_TXN_VALUE_NEGATIVE: &str = "Average transaction value must be a nonnegative number";
/// Shown when an offer's price point is below zero.
pub const PRICE_POINT_NEGATIVE: &str = "Price point must be a nonnegative number";
/// Shown when `offers` does not hold exactly [`OFFER_SLOTS`] records.
pub const OFFERS_COUNT: &str = "Exactly three offers are required";
/// Shown when the slot-1 offer has no name.
pub const SLOT_ONE_NAME_REQUIRED: &str = "Offer 1 name is required";
/// Shown when a later offer has details but no name.
pub const OFFER_NAME_REQUIRED: &str = "Name this offer or clear its other fields";

macro_rules! form_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $value)]
                #[allow(missing_docs)]
                $variant,
            )+
        }

        impl $name {
            /// Every option, in the order the form lists them.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The wire value stored in the database.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }

            /// Enum schema accepting exactly the wire values.
            pub fn schema() -> EnumSchema {
                Schema::enum_(Self::ALL.iter().map(|v| v.as_str()))
            }
        }
    };
}

form_enum! {
    /// What the business primarily sells.
    OfferType {
        Coaching => "coaching",
        Consulting => "consulting",
        Course => "course",
        Community => "community",
        Agency => "agency",
        DoneForYou => "done_for_you",
        Other => "other",
    }
}

form_enum! {
    /// Trailing-twelve-month revenue band.
    RevenueBand {
        Under250k => "lt_250k",
        From250kTo500k => "250k_500k",
        From500kTo1m => "500k_1m",
        From1mTo3m => "1m_3m",
        Over3m => "3m_plus",
    }
}

form_enum! {
    /// Where most new clients come from.
    TrafficSource {
        OrganicContent => "organic_content",
        PaidAds => "paid_ads",
        Referrals => "referrals",
        Outbound => "outbound",
        Partnerships => "partnerships",
    }
}

form_enum! {
    /// How clients are kept after the first purchase.
    RetentionModel {
        OneTime => "one_time",
        Subscription => "subscription",
        Retainer => "retainer",
        Cohort => "cohort",
        Ascension => "ascension",
    }
}

form_enum! {
    /// How an offer is delivered.
    FulfillmentType {
        OneOnOne => "one_on_one",
        Group => "group",
        SelfPaced => "self_paced",
        DoneForYou => "done_for_you",
        Hybrid => "hybrid",
    }
}

/// One of the three offer slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferRecord {
    /// Slot number, 1 to 3.
    pub slot: u8,
    /// Offer name; required for slot 1.
    pub name: Option<String>,
    /// Price in dollars, never negative.
    pub price_point: Option<f64>,
    /// How the offer is delivered.
    pub fulfillment_type: Option<FulfillmentType>,
    /// The result a client should expect.
    pub primary_outcome: Option<String>,
}

impl OfferRecord {
    /// True when the name is present and not just whitespace.
    pub fn has_name(&self) -> bool {
        is_filled(self.name.as_deref())
    }

    /// True when any field other than the name is filled in.
    pub fn has_details(&self) -> bool {
        self.price_point.is_some()
            || self.fulfillment_type.is_some()
            || is_filled(self.primary_outcome.as_deref())
    }
}

/// A validated business profile, ready to send to the profile store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    /// What the business primarily sells.
    pub offer_type: OfferType,
    /// One-line promise to clients, 1 to 120 characters.
    pub core_promise: String,
    /// Average transaction value, never negative.
    pub avg_txn_value: Option<f64>,
    /// Trailing-twelve-month revenue band.
    pub revenue_band: RevenueBand,
    /// Main source of new clients.
    pub traffic_source: Option<TrafficSource>,
    /// How clients are retained.
    pub retention_model: Option<RetentionModel>,
    /// Whether an upsell exists after the first purchase.
    pub has_upsell: bool,
    /// Free-form notes; may be empty.
    pub notes: String,
    /// Exactly three offer slots.
    pub offers: Vec<OfferRecord>,
}

/// The full form schema, decoding into [`BusinessProfile`].
pub type BusinessInfoSchema = Decode<ObjectSchema, BusinessProfile>;

static BUSINESS_INFO: LazyLock<BusinessInfoSchema> = LazyLock::new(business_info_schema);

/// Returns the shared business-information schema.
pub fn business_info() -> &'static BusinessInfoSchema {
    &BUSINESS_INFO
}

/// Validates a raw form payload.
pub fn parse_business_info(input: &Value) -> ParseResult<BusinessProfile> {
    business_info().safe_parse(input)
}

/// Builds the business-information schema.
pub fn business_info_schema() -> BusinessInfoSchema {
    Schema::object()
        .field("offer_type", OfferType::schema())
        .field(
            "core_promise",
            Schema::string()
                .min_len(1)
                .error(CORE_PROMISE_REQUIRED)
                .max_len(CORE_PROMISE_MAX_LEN)
                .error(CORE_PROMISE_TOO_LONG),
        )
        .field(
            "avg_txn_value",
            Schema::number()
                .non_negative()
                .error(AVG_TXN_VALUE_NEGATIVE)
                .nullable(),
        )
        .field("revenue_band", RevenueBand::schema())
        .field("traffic_source", TrafficSource::schema().nullable())
        .field("retention_model", RetentionModel::schema().nullable())
        .field("has_upsell", Schema::boolean())
        .field("notes", Schema::string())
        .field(
            "offers",
            Schema::array(offer_schema().decode::<OfferRecord>())
                .length(OFFER_SLOTS)
                .error(OFFERS_COUNT)
                .super_refine(check_offer_names),
        )
        .decode::<BusinessProfile>()
}

fn offer_schema() -> ObjectSchema {
    Schema::object()
        .field(
            "slot",
            Schema::literal(1).or(Schema::literal(2)).or(Schema::literal(3)),
        )
        .field("name", Schema::string().nullable())
        .field(
            "price_point",
            Schema::number()
                .non_negative()
                .error(PRICE_POINT_NEGATIVE)
                .nullable(),
        )
        .field("fulfillment_type", FulfillmentType::schema().nullable())
        .field("primary_outcome", Schema::string().nullable())
}

/// Slot 1 always needs a name; other slots need one once anything is filled.
///
/// Runs on the `offers` array, so paths are relative to it.
#[allow(clippy::ptr_arg)]
fn check_offer_names(offers: &Vec<OfferRecord>, ctx: &mut RefinementCtx) {
    for (index, offer) in offers.iter().enumerate() {
        if offer.has_name() {
            continue;
        }
        let name_path = IssuePath::root().push_index(index).push_key("name");
        if offer.slot == 1 {
            ctx.add_issue_at(&name_path, SLOT_ONE_NAME_REQUIRED);
        } else if offer.has_details() {
            ctx.add_issue_at(&name_path, OFFER_NAME_REQUIRED);
        }
    }
}

fn is_filled(value: Option<&str>) -> bool {
    value.is_some_and(|s| !s.trim().is_empty())
}
