//! Typed representations of the API's resource objects.
//!
//! These are plain data carriers: every field maps one-to-one onto the JSON
//! the service emits (camelCase on the wire). Interpretation lives in the
//! [`Transip`](crate::Transip) facade.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A registered domain.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub name: String,
    /// Transfer authorization code, present for transferable TLDs.
    #[serde(default)]
    pub auth_code: Option<String>,
    pub is_transfer_locked: bool,
    pub registration_date: NaiveDate,
    pub renewal_date: NaiveDate,
    pub is_whitelabel: bool,
    #[serde(default, with = "space_datetime_opt")]
    pub cancellation_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub cancellation_status: Option<String>,
    pub is_dns_only: bool,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A single DNS record of a domain.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DnsEntry {
    pub name: String,
    /// TTL in seconds.
    pub expire: u32,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub content: String,
}

/// WHOIS contact attached to a domain.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoisContact {
    #[serde(rename = "type")]
    pub contact_type: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub company_kvk: Option<String>,
    #[serde(default)]
    pub company_type: Option<String>,
    pub street: String,
    pub number: String,
    pub postal_code: String,
    pub city: String,
    pub phone_number: String,
    #[serde(default)]
    pub fax_number: Option<String>,
    pub email: String,
    pub country: String,
}

/// Whitelabel branding of a domain.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branding {
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub support_email: Option<String>,
    #[serde(default)]
    pub company_url: Option<String>,
    #[serde(default)]
    pub terms_of_usage_url: Option<String>,
    #[serde(default)]
    pub banner_line1: Option<String>,
    #[serde(default)]
    pub banner_line2: Option<String>,
    #[serde(default)]
    pub banner_line3: Option<String>,
}

/// An invoice on the account.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub invoice_number: String,
    pub creation_date: NaiveDate,
    #[serde(default)]
    pub pay_date: Option<NaiveDate>,
    pub due_date: NaiveDate,
    pub invoice_status: String,
    pub currency: String,
    /// Amounts are in cents.
    pub total_amount: i64,
    pub total_amount_incl_vat: i64,
}

/// A purchasable product.
///
/// The service groups products by type; the type tag is filled in while
/// flattening that grouping, so it is absent from the wire format of the
/// individual item.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub product_type: String,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub recurring_price: i64,
}

/// A specification line of a product.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProductElement {
    pub name: String,
    pub description: String,
    pub amount: i64,
}

/// Compute/availability zone of the platform.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityZone {
    pub name: String,
    pub country: String,
    pub is_default: bool,
}

/// Nameserver assignment used when registering or transferring a domain.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nameserver {
    pub hostname: String,
    #[serde(default)]
    pub ipv4: Option<String>,
    #[serde(default)]
    pub ipv6: Option<String>,
}

/// Payload for registering a new domain.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainRegistration {
    pub domain_name: String,
    #[serde(default)]
    pub contacts: Vec<WhoisContact>,
    #[serde(default)]
    pub nameservers: Vec<Nameserver>,
    #[serde(default)]
    pub dns_entries: Vec<DnsEntry>,
}

/// Payload for transferring a domain in, authorized by its transfer code.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainTransfer {
    pub domain_name: String,
    pub auth_code: String,
    #[serde(default)]
    pub contacts: Vec<WhoisContact>,
    #[serde(default)]
    pub nameservers: Vec<Nameserver>,
    #[serde(default)]
    pub dns_entries: Vec<DnsEntry>,
}

/// Cancellation timestamps come over the wire as `YYYY-MM-DD HH:MM:SS`, with
/// an absent or empty string meaning "not cancelled".
mod space_datetime_opt {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(datetime) => serializer.serialize_str(&datetime.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<String> = Option::deserialize(deserializer)?;
        match value.as_deref() {
            None | Some("") => Ok(None),
            Some(text) => NaiveDateTime::parse_from_str(text, FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
