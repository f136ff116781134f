//! Request and response shapes exchanged with the webhooks.
//!
//! The relay itself forwards raw JSON; these types are what the dashboard
//! client reads and writes.

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Number;

/// How often the report is normally sent to the client list.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    Monthly,
    Weekly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Monthly => "monthly",
            Frequency::Weekly => "weekly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Monthly => "Monthly Report",
            Frequency::Weekly => "Weekly Report",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub frequency: Frequency,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
}

/// A single market figure. The report webhook usually sends preformatted
/// strings (`"$1,245"`, `"+2.1%"`) but bare numbers are shown as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StatValue {
    Text(String),
    Number(Number),
}

impl Default for StatValue {
    fn default() -> Self {
        StatValue::Text(String::new())
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatValue::Text(s) => f.write_str(s),
            StatValue::Number(n) => write!(f, "{n}"),
        }
    }
}

impl PartialEq<&str> for StatValue {
    fn eq(&self, other: &&str) -> bool {
        match self {
            StatValue::Text(s) => s == other,
            StatValue::Number(n) => n.to_string() == *other,
        }
    }
}

/// Market figures rendered in the result view. Display data only.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct MarketStats {
    #[serde(rename = "avgRent1BR", default)]
    pub avg_rent_1br: StatValue,
    #[serde(rename = "avgRent2BR", default)]
    pub avg_rent_2br: StatValue,
    #[serde(rename = "avgRent3BR", default)]
    pub avg_rent_3br: StatValue,
    #[serde(rename = "vacancyRate", default)]
    pub vacancy_rate: StatValue,
    /// Month-over-month change.
    #[serde(rename = "monthlyChange", default)]
    pub monthly_change: StatValue,
    /// Year-over-year change.
    #[serde(rename = "yearlyChange", default)]
    pub yearly_change: StatValue,
    #[serde(rename = "medianHomePrice", default, skip_serializing_if = "Option::is_none")]
    pub median_home_price: Option<StatValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<StatValue>,
    #[serde(rename = "salesVolume", default, skip_serializing_if = "Option::is_none")]
    pub sales_volume: Option<StatValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportResult {
    #[serde(default)]
    pub success: bool,
    #[serde(
        default,
        deserialize_with = "lenient_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub emails_sent: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<MarketStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_preview: Option<String>,
    /// Link to the generated document, e.g. a shared Google Doc.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_doc_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Reads a count that some workflows emit as a float (`3.0`).
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<Number>::deserialize(deserializer)?;
    Ok(number.and_then(|n| {
        n.as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
    }))
}

/// How a contact wants to receive reports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryPref {
    #[default]
    Email,
    Sms,
    Both,
}

/// Identifier assigned by the contacts store. Some stores use row numbers,
/// others use strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ContactId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactId::Number(n) => write!(f, "{n}"),
            ContactId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ContactId>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub delivery_pref: DeliveryPref,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Contact {
    /// Whether two records describe the same person, ignoring store-assigned fields.
    pub fn same_details(&self, other: &Contact) -> bool {
        self.name == other.name
            && self.email == other.email
            && self.phone == other.phone
            && self.delivery_pref == other.delivery_pref
    }
}

/// Response of the `list` action.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ContactList {
    #[serde(default)]
    pub contacts: Vec<Contact>,
}

/// Error body returned by the relay for every failed request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorBody {
    /// Message suitable for display, preferring the upstream detail.
    pub fn message(&self) -> &str {
        self.detail
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(self.error.as_str())
    }
}
