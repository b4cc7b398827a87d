use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer};

/// Timestamp format used by the orders dataset
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn de_timestamp<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
        .map_err(serde::de::Error::custom)
}

/// A customer order (extra CSV columns are ignored)
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub customer_id: String,
    #[serde(deserialize_with = "de_timestamp")]
    pub order_purchase_timestamp: NaiveDateTime,
}

/// A line item within an order
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItem {
    pub order_id: String,
    pub product_id: String,
}

/// Product catalog entry; category is nullable in the source data
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub product_category_name: Option<String>,
}

/// A payment recorded against an order
#[derive(Debug, Clone, Deserialize)]
pub struct Payment {
    pub order_id: String,
    pub payment_type: String,
}

/// Customer record; location attributes are carried but only the id joins
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub customer_id: String,
    pub customer_city: Option<String>,
    pub customer_state: Option<String>,
}

/// Seller record; loaded for parity with the data directory, never charted
#[derive(Debug, Clone, Deserialize)]
pub struct Seller {
    pub seller_id: String,
    pub seller_city: Option<String>,
    pub seller_state: Option<String>,
}

/// One geolocation sample; coordinates are carried but unused
#[derive(Debug, Clone, Deserialize)]
pub struct GeolocationRecord {
    pub geolocation_state: String,
    pub geolocation_lat: f64,
    pub geolocation_lng: f64,
}
