//! Cart Events
//!
//! The cart event payload sent to Drip. Every field is always present; empty carts
//! carry an empty `cart_data` object and a numeric `grand_total` of `0`.

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::{pricing::format_amount, products::ProductId};

/// Cart event action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventAction {
    /// The cart contents changed.
    Updated,
}

/// Cart grand total
///
/// Serializes as a decimal string for non-empty carts and as the number `0` for
/// empty ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrandTotal {
    /// The cart has no lines.
    Empty,

    /// Sum of line totals, rendered with the currency's minor unit digits.
    Amount(String),
}

impl GrandTotal {
    /// Returns the rendered amount, `"0"` for empty carts.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Empty => "0",
            Self::Amount(amount) => amount,
        }
    }
}

impl Serialize for GrandTotal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Empty => serializer.serialize_u8(0),
            Self::Amount(amount) => serializer.serialize_str(amount),
        }
    }
}

impl<'de> Deserialize<'de> for GrandTotal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Integer(u64),
            Float(f64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(amount) => Self::Amount(amount),
            Raw::Integer(0) => Self::Empty,
            Raw::Integer(amount) => Self::Amount(amount.to_string()),
            Raw::Float(amount) if amount.abs() < f64::EPSILON => Self::Empty,
            Raw::Float(amount) => Self::Amount(format_amount(amount)),
        })
    }
}

/// A single cart line as reported to Drip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier
    pub product_id: ProductId,

    /// Variation identifier, equal to `product_id` for simple products
    pub product_variant_id: ProductId,

    /// Stock keeping unit
    pub sku: String,

    /// Product name
    pub name: String,

    /// Line quantity
    pub quantity: u32,

    /// Unit price
    pub price: String,

    /// Line tax
    pub taxes: String,

    /// Unit price multiplied by quantity
    pub total: String,

    /// Absolute product page URL
    pub product_url: String,

    /// `<img>` tag for the product image
    pub image_url: String,

    /// Category names in assignment order
    pub categories: Vec<String>,
}

/// Cart lines keyed by cart item key, in cart order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartData(Vec<(String, LineItem)>);

impl CartData {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line.
    pub fn insert(&mut self, key: impl Into<String>, item: LineItem) {
        self.0.push((key.into(), item));
    }

    /// Look up a line by key.
    pub fn get(&self, key: &str) -> Option<&LineItem> {
        self.0
            .iter()
            .find_map(|(candidate, item)| (candidate == key).then_some(item))
    }

    /// Iterate over keys and lines in cart order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LineItem)> {
        self.0.iter().map(|(key, item)| (key.as_str(), item))
    }

    /// Iterate over lines in cart order.
    pub fn values(&self) -> impl Iterator<Item = &LineItem> {
        self.0.iter().map(|(_, item)| item)
    }

    /// Find the line for a product.
    pub fn find_product(&self, product_id: ProductId) -> Option<&LineItem> {
        self.values().find(|item| item.product_id == product_id)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no lines.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, LineItem)> for CartData {
    fn from_iter<I: IntoIterator<Item = (String, LineItem)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for CartData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;

        for (key, item) in &self.0 {
            map.serialize_entry(key, item)?;
        }

        map.end()
    }
}

impl<'de> Deserialize<'de> for CartData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CartDataVisitor;

        impl<'de> Visitor<'de> for CartDataVisitor {
            type Value = CartData;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of cart item keys to line items")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut data = Vec::with_capacity(access.size_hint().unwrap_or_default());

                while let Some((key, item)) = access.next_entry::<String, LineItem>()? {
                    data.push((key, item));
                }

                Ok(CartData(data))
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                // An empty cart encoded as an empty list is still an empty cart.
                match seq.next_element::<de::IgnoredAny>()? {
                    None => Ok(CartData::new()),
                    Some(_) => Err(de::Error::invalid_type(de::Unexpected::Seq, &self)),
                }
            }
        }

        deserializer.deserialize_any(CartDataVisitor)
    }
}

/// Cart event sent on every qualifying cart mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEvent {
    /// Event action, always `updated`
    pub event_action: EventAction,

    /// 64 character cart session token
    pub session: String,

    /// Shopper email, empty when unknown
    pub customer_email: String,

    /// Cart lines keyed by cart item key
    pub cart_data: CartData,

    /// Sum of line totals
    pub grand_total: GrandTotal,

    /// Discount total
    pub total_discounts: String,

    /// Tax total
    pub total_taxes: String,

    /// Fee total
    pub total_fees: String,

    /// Shipping total
    pub total_shipping: String,

    /// ISO currency code
    pub currency: String,
}
