use serde::Serialize;
use serde_json::{json, Value};

/// Identifier of a `product.template` record.
pub type ProductId = i64;

/// A single field written onto a product slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotValue {
    Name(String),
    ListPrice(f64),
}

impl SlotValue {
    /// The `values` object Etron expects. Prices are sent as strings.
    pub fn to_values(&self) -> Value {
        match self {
            SlotValue::Name(name) => json!({ "name": name }),
            SlotValue::ListPrice(price) => json!({ "list_price": price.to_string() }),
        }
    }
}

#[derive(Serialize, Debug)]
pub(crate) struct WriteQuery {
    pub ids: ProductId,
    pub values: String,
}

impl WriteQuery {
    pub fn new(id: ProductId, value: &SlotValue) -> Self {
        Self {
            ids: id,
            values: value.to_values().to_string(),
        }
    }
}
