use derive_more::{Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status code Tixly reports for an existing, open order.
pub const STATUS_VALID: i32 = 0;

/// Sequential order number as used in `/order/get/{n}`.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, From, Into, Deref,
)]
pub struct OrderNumber(pub i64);

impl OrderNumber {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn saturating_sub(self, n: i64) -> Self {
        Self(self.0.saturating_sub(n))
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AuthRequest<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AuthResponse {
    pub data: AuthData,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct AuthData {
    #[serde(default)]
    pub token: String,
}

/// Body of `/order/get/{n}`. Only `Status` is required.
#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "PascalCase")]
pub struct Order {
    pub status: OrderStatus,
    #[serde(default)]
    pub data: Option<OrderData>,
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(rename_all = "PascalCase")]
pub struct OrderStatus {
    pub status: i32,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "PascalCase")]
pub struct OrderData {
    /// Tixly returns this as either a number or a string
    #[serde(default)]
    pub order_id: Option<Value>,
    #[serde(default)]
    pub payments: Vec<Payment>,
}

#[derive(Deserialize, Debug, Clone, Copy, Default)]
#[serde(rename_all = "PascalCase")]
pub struct Payment {
    #[serde(default)]
    pub amount: f64,
}

impl Order {
    pub fn is_valid(&self) -> bool {
        self.status.status == STATUS_VALID
    }

    /// Amount of the first payment, or `0.0` when the order carries none.
    pub fn total_payment_amount(&self) -> f64 {
        self.data
            .as_ref()
            .and_then(|data| data.payments.first())
            .map_or(0.0, |payment| payment.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_order_with_payments() {
        let body = r#"{
            "Status": {"Status": 0, "Message": "OK"},
            "Data": {
                "OrderId": 20017,
                "Payments": [{"Amount": 149.5, "Type": "Card"}, {"Amount": 10.0}]
            }
        }"#;

        let order: Order = serde_json::from_str(body).unwrap();
        assert!(order.is_valid());
        assert_eq!(order.total_payment_amount(), 149.5);
    }

    #[test]
    fn empty_payments_yield_zero() {
        let body = r#"{"Status": {"Status": 0}, "Data": {"OrderId": "x", "Payments": []}}"#;
        let order: Order = serde_json::from_str(body).unwrap();
        assert_eq!(order.total_payment_amount(), 0.0);
    }

    #[test]
    fn missing_data_defaults_instead_of_failing() {
        let order: Order = serde_json::from_str(r#"{"Status": {"Status": 0}}"#).unwrap();
        assert!(order.is_valid());
        assert_eq!(order.total_payment_amount(), 0.0);

        let order: Order =
            serde_json::from_str(r#"{"Status": {"Status": 0}, "Data": null}"#).unwrap();
        assert_eq!(order.total_payment_amount(), 0.0);
    }

    #[test]
    fn non_zero_status_is_invalid() {
        let order: Order =
            serde_json::from_str(r#"{"Status": {"Status": 404}, "Data": null}"#).unwrap();
        assert!(!order.is_valid());
    }

    #[test]
    fn missing_status_is_an_error() {
        assert!(serde_json::from_str::<Order>(r#"{"Data": {}}"#).is_err());
    }

    #[test]
    fn auth_request_uses_pascal_case() {
        let body = serde_json::to_value(AuthRequest {
            client_id: "id",
            client_secret: "secret",
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"ClientId": "id", "ClientSecret": "secret"})
        );
    }

    #[test]
    fn order_number_arithmetic() {
        let n = OrderNumber(20000);
        assert_eq!(n.next(), OrderNumber(20001));
        assert_eq!(n.saturating_sub(5), OrderNumber(19995));
        assert_eq!(n.to_string(), "20000");
        assert_eq!(*n, 20000);
    }
}
