use crate::source::OrderSource;
use log::{debug, info, warn};
use std::collections::HashMap;
use tixly::OrderNumber;

/// Payment totals by order number, kept for the whole process lifetime.
pub type PriceCache = HashMap<OrderNumber, f64>;

/// What a failed lookup does to the consecutive-miss counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchErrorPolicy {
    /// Log and move on without counting. A source that keeps failing never
    /// ends the scan.
    #[default]
    Skip,
    CountAsMiss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanPolicy {
    pub miss_threshold: u32,
    pub on_fetch_error: FetchErrorPolicy,
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            miss_threshold: 20,
            on_fetch_error: FetchErrorPolicy::Skip,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    /// Valid order numbers in probe order
    pub valid: Vec<OrderNumber>,
    pub last_probed: OrderNumber,
}

/// Probes order numbers upwards from `start` until `miss_threshold`
/// consecutive lookups come back invalid.
///
/// Prices are only extracted for orders not yet in `prices`.
pub async fn scan<S: OrderSource + ?Sized>(
    source: &S,
    start: OrderNumber,
    policy: &ScanPolicy,
    prices: &mut PriceCache,
) -> ScanResult {
    info!("Scanning orders from {start}");

    let mut valid = Vec::new();
    let mut misses = 0;
    let mut order_number = start;

    loop {
        match source.fetch_order(order_number).await {
            Ok(order) if order.is_valid() => {
                valid.push(order_number);
                prices.entry(order_number).or_insert_with(|| {
                    let amount = order.total_payment_amount();
                    debug!("Order {order_number} paid {amount}");
                    amount
                });
                misses = 0;
            }
            Ok(_) => misses += 1,
            Err(e) => {
                warn!("Error fetching order number {order_number}: {e}");
                if policy.on_fetch_error == FetchErrorPolicy::CountAsMiss {
                    misses += 1;
                }
            }
        }

        if misses >= policy.miss_threshold {
            break;
        }
        order_number = order_number.next();
    }

    info!(
        "Scan stopped at {order_number} with {} valid orders",
        valid.len()
    );

    ScanResult {
        valid,
        last_probed: order_number,
    }
}
