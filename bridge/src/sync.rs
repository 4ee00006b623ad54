use crate::scanner::PriceCache;
use crate::selector::TOP_ORDERS;
use crate::source::InventorySink;
use etron::{ProductId, SlotValue};
use log::{info, warn};
use tixly::OrderNumber;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub writes: usize,
    pub failed: usize,
}

pub fn slot_name(prefix: &str, order_number: OrderNumber) -> String {
    format!("{prefix}: {order_number}")
}

/// Writes name and price of each order onto the slot at the same position.
///
/// Failures are logged and the remaining writes still go out. Nothing is
/// rolled back, so a slot can end up with a new name and an old price.
pub async fn sync_slots<K: InventorySink + ?Sized>(
    sink: &K,
    top: &[OrderNumber],
    slots: &[ProductId],
    prefix: &str,
    prices: &PriceCache,
) -> SyncReport {
    let mut report = SyncReport::default();

    info!(
        "Transferring top orders to Etron: {}",
        top.iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    for (&order_number, &slot) in top.iter().zip(slots).take(TOP_ORDERS) {
        let name = SlotValue::Name(slot_name(prefix, order_number));
        write(sink, slot, &name, &mut report).await;

        match prices.get(&order_number) {
            Some(&price) => write(sink, slot, &SlotValue::ListPrice(price), &mut report).await,
            None => warn!("No price cached for order {order_number}, slot {slot} keeps its price"),
        }
    }

    report
}

async fn write<K: InventorySink + ?Sized>(
    sink: &K,
    slot: ProductId,
    value: &SlotValue,
    report: &mut SyncReport,
) {
    report.writes += 1;
    if let Err(e) = sink.write_slot(slot, value).await {
        report.failed += 1;
        warn!("Failed to write {value:?} to slot {slot}: {e}");
    }
}
