use crate::config::Config;
use crate::scanner::{scan, PriceCache};
use crate::selector::{select_top, TOP_ORDERS};
use crate::source::{InventorySink, OrderSource};
use crate::sync::{sync_slots, SyncReport};
use log::{debug, info};
use tixly::OrderNumber;
use tokio::time::sleep;

#[derive(Debug, PartialEq)]
pub enum CycleOutcome {
    NoValidOrders,
    Synced {
        top: Vec<OrderNumber>,
        report: SyncReport,
    },
}

/// Owns the bridge state: price cache, retained top orders and scan offset.
pub struct Bridge<S, K> {
    source: S,
    sink: K,
    config: Config,
    prices: PriceCache,
    retained: Vec<OrderNumber>,
    offset: OrderNumber,
}

impl<S: OrderSource, K: InventorySink> Bridge<S, K> {
    pub fn new(source: S, sink: K, config: Config) -> Self {
        Self {
            source,
            sink,
            offset: config.order_start,
            config,
            prices: PriceCache::new(),
            retained: Vec::new(),
        }
    }

    /// Runs cycles until the process is killed.
    pub async fn run(mut self) {
        loop {
            if let CycleOutcome::Synced { top, report } = self.run_cycle().await {
                info!(
                    "Synced {} orders ({} writes, {} failed)",
                    top.len(),
                    report.writes,
                    report.failed
                );
            }
            sleep(self.config.cycle_delay).await;
        }
    }

    /// One scan, select and sync pass.
    ///
    /// The offset only ever moves down by `rescan_backoff`, so orders that
    /// showed up late below earlier scans are still probed.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.offset = self.offset.saturating_sub(self.config.rescan_backoff);

        let result = scan(
            &self.source,
            self.offset,
            &self.config.scan,
            &mut self.prices,
        )
        .await;

        if result.valid.is_empty() {
            info!("No valid orders found.");
            debug!("Probed {} to {}", self.offset, result.last_probed);
            return CycleOutcome::NoValidOrders;
        }

        let top = select_top(&self.retained, &result.valid, TOP_ORDERS);
        let report = sync_slots(
            &self.sink,
            &top,
            &self.config.slot_ids,
            &self.config.prefix,
            &self.prices,
        )
        .await;

        self.retained = top.clone();

        CycleOutcome::Synced { top, report }
    }
}

#[cfg(test)]
impl<S, K> Bridge<S, K> {
    pub fn retained(&self) -> &[OrderNumber] {
        &self.retained
    }

    pub fn prices(&self) -> &PriceCache {
        &self.prices
    }

    pub fn offset(&self) -> OrderNumber {
        self.offset
    }
}
