use anyhow::Result;
use async_trait::async_trait;
use etron::{ProductId, SlotValue};
use tixly::{Order, OrderNumber};

/// Where orders are read from.
#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn fetch_order(&self, order_number: OrderNumber) -> Result<Order>;
}

/// Where slot values are written to.
#[async_trait]
pub trait InventorySink: Send + Sync {
    async fn write_slot(&self, slot: ProductId, value: &SlotValue) -> Result<()>;
}

#[async_trait]
impl OrderSource for tixly::HttpClient {
    async fn fetch_order(&self, order_number: OrderNumber) -> Result<Order> {
        Ok(tixly::HttpClient::fetch_order(self, order_number).await?)
    }
}

#[async_trait]
impl InventorySink for etron::HttpClient {
    async fn write_slot(&self, slot: ProductId, value: &SlotValue) -> Result<()> {
        self.write_product(slot, value).await?;
        Ok(())
    }
}
