use async_trait::async_trait;
use dashmap::DashMap;
use std::cmp::Reverse;
use stockpick_core::stock::entity::StockRecord;
use stockpick_core::stock::port::StockRepository;
use stockpick_core::store::error::StoreError;
use uuid::Uuid;

/// # Summary
/// 基于内存的评级记录仓储实现。
///
/// 以 ticker 为键；覆盖写入时沿用既有记录的 `id`，与 SQLite 实现的语义一致。
#[derive(Default)]
pub struct MemoryStockRepository {
    stocks: DashMap<String, StockRecord>,
}

impl MemoryStockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }
}

#[async_trait]
impl StockRepository for MemoryStockRepository {
    async fn save(&self, stock: &StockRecord) -> Result<(), StoreError> {
        let mut record = stock.clone();
        if let Some(existing) = self.stocks.get(&stock.ticker) {
            record.id = existing.id;
        }
        self.stocks.insert(record.ticker.clone(), record);
        Ok(())
    }

    async fn find_by_ticker(&self, ticker: &str) -> Result<Option<StockRecord>, StoreError> {
        Ok(self.stocks.get(ticker).map(|entry| entry.value().clone()))
    }

    async fn find_all(&self) -> Result<Vec<StockRecord>, StoreError> {
        let mut all: Vec<StockRecord> = self.stocks.iter().map(|entry| entry.value().clone()).collect();
        all.sort_by_key(|s| Reverse(s.observed_at));
        Ok(all)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.stocks.retain(|_, stock| stock.id != id);
        Ok(())
    }
}
