use crate::money::parse_money;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use stockpick_core::feed::error::FeedError;
use stockpick_core::stock::entity::{Rating, RatingChange, StockRecord, TargetPrice};
use stockpick_core::stock::port::StockFeed;
use tracing::{debug, info};

/// # Summary
/// 分析师评级接口客户端。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端进行通讯，每个请求都携带 Bearer 令牌。
/// - 分页对调用方透明：`fetch_stocks` 返回所有页合并后的记录。
#[derive(Clone)]
pub struct AnalystFeedClient {
    /// 内部使用的 HTTP 客户端
    client: Client,
    base_url: String,
    auth_token: String,
}

impl AnalystFeedClient {
    /// # Summary
    /// 创建评级接口客户端。
    ///
    /// # Arguments
    /// * `base_url`: 接口根地址，末尾的 `/` 会被去掉。
    /// * `auth_token`: Bearer 令牌。
    /// * `timeout`: 单次请求超时。
    ///
    /// # Returns
    /// 成功返回客户端；根地址为空或 HTTP 客户端构建失败返回 `FeedError::Config`。
    pub fn new(
        base_url: impl Into<String>,
        auth_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FeedError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(FeedError::Config("feed base_url is empty".into()));
        }

        install_crypto_provider();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FeedError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            auth_token: auth_token.into(),
        })
    }

    /// 请求单页数据，`next_page` 为空时请求首页。
    async fn fetch_page(&self, next_page: Option<&str>) -> Result<ListResponse, FeedError> {
        let url = format!("{}/list", self.base_url);
        debug!(url = %url, next_page = ?next_page, "Requesting analyst ratings page");

        let mut request = self.client.get(&url).bearer_auth(&self.auth_token);
        if let Some(token) = next_page {
            request = request.query(&[("next_page", token)]);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FeedError::Network(format!("HTTP {}", resp.status())));
        }

        resp.json::<ListResponse>()
            .await
            .map_err(|e| FeedError::Parse(e.to_string()))
    }
}

/// 为 HTTPS 请求安装进程级 rustls 加密后端，已安装时跳过
fn install_crypto_provider() {
    if rustls::crypto::ring::default_provider().install_default().is_err() {
        debug!("rustls crypto provider already installed");
    }
}

/// 列表接口响应
#[derive(Deserialize, Debug)]
struct ListResponse {
    #[serde(default)]
    items: Vec<FeedItem>,
    #[serde(default)]
    next_page: Option<String>,
}

/// 列表接口中的单条评级变动，金额与时间均为文本
#[derive(Deserialize, Debug)]
struct FeedItem {
    ticker: String,
    target_from: String,
    target_to: String,
    #[serde(default)]
    company: String,
    #[serde(default)]
    action: String,
    #[serde(default)]
    brokerage: String,
    #[serde(default)]
    rating_from: String,
    #[serde(default)]
    rating_to: String,
    time: String,
}

impl FeedItem {
    /// 转换为领域实体，金额、时间或 ticker 不合法时返回 `FeedError::Parse`
    fn into_record(self) -> Result<StockRecord, FeedError> {
        let target = TargetPrice {
            from: parse_money(&self.target_from)?,
            to: parse_money(&self.target_to)?,
        };
        let observed_at = DateTime::parse_from_rfc3339(&self.time)
            .map_err(|e| FeedError::Parse(format!("invalid time '{}': {e}", self.time)))?
            .with_timezone(&Utc);
        let rating = RatingChange {
            from: Rating::from(self.rating_from),
            to: Rating::from(self.rating_to),
        };

        let record = StockRecord::new(self.ticker, target, rating, observed_at)
            .map_err(|e| FeedError::Parse(e.to_string()))?
            .with_company(self.company)
            .with_action(self.action)
            .with_brokerage(self.brokerage);
        Ok(record)
    }
}

#[async_trait]
impl StockFeed for AnalystFeedClient {
    /// # Summary
    /// 拉取全部分页的评级变动。
    ///
    /// # Logic
    /// 1. 请求首页，之后只要响应携带非空 `next_page` 就继续请求。
    /// 2. 每页数据逐条转换为 `StockRecord`，任一条失败即整体失败。
    async fn fetch_stocks(&self) -> Result<Vec<StockRecord>, FeedError> {
        let mut all = Vec::new();
        let mut next_page: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self.fetch_page(next_page.as_deref()).await?;
            pages += 1;

            let count_in_page = page.items.len();
            for item in page.items {
                all.push(item.into_record()?);
            }

            info!(
                page = pages,
                count_in_page,
                total_so_far = all.len(),
                "Fetched analyst ratings page"
            );

            match page.next_page.filter(|token| !token.is_empty()) {
                Some(token) => next_page = Some(token),
                None => break,
            }
        }

        Ok(all)
    }
}
