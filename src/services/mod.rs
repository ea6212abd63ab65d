//! Upstream data providers and per-ticker acquisition

pub mod acquisition;
pub mod error;
pub mod finnhub;
pub mod fred;
pub mod http_client;
pub mod market_data;
pub mod marketdata_app;

pub use acquisition::{acquire, HISTORY_DAYS};
pub use error::{ProviderError, ProviderResult};
pub use http_client::{HttpFetcher, RetryPolicy};
pub use market_data::{HttpMarketDataProvider, MarketDataProvider};
