//! Market data provider interface and its HTTP-backed implementation.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::config::AppConfig;
use crate::models::market::{
    AnalystRatings, CompanyProfile, EarningsCalendar, Fundamentals, MacroSeries, NewsHeadline,
    OptionsSentiment, PriceBar,
};
use crate::models::ticker::Ticker;
use crate::services::error::ProviderResult;
use crate::services::finnhub::FinnhubClient;
use crate::services::fred::FredClient;
use crate::services::http_client::HttpFetcher;
use crate::services::marketdata_app::MarketDataClient;

/// Every upstream source the engine reads. Each call is independent and
/// carries its own timeout and retry policy.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Daily bars in `[from, to]`, ascending by date
    async fn price_history(
        &self,
        ticker: &Ticker,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ProviderResult<Vec<PriceBar>>;

    async fn company_profile(&self, ticker: &Ticker) -> ProviderResult<CompanyProfile>;

    async fn fundamentals(&self, ticker: &Ticker) -> ProviderResult<Fundamentals>;

    async fn analyst_ratings(&self, ticker: &Ticker, as_of: NaiveDate) -> ProviderResult<AnalystRatings>;

    async fn news(&self, ticker: &Ticker, as_of: NaiveDate) -> ProviderResult<Vec<NewsHeadline>>;

    async fn earnings(&self, ticker: &Ticker, as_of: NaiveDate) -> ProviderResult<EarningsCalendar>;

    async fn options_sentiment(&self, ticker: &Ticker) -> ProviderResult<OptionsSentiment>;

    async fn macro_series(&self, as_of: NaiveDate) -> ProviderResult<MacroSeries>;
}

/// MarketData.app for prices and options, Finnhub for company data, FRED for macro
#[derive(Clone)]
pub struct HttpMarketDataProvider {
    marketdata: MarketDataClient,
    finnhub: FinnhubClient,
    fred: FredClient,
}

impl HttpMarketDataProvider {
    pub fn new(marketdata: MarketDataClient, finnhub: FinnhubClient, fred: FredClient) -> Self {
        Self {
            marketdata,
            finnhub,
            fred,
        }
    }

    /// Build all three clients around one shared fetcher
    pub fn from_config(config: &AppConfig, fetcher: HttpFetcher) -> Self {
        Self::new(
            MarketDataClient::new(config.marketdata.clone(), fetcher.clone()),
            FinnhubClient::new(config.finnhub.clone(), fetcher.clone()),
            FredClient::new(config.fred.clone(), fetcher),
        )
    }
}

#[async_trait]
impl MarketDataProvider for HttpMarketDataProvider {
    async fn price_history(
        &self,
        ticker: &Ticker,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ProviderResult<Vec<PriceBar>> {
        self.marketdata.daily_candles(ticker, from, to).await
    }

    async fn company_profile(&self, ticker: &Ticker) -> ProviderResult<CompanyProfile> {
        self.finnhub.company_profile(ticker).await
    }

    async fn fundamentals(&self, ticker: &Ticker) -> ProviderResult<Fundamentals> {
        self.finnhub.fundamentals(ticker).await
    }

    async fn analyst_ratings(&self, ticker: &Ticker, as_of: NaiveDate) -> ProviderResult<AnalystRatings> {
        self.finnhub.analyst_ratings(ticker, as_of).await
    }

    async fn news(&self, ticker: &Ticker, as_of: NaiveDate) -> ProviderResult<Vec<NewsHeadline>> {
        self.finnhub.company_news(ticker, as_of).await
    }

    async fn earnings(&self, ticker: &Ticker, as_of: NaiveDate) -> ProviderResult<EarningsCalendar> {
        self.finnhub.earnings_calendar(ticker, as_of).await
    }

    async fn options_sentiment(&self, ticker: &Ticker) -> ProviderResult<OptionsSentiment> {
        self.marketdata.options_sentiment(ticker).await
    }

    async fn macro_series(&self, as_of: NaiveDate) -> ProviderResult<MacroSeries> {
        self.fred.macro_series(as_of).await
    }
}
