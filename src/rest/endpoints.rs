//! Bitfinex REST API endpoint constants.
//!
//! These are method names as passed to `call_public` / `call_auth`; the
//! client prepends the version prefix and base URL.

/// Base URL for the Bitfinex REST API.
pub const BITFINEX_BASE_URL: &str = "https://api.bitfinex.com";

/// Common v1 method names.
#[allow(dead_code)]
pub mod v1 {
    /// Ticker for a symbol, e.g. `pubticker/btcusd`.
    pub const PUBTICKER: &str = "pubticker";
    /// List of tradable symbols.
    pub const SYMBOLS: &str = "symbols";
    /// Account information (authenticated).
    pub const ACCOUNT_INFOS: &str = "account_infos";
    /// Wallet balances (authenticated).
    pub const BALANCES: &str = "balances";
    /// Active orders (authenticated).
    pub const ORDERS: &str = "orders";
    /// Submit a new order (authenticated).
    pub const ORDER_NEW: &str = "order/new";
    /// Cancel an order (authenticated).
    pub const ORDER_CANCEL: &str = "order/cancel";
    /// Past trades (authenticated).
    pub const MYTRADES: &str = "mytrades";
}

/// Common v2 method names.
#[allow(dead_code)]
pub mod v2 {
    /// Operational status of the platform.
    pub const PLATFORM_STATUS: &str = "platform/status";
    /// Ticker for a symbol, e.g. `ticker/tBTCUSD`.
    pub const TICKER: &str = "ticker";
    /// Tickers for multiple symbols (query param `symbols`).
    pub const TICKERS: &str = "tickers";
    /// Candles, e.g. `candles/trade:1m:tBTCUSD/hist`.
    pub const CANDLES: &str = "candles";
    /// Wallet balances (authenticated).
    pub const WALLETS: &str = "auth/r/wallets";
    /// Active orders (authenticated).
    pub const ORDERS: &str = "auth/r/orders";
    /// Submit a new order (authenticated).
    pub const ORDER_SUBMIT: &str = "auth/w/order/submit";
    /// Margin info (authenticated), e.g. `auth/r/info/margin/base`.
    pub const MARGIN_INFO: &str = "auth/r/info/margin";
}
