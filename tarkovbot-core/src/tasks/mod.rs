pub mod trader_refresh;
