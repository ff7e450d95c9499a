pub mod odds;
pub mod payoff;
pub mod plan;
pub mod window;

pub use odds::{match_profitability, profitability_ratio, RatioBucket};
pub use payoff::settle;
pub use plan::{plan_settlement, BetSettlement};
pub use window::BetWindow;
