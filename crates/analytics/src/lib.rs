//! Gross-profit analytics event for order confirmation pages.
//!
//! [`ProfitEventEmitter`] looks an order up, checks it is still fresh enough
//! to report, works out `total - shipping - tax - cost basis` (floored at
//! zero) and renders a data-layer push for the page.

pub mod clock;
pub mod config;
pub mod emitter;
pub mod event;
pub mod profit;
pub mod render;
pub mod window;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EmitterConfig;
pub use emitter::{ProfitEventEmitter, Skip};
pub use event::ProfitEvent;
pub use profit::{Financials, ProfitBreakdown};
pub use window::OrderAge;
