//! Pricers used by the measure calculators.

mod fx_ndf;
mod ibor_future_option;
pub mod sensitivity;

pub use fx_ndf::DiscountingFxNdfPricer;
pub use ibor_future_option::NormalIborFutureOptionPricer;
