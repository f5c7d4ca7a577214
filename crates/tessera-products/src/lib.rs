//! # Tessera Products
//!
//! Trades and products, and the resolved forms used for pricing.
//!
//! Products are plain immutable values with value equality. Contractual
//! quantities are held as `Decimal`; [`Resolvable::resolve`] applies
//! reference data, validates the product and produces an `f64` form ready
//! for pricing.
//!
//! - **FX**: [`FxNdf`](fx::FxNdf) non-deliverable forwards
//! - **Futures**: [`IborFuture`](future::IborFuture) and
//!   [`IborFutureOption`](future::IborFutureOption)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod fx;
pub mod future;
pub mod trade;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::fx::{FxNdf, FxNdfTrade, ResolvedFxNdf, ResolvedFxNdfTrade};
    pub use crate::future::{
        IborFuture, IborFutureOption, IborFutureOptionTrade, PutCall, ResolvedIborFuture,
        ResolvedIborFutureOption, ResolvedIborFutureOptionTrade,
    };
    pub use crate::trade::{Resolvable, TradeId, TradeInfo};
}

pub use trade::{Resolvable, TradeId, TradeInfo};
