//! FX products.

mod ndf;

pub use ndf::{FxNdf, FxNdfTrade, ResolvedFxNdf, ResolvedFxNdfTrade};
