//! Interest rate futures and options on them.

mod ibor_future;
mod ibor_future_option;

pub use ibor_future::{IborFuture, ResolvedIborFuture};
pub use ibor_future_option::{
    IborFutureOption, IborFutureOptionTrade, PutCall, ResolvedIborFutureOption,
    ResolvedIborFutureOptionTrade,
};
