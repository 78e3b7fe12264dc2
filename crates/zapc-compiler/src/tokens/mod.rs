//! Persistent-storage tokens.
//!
//! - `set` - [`TokenSet`], the token arena and its singleton partitions
//! - `dedup` - [`TokenDeduplicator`], the pass that fills it

mod dedup;
mod set;


pub use dedup::TokenDeduplicator;
pub use set::{
    ClusterTokens, EndpointTokens, STORAGE_ID_BASE, Token, TokenDefault, TokenFailure, TokenId,
    TokenKey, TokenSet,
};
