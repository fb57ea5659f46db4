//! Outbound SERP lookup plumbing: the provider response model, the rank
//! extractor, and the request dispatcher.

pub mod dispatch;
pub mod extract;
pub mod response;

pub use dispatch::{HttpDispatcher, SerpDispatcher};
pub use extract::{find_rank, normalize_domain, RankMatch};
pub use response::{OrganicResult, SerpResponse};
