pub mod credential;
pub mod keyword;
pub mod rank_history;
pub mod website;

pub use credential::Credential;
pub use keyword::Keyword;
pub use rank_history::{NewRankHistory, RankHistoryEntry};
pub use website::Website;
