pub mod checker;

pub use checker::{CheckOutcome, RankChecker};
