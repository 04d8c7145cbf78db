//! One tracker per logistics platform.
//!
//! Platform modules keep transport and challenge handling in `mod.rs` and
//! payload parsing in `parse.rs`, so parsers can be tested on fixtures.

pub mod family_mart;
pub mod lsa;
pub mod ok_mart;
pub mod seven_eleven;
pub mod shopee;

pub use family_mart::FamilyMartTracker;
pub use lsa::LsaTracker;
pub use ok_mart::OKMartTracker;
pub use seven_eleven::SevenElevenTracker;
pub use shopee::ShopeeTracker;
