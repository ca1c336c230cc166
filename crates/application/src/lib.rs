//! ztnet-dns Application Layer
pub mod ports;
pub mod use_cases;

pub use ports::MembershipProvider;
pub use use_cases::{build_zone_records, ZoneRecords};
