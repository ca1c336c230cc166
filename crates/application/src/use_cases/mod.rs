pub mod build_zone_records;

pub use build_zone_records::{build_zone_records, ZoneRecords};
