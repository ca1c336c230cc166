pub mod membership_provider;

pub use membership_provider::MembershipProvider;
