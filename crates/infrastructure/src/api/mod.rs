pub mod client;

pub use client::ZtnetApiClient;
