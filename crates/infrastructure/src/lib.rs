//! ztnet-dns Infrastructure Layer
//!
//! Concrete adapters: the ZTNET REST client, the swapped record cache, the
//! background refresher, and the hickory-server request handler.
pub mod api;
pub mod dns;

pub use api::ZtnetApiClient;
pub use dns::cache::RecordCache;
pub use dns::handler::ZtnetHandler;
pub use dns::refresher::{RecordRefresher, RefresherHandle};
