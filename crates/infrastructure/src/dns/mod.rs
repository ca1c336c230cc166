pub mod cache;
pub mod handler;
pub mod refresher;

pub use cache::RecordCache;
pub use handler::ZtnetHandler;
pub use refresher::{RecordRefresher, RefresherHandle};
