pub mod components;
pub mod feed;
pub mod inbox;
pub mod io;
pub mod store;

pub use feed::NoticeFeed;
pub use inbox::MessageLog;
pub use store::StoreError;
