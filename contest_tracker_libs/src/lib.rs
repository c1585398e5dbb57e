pub mod adapter;
pub mod aggregator;
pub mod api;
pub mod bookmark;
pub mod classifier;
pub mod client;
pub mod fallback;
pub mod filter;
pub mod model;
pub mod service;
pub mod solution;
pub mod youtube;

pub use aggregator::ContestAggregator;
pub use bookmark::BookmarkStore;
pub use classifier::{classify, ClassifiedContests};
pub use filter::PlatformFilter;
pub use model::{Contest, Platform};
pub use service::ContestService;
