//! Media URL utilities for feed adapters.
//!
//! - [`slice`]: strip counts and unscramble URLs for scrambled gallery pages.
//! - [`sample`]: evenly spaced representative subsets of image lists.
//! - [`compress`]: prefix/suffix factoring of similar URLs.
//! - [`header`]: preview and waterfall composition URLs, with best-effort
//!   cache warming through [`prewarm`].

pub mod cache;
pub mod compress;
pub mod encode;
pub mod endpoint;
pub mod error;
pub mod fetch;
pub mod header;
pub mod prewarm;
pub mod sample;
pub mod slice;

mod retry;

pub use cache::{InMemoryWarmCache, WarmCache};
pub use compress::{compress, CompressedUrlSet};
pub use endpoint::ServiceEndpoint;
pub use error::MediaError;
pub use fetch::{FetchResponse, Fetcher, HttpFetcher};
pub use header::{HeaderImageBuilder, HeaderImages};
pub use prewarm::{PrewarmHandle, PrewarmReport, PrewarmTarget, Prewarmer};
pub use sample::representative_sample;
pub use slice::{page_number, slice_count, unscramble_page_urls, GalleryPageKey, SliceCount};
