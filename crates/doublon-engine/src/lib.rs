//! Duplicate detection over a candidate store.
//!
//! A [`Detector`] takes a [`Query`] describing something a contributor is about to create and
//! returns a [`ResultBundle`] of existing brands, approved controversies and pending
//! propositions that look like it. The search is advisory: it never blocks or merges
//! anything.
//!
//! # Example
//!
//! ```
//! use doublon_engine::{Detector, Query};
//! use doublon_store::{Brand, MemoryStore};
//!
//! # tokio_test_block(async {
//! let store = MemoryStore::new().with_brands([Brand::new(1, "Nestlé")]);
//! let bundle = Detector::new(store)
//!     .find_similar(&Query::brand("Nesslé"))
//!     .await
//!     .unwrap();
//! assert_eq!(bundle.brands.len(), 1);
//! # });
//! # fn tokio_test_block(f: impl std::future::Future<Output = ()>) {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

#![warn(missing_docs)]

mod detector;
mod error;
mod query;
mod result;

pub use detector::{Detector, DetectorSettings};
pub use error::EngineError;
pub use query::{Query, QueryKind, SearchParams};
pub use result::{ResultBundle, ScoredCandidate, rank};
