//! Triage Core - nearest-centroid image sorting.
//!
//! Images already filed under `sorted/<class>/` are embedded with a pretrained
//! network and averaged into one centroid per class. Each unsorted image is
//! embedded the same way and assigned the class with the closest centroid
//! (Euclidean distance). Confirmed decisions are appended to a label ledger
//! and the image is moved into its class folder.
//!
//! ```text
//! sorted/ → embed → per-class mean ─┐
//!                                   ├→ nearest centroid → confirm → ledger + move
//! unsorted/img → embed ─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use triage_core::{Config, EmbeddingEngine, TriageSession};
//!
//! let config = Config::load()?;
//! let engine = EmbeddingEngine::load(&config)?;
//! let session = TriageSession::open(&config, engine, |_| {})?;
//!
//! for path in session.pending()? {
//!     let prediction = session.predict(&path)?;
//!     println!("{} -> {}", path.display(), prediction.class);
//! }
//! ```

// Module declarations
pub mod classify;
pub mod config;
pub mod corpus;
pub mod embedding;
pub mod error;
pub mod ledger;
pub mod math;
pub mod recorder;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenient access
pub use classify::{classify, rank, Prediction};
pub use config::Config;
pub use corpus::{build_centroids, BuildProgress, CentroidBuilder, CentroidSet, ImageDiscovery};
pub use embedding::{Embedder, EmbeddingEngine, Network, TensorLayout};
pub use error::{ClassifyError, ConfigError, CorpusError, EmbedError, Result, TriageError};
pub use ledger::{read_labels, Labels, Ledger};
pub use recorder::{validate_class_name, DecisionRecorder};
pub use session::TriageSession;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
