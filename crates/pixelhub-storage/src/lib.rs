//! # pixelhub-storage
//!
//! Everything that touches bytes on disk or on the wire: randomized
//! working directories under the public root, acquisition of source
//! images from uploads or remote URLs, and the image decode/resize/save
//! backend.

pub mod acquire;
pub mod fetch;
pub mod imaging;
pub mod token;
pub mod workdir;

pub use acquire::{SourceAcquirer, SourceFile, SourceInput};
pub use fetch::RemoteFetcher;
pub use imaging::{DecodedImage, Dimensions, ImageBackend, RustImageBackend};
pub use token::{AlphanumericTokenSource, RandomTokenSource, SequenceTokenSource};
pub use workdir::{PendingArtifact, PublicRoot, WorkingDirectory};
