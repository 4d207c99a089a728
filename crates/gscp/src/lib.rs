//! gscp — unified copying across local paths and Google Cloud Storage.
//!
//! One API copies files and directories regardless of where each endpoint
//! lives: both local, both remote, or a mix. Endpoints may be given as plain
//! strings, [`std::path::PathBuf`]s, or pre-built [`RemoteObject`] handles;
//! a `gs://` prefix marks a remote object and everything else is a local
//! path. The matching transfer strategy (local copy, upload, download, or
//! server-side remote copy) is selected per pair.
//!
//! A remote-store [`Client`] is only constructed when a remote endpoint is
//! involved, either supplied through [`CopyOptions`] or built lazily from
//! ambient credentials for the single invocation.
//!
//! ```no_run
//! # async fn demo() -> Result<(), gscp::CopyError> {
//! use gscp::{copy_dir, copy_file, copy_files, CopyOptions};
//!
//! let options = CopyOptions::default();
//! copy_file("/tmp/src/x.txt", "gs://bkt/x.txt", &options).await?;
//! copy_dir("gs://bkt/models/", "/tmp/models", &options).await?;
//! copy_files(["a.txt", "c/d.txt"], "gs://bkt/flat/", &options).await?;
//! # Ok(())
//! # }
//! ```

pub mod batch;
pub mod copy;
pub mod error;
pub mod location;
pub mod options;

// Re-export commonly used types
pub use batch::{copy_dir, copy_files, flatten, DestinationSpec};
pub use copy::{copy_file, CopyStrategy};
pub use error::{CopyError, CopyResult};
pub use gscp_store::{BucketProvider, Client, RemoteObject, StoreError};
pub use location::{classify, Location, LocationRef};
pub use options::{CopyOptions, DEFAULT_CONCURRENCY};
