mod error;
pub mod file;
pub mod http;

pub use error::SourceError;
pub use file::{load_snapshot, save_snapshot};
pub use http::HttpSource;

use std::path::PathBuf;

use crate::model::Snapshot;

/// Where a run gets its snapshot from.
pub enum Source {
    /// A previously saved JSON snapshot
    File(PathBuf),
    Http(HttpSource),
}

impl Source {
    pub async fn load_snapshot(&self) -> Result<Snapshot, SourceError> {
        match self {
            Source::File(path) => file::load_snapshot(path).await,
            Source::Http(client) => client.fetch_snapshot().await,
        }
    }
}
