use thiserror::Error;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

/// 下载过程中的所有错误
///
/// 错误会被放进 `DownloadStatus` 里跨任务传递，所以必须可以 `Clone`，
/// 底层错误统一用 `Arc` 包装。
#[derive(Error, Debug, Clone)]
pub enum DownloadError {
    #[error("{0}")]
    Transport(#[source] Arc<reqwest::Error>),

    #[error("server returned: {0}")]
    HttpStatus(String),

    #[error("open file {} failed: {source}", .path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: Arc<io::Error>,
    },

    #[error("{0}")]
    Write(#[source] Arc<io::Error>),

    #[error("{0}")]
    Read(#[source] Arc<io::Error>),

    #[error("download worker exited without reporting a result")]
    WorkerExited,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl DownloadError {
    pub fn transport(error: reqwest::Error) -> Self {
        DownloadError::Transport(Arc::new(error))
    }

    pub fn open_file(path: impl Into<PathBuf>, error: io::Error) -> Self {
        DownloadError::OpenFile {
            path: path.into(),
            source: Arc::new(error),
        }
    }

    pub fn write(error: io::Error) -> Self {
        DownloadError::Write(Arc::new(error))
    }

    pub fn read(error: io::Error) -> Self {
        DownloadError::Read(Arc::new(error))
    }
}

pub type DownloadResult<T> = Result<T, DownloadError>;
