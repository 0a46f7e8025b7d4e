use std::path::PathBuf;

use crate::core::error::DownloadError;

/// 默认拷贝缓冲区大小（字节）
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// 一次下载的状态快照
///
/// 每次发送都是一个新的值，接收方只保留最新的一份。
#[derive(Debug, Clone, Default)]
pub struct DownloadStatus {
    pub error: Option<DownloadError>,
    pub is_complete: bool,
    /// 本次下载累计写入的字节数，只增不减
    pub bytes_downloaded: u64,
}

impl DownloadStatus {
    /// 只携带错误的状态
    pub fn failed(error: DownloadError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// 完成或出错之后不会再有新的状态
    pub fn is_terminal(&self) -> bool {
        self.is_complete || self.error.is_some()
    }
}

/// 单次下载的静态配置，在 worker 启动前创建，之后只读
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub filepath: PathBuf,
    pub buffer_size: usize,
}

impl DownloadOptions {
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }
}
