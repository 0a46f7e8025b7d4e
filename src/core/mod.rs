//! Core: 单次下载的数据模型、字节拷贝循环和下载 worker

pub mod copy;
pub mod error;
pub mod status;
pub mod worker;

use tokio::sync::mpsc;

pub use copy::copy_verbose;
pub use error::{DownloadError, DownloadResult};
pub use status::{DownloadOptions, DownloadStatus, DEFAULT_BUFFER_SIZE};
pub use worker::TransferWorker;

/// 状态通道容量
///
/// 容量为 1，worker 在上一个状态被取走之前会挂起，
/// 下载速度因此受进度显示消费速度的限制。
pub const STATUS_CHANNEL_CAPACITY: usize = 1;

/// 创建 worker 与进度显示之间的状态通道
pub fn status_channel() -> (mpsc::Sender<DownloadStatus>, mpsc::Receiver<DownloadStatus>) {
    mpsc::channel(STATUS_CHANNEL_CAPACITY)
}
