use std::io;

use futures::TryStreamExt;
use hyper::ext::ReasonPhrase;
use reqwest::{Client, Response, StatusCode};
use tokio::fs::OpenOptions;
use tokio::sync::mpsc;
use tokio_util::io::StreamReader;

use crate::config::Config;
use crate::core::copy::copy_verbose;
use crate::core::error::{DownloadError, DownloadResult};
use crate::core::status::{DownloadOptions, DownloadStatus};

/// 目标文件权限：仅所有者可读写
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// 负责一次下载尝试：请求、打开目标文件、拷贝
///
/// 所有结果都通过状态通道发出，不会向调用方返回错误。
pub struct TransferWorker {
    client: Client,
    options: DownloadOptions,
}

impl TransferWorker {
    pub fn new(client: Client, options: DownloadOptions) -> Self {
        Self { client, options }
    }

    /// 按配置构建 HTTP 客户端
    pub fn from_config(config: &Config, options: DownloadOptions) -> DownloadResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(DownloadError::transport)?;
        Ok(Self::new(client, options))
    }

    /// 执行下载，返回最后发送的状态
    pub async fn run(self, url: String, status_tx: mpsc::Sender<DownloadStatus>) -> DownloadStatus {
        log::info!("开始请求: {}", url);
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                log::debug!("请求失败: {} - {}", url, e);
                return emit(&status_tx, DownloadStatus::failed(DownloadError::transport(e))).await;
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            let line = status_line(&response);
            log::debug!("服务器返回非 200 状态: {}", line);
            return emit(&status_tx, DownloadStatus::failed(DownloadError::HttpStatus(line))).await;
        }
        log::debug!("响应长度: {:?}", response.content_length());

        let filepath = &self.options.filepath;
        let mut open_options = OpenOptions::new();
        open_options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        open_options.mode(FILE_MODE);

        let mut file = match open_options.open(filepath).await {
            Ok(file) => file,
            Err(e) => {
                log::debug!("打开文件失败: {} - {}", filepath.display(), e);
                return emit(&status_tx, DownloadStatus::failed(DownloadError::open_file(filepath, e))).await;
            }
        };
        log::info!("写入文件: {}", filepath.display());

        let body = StreamReader::new(
            response
                .bytes_stream()
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e)),
        );
        tokio::pin!(body);

        let last = copy_verbose(&mut file, &mut body, self.options.buffer_size, &status_tx).await;
        // 文件在这里关闭，无论拷贝是否成功
        drop(file);

        match &last.error {
            Some(e) => log::debug!("下载中断: {}（已写入 {} 字节）", e, last.bytes_downloaded),
            None => log::info!("下载完成: {} 字节", last.bytes_downloaded),
        }
        last
    }
}

/// 状态行：状态码加服务器返回的原因短语，服务器没有给出时用标准短语
fn status_line(response: &Response) -> String {
    let status = response.status();
    let reason = match response.extensions().get::<ReasonPhrase>() {
        Some(reason) => String::from_utf8_lossy(reason.as_bytes()).into_owned(),
        None => status.canonical_reason().unwrap_or("Unknown Status").to_string(),
    };
    format!("{} {}", status.as_u16(), reason)
}

/// 发送单个状态；接收方已关闭时只记录日志
async fn emit(status_tx: &mpsc::Sender<DownloadStatus>, status: DownloadStatus) -> DownloadStatus {
    if status_tx.send(status.clone()).await.is_err() {
        log::debug!("状态接收方已关闭，丢弃状态: {:?}", status);
    }
    status
}
