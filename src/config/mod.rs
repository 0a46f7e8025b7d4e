use std::path::PathBuf;
use std::time::Duration;

use crate::core::error::{DownloadError, DownloadResult};
use crate::core::status::{DownloadOptions, DEFAULT_BUFFER_SIZE};
use crate::ui::DEFAULT_TICK_INTERVAL;

/// 配置结构体
///
/// 只存在于内存中，由默认值和命令行参数合并得到。
#[derive(Debug, Clone)]
pub struct Config {
    /// 拷贝缓冲区大小（字节）
    pub buffer_size: usize,
    /// 进度刷新间隔
    pub tick_interval: Duration,
    /// User-Agent
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            tick_interval: DEFAULT_TICK_INTERVAL,
            user_agent: format!("simpledown/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// 校验配置合法性
    pub fn validate(&self) -> DownloadResult<()> {
        if self.buffer_size == 0 {
            return Err(DownloadError::InvalidConfig("buffer size must be greater than 0".to_string()));
        }

        // tokio 的 interval 不接受 0
        if self.tick_interval.is_zero() {
            return Err(DownloadError::InvalidConfig("tick interval must be greater than 0".to_string()));
        }

        if self.user_agent.is_empty() {
            return Err(DownloadError::InvalidConfig("user agent must not be empty".to_string()));
        }

        Ok(())
    }

    /// 合并命令行参数到配置
    pub fn merge_from_args(&mut self, args: &crate::cli::Args) {
        if let Some(buffer_size) = args.buffer_size {
            self.buffer_size = buffer_size;
        }
    }

    /// 生成单次下载的选项
    pub fn to_options(&self, filepath: impl Into<PathBuf>) -> DownloadOptions {
        DownloadOptions::new(filepath).with_buffer_size(self.buffer_size)
    }

    /// 获取配置摘要信息
    pub fn get_summary(&self) -> String {
        format!(
            "配置摘要:\n\
            - 缓冲区大小: {} 字节\n\
            - 刷新间隔: {} 毫秒\n\
            - User-Agent: {}",
            self.buffer_size,
            self.tick_interval.as_millis(),
            self.user_agent
        )
    }
}
