use std::io::{self, Stderr, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::format::format_size;
use crate::core::{DownloadError, DownloadStatus};

/// 默认刷新间隔
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(500);

/// 下载的最终结果
#[derive(Debug, Clone)]
pub enum TransferOutcome {
    Completed(u64),
    Failed(DownloadError),
}

// 结构体：ProgressReporter
// 定时刷新进度行，并根据最近一次收到的状态决定何时结束
pub struct ProgressReporter<O: Write, E: Write> {
    out: O,
    err: E,
    tick_interval: Duration,
}

impl ProgressReporter<Stdout, Stderr> {
    /// 输出到标准输出 / 标准错误
    pub fn stdio(tick_interval: Duration) -> Self {
        Self::new(io::stdout(), io::stderr(), tick_interval)
    }
}

impl<O: Write, E: Write> ProgressReporter<O, E> {
    pub fn new(out: O, err: E, tick_interval: Duration) -> Self {
        ProgressReporter { out, err, tick_interval }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    /// 同时等待定时器和状态通道，直到看到完成或失败
    ///
    /// 状态到达时只覆盖 `last_status`，输出和结束判断都在定时器触发时进行。
    pub async fn run(&mut self, mut status_rx: mpsc::Receiver<DownloadStatus>) -> io::Result<TransferOutcome> {
        let mut ticker = time::interval_at(Instant::now() + self.tick_interval, self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut last_status = DownloadStatus::default();
        let mut channel_open = true;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if let Some(outcome) = self.on_tick(&last_status, channel_open)? {
                        return Ok(outcome);
                    }
                }
                status = status_rx.recv(), if channel_open => match status {
                    Some(status) => last_status = status,
                    None => {
                        log::debug!("状态通道已关闭");
                        channel_open = false;
                    }
                },
            }
        }
    }

    fn on_tick(&mut self, last_status: &DownloadStatus, channel_open: bool) -> io::Result<Option<TransferOutcome>> {
        let (size, unit) = format_size(last_status.bytes_downloaded);

        if last_status.is_complete {
            queue!(
                self.out,
                Clear(ClearType::CurrentLine),
                MoveToColumn(0),
                Print(format!("completed: {:.2} {}\n", size, unit))
            )?;
            self.out.flush()?;
            log::info!("下载完成，共 {} 字节", last_status.bytes_downloaded);
            return Ok(Some(TransferOutcome::Completed(last_status.bytes_downloaded)));
        }

        // worker 没有发出最终状态就退出了
        let error = match (&last_status.error, channel_open) {
            (Some(error), _) => Some(error.clone()),
            (None, false) => Some(DownloadError::WorkerExited),
            (None, true) => None,
        };
        if let Some(error) = error {
            queue!(self.out, Clear(ClearType::CurrentLine), MoveToColumn(0))?;
            self.out.flush()?;
            writeln!(self.err, "download failed: {}", error)?;
            self.err.flush()?;
            log::info!("下载失败: {}", error);
            return Ok(Some(TransferOutcome::Failed(error)));
        }

        queue!(
            self.out,
            Clear(ClearType::CurrentLine),
            MoveToColumn(0),
            Print(format!("{:.2} {}", size, unit))
        )?;
        self.out.flush()?;
        Ok(None)
    }
}
