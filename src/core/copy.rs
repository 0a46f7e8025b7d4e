use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::core::error::DownloadError;
use crate::core::status::DownloadStatus;

/// 按固定大小的块把 `src` 拷贝到 `dest`，每处理一块发送一次累计状态
///
/// 遇到流结束、读错误或写错误时，发送最后一个状态后立即返回，
/// 不依赖接收方去判断是否结束。接收方已经关闭时同样直接返回。
/// 返回值是最后一次构造的状态。
pub async fn copy_verbose<W, R>(
    dest: &mut W,
    src: &mut R,
    buffer_size: usize,
    status_tx: &mpsc::Sender<DownloadStatus>,
) -> DownloadStatus
where
    W: AsyncWrite + Unpin,
    R: AsyncRead + Unpin,
{
    // 长度为 0 的缓冲区会让 read 永远返回 0，被误判为流结束
    let mut buf = vec![0u8; buffer_size.max(1)];
    let mut status = DownloadStatus::default();

    loop {
        match src.read(&mut buf).await {
            Ok(0) => match dest.flush().await {
                Ok(()) => status.is_complete = true,
                Err(e) => status.error = Some(DownloadError::write(e)),
            },
            Ok(nread) => match dest.write_all(&buf[..nread]).await {
                Ok(()) => status.bytes_downloaded += nread as u64,
                Err(e) => status.error = Some(DownloadError::write(e)),
            },
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => status.error = Some(DownloadError::read(e)),
        }

        if status_tx.send(status.clone()).await.is_err() {
            log::debug!("状态接收方已关闭，停止拷贝（已写入 {} 字节）", status.bytes_downloaded);
            return status;
        }

        if status.is_terminal() {
            return status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::pin::Pin;
    use std::task::{Context, Poll};
    use tokio_test::io::Builder;

    /// 接收通道中已有的所有状态
    fn drain(mut rx: mpsc::Receiver<DownloadStatus>) -> Vec<DownloadStatus> {
        let mut statuses = Vec::new();
        while let Ok(status) = rx.try_recv() {
            statuses.push(status);
        }
        statuses
    }

    /// 接受固定字节数之后每次写入都失败的写入端
    struct LimitedWriter {
        capacity: usize,
        written: Vec<u8>,
    }

    impl AsyncWrite for LimitedWriter {
        fn poll_write(
            mut self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            buf: &[u8],
        ) -> Poll<io::Result<usize>> {
            if self.written.len() + buf.len() > self.capacity {
                return Poll::Ready(Err(io::Error::new(io::ErrorKind::Other, "no space left on device")));
            }
            self.written.extend_from_slice(buf);
            Poll::Ready(Ok(buf.len()))
        }

        fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }

        fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
            Poll::Ready(Ok(()))
        }
    }

    #[tokio::test]
    async fn test_copy_emits_per_read_and_completes() {
        let mut src = Builder::new().read(b"hello ").read(b"world").build();
        let mut dest = Vec::new();
        let (tx, rx) = mpsc::channel(64);

        let last = copy_verbose(&mut dest, &mut src, 4, &tx).await;
        drop(tx);

        assert_eq!(dest, b"hello world");
        assert!(last.is_complete);
        assert_eq!(last.bytes_downloaded, 11);

        let statuses = drain(rx);
        // "hell" "o " "worl" "d" 以及结束
        assert_eq!(statuses.len(), 5);
        let totals: Vec<u64> = statuses.iter().map(|s| s.bytes_downloaded).collect();
        assert_eq!(totals, vec![4, 6, 10, 11, 11]);
        assert!(statuses[..4].iter().all(|s| !s.is_terminal()));

        let final_status = statuses.last().unwrap();
        assert!(final_status.is_complete);
        assert!(final_status.error.is_none());
    }

    #[tokio::test]
    async fn test_copy_empty_source() {
        let mut src = Builder::new().build();
        let mut dest = Vec::new();
        let (tx, rx) = mpsc::channel(8);

        copy_verbose(&mut dest, &mut src, 4096, &tx).await;
        drop(tx);

        let statuses = drain(rx);
        assert_eq!(statuses.len(), 1);
        assert!(statuses[0].is_complete);
        assert_eq!(statuses[0].bytes_downloaded, 0);
        assert!(dest.is_empty());
    }

    #[tokio::test]
    async fn test_copy_write_failure_keeps_prior_total() {
        let mut src = Builder::new().read(b"abcdefghij").build();
        let mut dest = LimitedWriter { capacity: 8, written: Vec::new() };
        let (tx, rx) = mpsc::channel(8);

        let last = copy_verbose(&mut dest, &mut src, 4, &tx).await;
        drop(tx);

        let statuses = drain(rx);
        // "abcd" "efgh" 写入成功，"ij" 写入失败
        assert_eq!(statuses.len(), 3);
        let failed = statuses.last().unwrap();
        assert!(matches!(failed.error, Some(DownloadError::Write(_))));
        assert!(!failed.is_complete);
        assert_eq!(failed.bytes_downloaded, 8);
        assert_eq!(last.bytes_downloaded, 8);
        assert_eq!(dest.written, b"abcdefgh");
    }

    #[tokio::test]
    async fn test_copy_read_failure_is_terminal() {
        let mut src = Builder::new()
            .read(b"abc")
            .read_error(io::Error::new(io::ErrorKind::ConnectionReset, "connection reset by peer"))
            .build();
        let mut dest = Vec::new();
        let (tx, rx) = mpsc::channel(8);

        let last = copy_verbose(&mut dest, &mut src, 16, &tx).await;
        drop(tx);

        let statuses = drain(rx);
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].bytes_downloaded, 3);
        assert!(statuses[0].error.is_none());

        match &last.error {
            Some(DownloadError::Read(e)) => assert_eq!(e.kind(), io::ErrorKind::ConnectionReset),
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(last.bytes_downloaded, 3);
        assert_eq!(dest, b"abc");
    }

    #[tokio::test]
    async fn test_copy_stops_when_receiver_dropped() {
        let mut src: &[u8] = b"abcdefgh";
        let mut dest = Vec::new();
        let (tx, rx) = mpsc::channel(8);
        drop(rx);

        let last = copy_verbose(&mut dest, &mut src, 4, &tx).await;

        // 第一块写入后发送失败，直接返回
        assert_eq!(last.bytes_downloaded, 4);
        assert!(!last.is_terminal());
        assert_eq!(dest, b"abcd");
        assert_eq!(src, b"efgh");
    }
}
