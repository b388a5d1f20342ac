use async_trait::async_trait;
use std::io::{self, BufRead};
use tokio::io::{AsyncBufRead, Lines};
use tokio::sync::mpsc;

/// 控制台的逐行输入源；`Ok(None)` 表示输入结束
#[async_trait]
pub trait LineSource: Send {
    async fn next_line(&mut self) -> io::Result<Option<String>>;
}

#[async_trait]
impl<R> LineSource for Lines<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        Lines::next_line(self).await
    }
}

/// 由独立线程阻塞读取、经通道转交的行
///
/// 读取线程不属于运行时，关闭运行时不会等待它返回。
pub struct ThreadLines {
    rx: mpsc::Receiver<io::Result<String>>,
}

#[async_trait]
impl LineSource for ThreadLines {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.rx.recv().await.transpose()
    }
}

/// 在名为 `roster-stdin` 的线程上读取 `reader`，读到结尾或出错后线程退出
pub fn spawn_line_reader<R>(reader: R) -> io::Result<ThreadLines>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);
    std::thread::Builder::new()
        .name("roster-stdin".to_string())
        .spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                // 接收端已关闭或读取失败都结束线程
                if tx.blocking_send(line).is_err() || failed {
                    break;
                }
            }
        })?;
    Ok(ThreadLines { rx })
}
