//! 命令投递
//!
//! 向宿主的命令队列异步投递命令字符串：投递即返回，
//! 不等待执行也不报告执行结果（fire-and-forget）。
//! 投递失败（如宿主端已关闭）只记日志，不向调用方传播。

use std::sync::mpsc;

/// 命令接收端的抽象
pub trait CommandSink {
    /// 投递单条命令表达式
    fn post(&self, expression: &str);

    /// 投递带参数的命令
    ///
    /// 各记号以空格连接成一条表达式后投递。
    fn send(&self, args: &[&str]) {
        self.post(&args.join(" "));
    }
}

/// 基于通道的命令队列
///
/// 发送端可自由克隆；接收端由宿主侧持有并依次消费。
#[derive(Debug, Clone)]
pub struct QueuedCommandSink {
    tx: mpsc::Sender<String>,
}

impl QueuedCommandSink {
    /// 创建命令队列，返回发送端与宿主侧的接收端
    pub fn new() -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }
}

impl CommandSink for QueuedCommandSink {
    fn post(&self, expression: &str) {
        if self.tx.send(expression.to_string()).is_err() {
            // 宿主端已关闭，丢弃命令
            tracing::debug!(expression, "command dropped, host side closed");
            return;
        }
        tracing::debug!(expression, "command posted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_delivers_expression() {
        let (sink, rx) = QueuedCommandSink::new();
        sink.post("ZOOM E");
        assert_eq!(rx.recv().unwrap(), "ZOOM E");
    }

    #[test]
    fn test_send_joins_tokens() {
        let (sink, rx) = QueuedCommandSink::new();
        sink.send(&["LINE", "0,0", "100,0", ""]);
        assert_eq!(rx.recv().unwrap(), "LINE 0,0 100,0 ");
    }

    #[test]
    fn test_post_after_receiver_dropped_is_silent() {
        let (sink, rx) = QueuedCommandSink::new();
        drop(rx);
        // 投递即返回，不 panic 也不报错
        sink.post("REGEN");
    }

    #[test]
    fn test_commands_arrive_in_order() {
        let (sink, rx) = QueuedCommandSink::new();
        sink.post("first");
        sink.post("second");
        assert_eq!(rx.recv().unwrap(), "first");
        assert_eq!(rx.recv().unwrap(), "second");
    }
}
