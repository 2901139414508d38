use anyhow::Result;
use async_trait::async_trait;

/// Reply capability bound to the conversation that triggered a command.
///
/// The host runtime provides the implementation (group message send,
/// console print, test recorder). Handlers call it exactly once per
/// invocation.
#[async_trait]
pub trait ReplySink: Send + Sync {
    async fn send(&self, text: &str) -> Result<()>;
}
