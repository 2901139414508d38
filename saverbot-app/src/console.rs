//! Line-oriented console session standing in for a real messaging adapter.
//!
//! Each stdin line is dispatched as a group-scoped message and replies are
//! printed to stdout, which is enough to exercise the whole command
//! pipeline against a live archive.
//
// TODO: replace this with an OneBot/QQ adapter once we settle on one; the
// registry and sink interfaces are already shaped for it.

use anyhow::Result;
use async_trait::async_trait;
use saverbot_commands::{CommandRegistry, MessageEvent, MessageScope, ReplySink};
use tokio::io::{AsyncBufReadExt, BufReader};

struct StdoutSink;

#[async_trait]
impl ReplySink for StdoutSink {
    async fn send(&self, text: &str) -> Result<()> {
        println!("{text}");
        Ok(())
    }
}

pub async fn run(registry: CommandRegistry) -> Result<()> {
    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();
    let sink = StdoutSink;

    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text == "exit" {
            break;
        }

        let event = MessageEvent {
            scope: MessageScope::Group,
            conversation: "console".into(),
            text: text.to_string(),
        };
        if !registry.dispatch(&event, &sink).await {
            // Mirrors the host runtime: unmatched chatter is dropped.
            tracing::debug!(text = %event.text, "console.unmatched");
        }
    }

    Ok(())
}
