//! The article lookup command.
//!
//! One invocation is one archive round-trip: query, inspect the envelope,
//! send a single formatted reply. The error taxonomy is deliberate — a
//! non-200 transport status reports the code, a logically failed envelope
//! reports the server's message, and everything else (network faults,
//! undecodable bodies) collapses into one generic reply plus a log entry.

use crate::registry::{Command, ScopeFilter};
use crate::reply::ReplySink;
use crate::{transport_failure_reply, GENERIC_FAILURE_REPLY};
use anyhow::Result;
use async_trait::async_trait;
use saverbot_client::types::Article;
use saverbot_client::{SaverApi, SaverError};

pub struct ArticleQueryCommand {
    api: SaverApi,
}

impl ArticleQueryCommand {
    pub const TRIGGER: &'static str = "查看文章";

    pub fn new(api: SaverApi) -> Self {
        Self { api }
    }

    /// Run the lookup and produce the reply text for the two
    /// envelope-level outcomes. Transport and decode failures stay errors.
    async fn lookup(&self, identifier: &str) -> Result<String, SaverError> {
        let envelope = self.api.query_article(identifier).await?;
        if envelope.is_success() {
            let article = envelope.data.unwrap_or_default();
            Ok(format_article(&article))
        } else {
            Ok(format!("查询失败：{}", envelope.failure_message()))
        }
    }
}

#[async_trait]
impl Command for ArticleQueryCommand {
    fn trigger(&self) -> &str {
        Self::TRIGGER
    }

    fn scope(&self) -> ScopeFilter {
        ScopeFilter::GroupOnly
    }

    async fn invoke(&self, arg: &str, sink: &dyn ReplySink) -> Result<()> {
        let reply = match self.lookup(arg).await {
            Ok(text) => text,
            Err(SaverError::Transport { status }) => transport_failure_reply(status),
            Err(err) => {
                tracing::error!(identifier = %arg, error = %err, "article.query.failed");
                GENERIC_FAILURE_REPLY.to_string()
            }
        };
        sink.send(&reply).await
    }
}

fn format_article(article: &Article) -> String {
    format!(
        "查询成功！\n文章ID {} | 文章标题 {} | 作者 {} | 最后更新时间 {} | 点赞量 {} \n文章内容 \n {}",
        display(&article.id),
        display(&article.title),
        display(&article.author_id),
        display(&article.updated_at),
        display(&article.upvote),
        display(&article.content),
    )
}

// Absent fields render as the literal `None`, matching what the archive's
// other consumers show for missing data.
fn display(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("None")
}
