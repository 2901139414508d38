//! Chat command surface for the archive bot.
//!
//! The host messaging runtime hands us a parsed message and a reply
//! capability bound to the originating conversation; everything in here is
//! the glue between that surface and the archive API. A command invocation
//! sends exactly one reply on every path — the registry and handlers are
//! written so no error escapes into the host loop.

pub mod article;
pub mod registry;
pub mod reply;
pub mod task;

pub use article::ArticleQueryCommand;
pub use registry::{Command, CommandRegistry, MessageEvent, MessageScope, ScopeFilter};
pub use reply::ReplySink;
pub use task::{SaveTaskCommand, TaskStatusCommand};

/// Fallback reply for anything the error taxonomy doesn't name.
pub(crate) const GENERIC_FAILURE_REPLY: &str = "查询过程中出现异常，请稍后再试。";

pub(crate) fn transport_failure_reply(status: u16) -> String {
    format!("网络请求失败，状态码：{status}")
}
