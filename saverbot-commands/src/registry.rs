//! Trigger-phrase dispatch with per-command scope filtering.
//!
//! The host runtime's command parsing boils down to: the message text
//! starts with a registered trigger phrase, and whatever follows the
//! trigger (after whitespace) is the argument. Scope is checked before the
//! handler runs, so group-only commands never fire from direct messages.

use crate::reply::ReplySink;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Kind of conversation a message arrived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageScope {
    Group,
    Private,
}

/// Which scopes a command is willing to fire in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeFilter {
    GroupOnly,
    Any,
}

impl ScopeFilter {
    pub fn allows(&self, scope: MessageScope) -> bool {
        match self {
            Self::GroupOnly => scope == MessageScope::Group,
            Self::Any => true,
        }
    }
}

/// A message as the host runtime hands it to us.
#[derive(Debug, Clone)]
pub struct MessageEvent {
    pub scope: MessageScope,
    /// Opaque identifier of the originating conversation, for logs only.
    pub conversation: String,
    pub text: String,
}

#[async_trait]
pub trait Command: Send + Sync {
    /// The phrase that triggers this command.
    fn trigger(&self) -> &str;

    fn scope(&self) -> ScopeFilter {
        ScopeFilter::Any
    }

    /// Handle one invocation. `arg` is the trimmed text after the trigger.
    async fn invoke(&self, arg: &str, sink: &dyn ReplySink) -> Result<()>;
}

#[derive(Default, Clone)]
pub struct CommandRegistry {
    commands: Vec<Arc<dyn Command>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, command: Arc<dyn Command>) -> &mut Self {
        self.commands.push(command);
        self
    }

    /// Route one message. Returns `true` when a command fired.
    ///
    /// A scope mismatch is a silent drop, mirroring the host's group
    /// filter. Handler errors are logged here and go no further — a broken
    /// command must not take the host loop down with it.
    pub async fn dispatch(&self, event: &MessageEvent, sink: &dyn ReplySink) -> bool {
        for command in &self.commands {
            let Some(arg) = split_trigger(command.trigger(), &event.text) else {
                continue;
            };
            if !command.scope().allows(event.scope) {
                tracing::debug!(
                    trigger = command.trigger(),
                    conversation = %event.conversation,
                    "command.scope_filtered"
                );
                return false;
            }
            if let Err(err) = command.invoke(arg, sink).await {
                tracing::error!(
                    trigger = command.trigger(),
                    conversation = %event.conversation,
                    error = %err,
                    "command.handler_error"
                );
            }
            return true;
        }
        false
    }
}

/// Match `text` against a trigger phrase; on success return the trimmed
/// trailing argument. The trigger must be the whole text or be followed by
/// whitespace, so `查看文章X` does not fire `查看文章`.
fn split_trigger<'a>(trigger: &str, text: &'a str) -> Option<&'a str> {
    let rest = text.trim_start().strip_prefix(trigger)?;
    if rest.is_empty() {
        return Some("");
    }
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_alone_yields_empty_argument() {
        assert_eq!(split_trigger("查看文章", "查看文章"), Some(""));
    }

    #[test]
    fn trailing_text_is_trimmed() {
        assert_eq!(split_trigger("查看文章", "查看文章  P1001 "), Some("P1001"));
    }

    #[test]
    fn glued_suffix_does_not_match() {
        assert_eq!(split_trigger("查看文章", "查看文章P1001"), None);
    }

    #[test]
    fn unrelated_text_does_not_match() {
        assert_eq!(split_trigger("查看文章", "帮我查文章 P1001"), None);
    }

    #[test]
    fn leading_whitespace_is_tolerated() {
        assert_eq!(split_trigger("查看文章", "  查看文章 P1001"), Some("P1001"));
    }

    #[test]
    fn scope_filter_gates_private_messages() {
        assert!(ScopeFilter::GroupOnly.allows(MessageScope::Group));
        assert!(!ScopeFilter::GroupOnly.allows(MessageScope::Private));
        assert!(ScopeFilter::Any.allows(MessageScope::Private));
    }
}
