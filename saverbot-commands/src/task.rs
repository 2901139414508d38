//! Save-task commands: create a save task and query its status.
//!
//! Both mirror the article command's error taxonomy so replies stay
//! predictable: transport status errors report the code, anything
//! unexpected logs and falls back to the generic reply.

use crate::registry::Command;
use crate::reply::ReplySink;
use crate::{transport_failure_reply, GENERIC_FAILURE_REPLY};
use anyhow::Result;
use async_trait::async_trait;
use saverbot_client::types::{status_label, SaveTaskRequest};
use saverbot_client::{SaverApi, SaverError};

pub struct SaveTaskCommand {
    api: SaverApi,
}

impl SaveTaskCommand {
    pub const TRIGGER: &'static str = "创建保存任务";

    pub fn new(api: SaverApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Command for SaveTaskCommand {
    fn trigger(&self) -> &str {
        Self::TRIGGER
    }

    async fn invoke(&self, arg: &str, sink: &dyn ReplySink) -> Result<()> {
        let mut parts = arg.split_whitespace();
        let (Some(target), Some(target_id)) = (parts.next(), parts.next()) else {
            return sink.send("用法：创建保存任务 <target> <targetId>").await;
        };

        let request = SaveTaskRequest::save(target, target_id);
        let reply = match self.api.create_task(&request).await {
            Ok(envelope) => {
                let accepted = envelope.is_success();
                match envelope.data.and_then(|d| d.task_id) {
                    Some(task_id) if accepted => format!("保存任务已创建，ID: {task_id}"),
                    _ => "创建失败".to_string(),
                }
            }
            Err(SaverError::Transport { status }) => transport_failure_reply(status),
            Err(err) => {
                tracing::error!(
                    target_kind = %target,
                    target_id = %target_id,
                    error = %err,
                    "task.create.failed"
                );
                GENERIC_FAILURE_REPLY.to_string()
            }
        };
        sink.send(&reply).await
    }
}

pub struct TaskStatusCommand {
    api: SaverApi,
}

impl TaskStatusCommand {
    pub const TRIGGER: &'static str = "查询任务状态";

    pub fn new(api: SaverApi) -> Self {
        Self { api }
    }
}

#[async_trait]
impl Command for TaskStatusCommand {
    fn trigger(&self) -> &str {
        Self::TRIGGER
    }

    async fn invoke(&self, arg: &str, sink: &dyn ReplySink) -> Result<()> {
        if arg.is_empty() {
            return sink.send("请提供任务 ID").await;
        }

        let reply = match self.api.query_task(arg).await {
            Ok(envelope) => {
                if envelope.is_success() {
                    match envelope.data {
                        Some(task) => {
                            format!("任务 {arg} 状态: {}", status_label(task.status))
                        }
                        None => "任务不存在或返回为空".to_string(),
                    }
                } else {
                    "任务不存在或返回为空".to_string()
                }
            }
            Err(SaverError::Transport { status }) => transport_failure_reply(status),
            Err(err) => {
                tracing::error!(task_id = %arg, error = %err, "task.status.failed");
                GENERIC_FAILURE_REPLY.to_string()
            }
        };
        sink.send(&reply).await
    }
}
