// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One blocking call across the runtime boundary.
//!
//! The caller registers a [`PendingInvocation`] in the pending table, hands
//! it to the service context, and waits on a reply channel with a deadline.
//! On timeout the entry is removed and its token cancelled, which drops the
//! in-flight transport future on the service side. A request that already
//! reached a remote server may still run to completion there.

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use agenda_core::{AgendaError, ToolArguments, ToolResponse, ToolTransport};
use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::service::{Reply, ServiceCommand, ServiceHandle, stopped};

/// A call in flight, owned by the bridge until it completes or times out.
pub(crate) struct PendingInvocation {
    pub id: u64,
    pub tool: String,
    pub arguments: ToolArguments,
    pub cancel: CancellationToken,
    pub reply: Reply<ToolResponse>,
}

impl ServiceHandle {
    /// Invokes `tool` on the service context and blocks for its text.
    ///
    /// Fails with [`AgendaError::ToolInvocationTimeout`] past the deadline,
    /// [`AgendaError::EmptyToolResponse`] on zero content elements, and
    /// [`AgendaError::Transport`] when the service context or the remote
    /// side goes away, and [`AgendaError::Internal`] when the tool panics.
    pub fn call(&self, tool: &str, arguments: ToolArguments) -> Result<String, AgendaError> {
        self.ensure_off_service_thread()?;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let cancel = CancellationToken::new();
        let (reply, response) = std::sync::mpsc::sync_channel(1);

        self.pending.insert(id, cancel.clone());
        let invocation = PendingInvocation {
            id,
            tool: tool.to_string(),
            arguments,
            cancel,
            reply,
        };
        if self.commands.send(ServiceCommand::Invoke(invocation)).is_err() {
            self.pending.remove(&id);
            return Err(stopped());
        }
        debug!(invocation_id = id, tool, "invocation submitted");

        let outcome = wait(&response, self.timeout, || AgendaError::ToolInvocationTimeout {
            tool: tool.to_string(),
            after: self.timeout,
        });

        let result = match outcome {
            Ok(result) => result,
            Err(err) => {
                if let Some((_, token)) = self.pending.remove(&id) {
                    token.cancel();
                }
                warn!(invocation_id = id, tool, error = %err, "invocation abandoned");
                return Err(err);
            }
        };

        first_text(tool, result?)
    }
}

/// Waits for a reply. The outer error is the bridge's own (deadline,
/// disconnect); the inner result is whatever the service produced.
pub(crate) fn wait<T>(
    response: &Receiver<Result<T, AgendaError>>,
    timeout: Duration,
    on_timeout: impl FnOnce() -> AgendaError,
) -> Result<Result<T, AgendaError>, AgendaError> {
    match response.recv_timeout(timeout) {
        Ok(result) => Ok(result),
        Err(RecvTimeoutError::Timeout) => Err(on_timeout()),
        Err(RecvTimeoutError::Disconnected) => Err(AgendaError::transport(
            "service context stopped before the call completed",
        )),
    }
}

fn first_text(tool: &str, response: ToolResponse) -> Result<String, AgendaError> {
    response
        .content
        .into_iter()
        .next()
        .map(|item| item.text)
        .ok_or_else(|| AgendaError::EmptyToolResponse {
            tool: tool.to_string(),
        })
}

/// Service side of one invocation.
pub(crate) async fn run(
    transport: Arc<dyn ToolTransport>,
    invocation: PendingInvocation,
    pending: Arc<DashMap<u64, CancellationToken>>,
) {
    let PendingInvocation {
        id,
        tool,
        arguments,
        cancel,
        reply,
    } = invocation;

    let mut call = tokio::spawn({
        let tool = tool.clone();
        async move { transport.call_tool(&tool, arguments).await }
    });

    let result = tokio::select! {
        () = cancel.cancelled() => {
            call.abort();
            debug!(invocation_id = id, tool = tool.as_str(), "remote call cancelled");
            return;
        }
        joined = &mut call => match joined {
            Ok(result) => result,
            Err(err) if err.is_panic() => {
                error!(invocation_id = id, tool = tool.as_str(), "tool panicked");
                Err(AgendaError::Internal(format!("tool `{tool}` panicked")))
            }
            Err(err) => Err(AgendaError::Internal(format!("tool `{tool}` did not complete: {err}"))),
        },
    };

    pending.remove(&id);
    // The caller may already have given up.
    let _ = reply.send(result);
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_core::ContentItem;

    #[test]
    fn first_text_takes_the_first_element() {
        let response = ToolResponse {
            content: vec![ContentItem::text("one"), ContentItem::text("two")],
            is_error: false,
        };
        assert_eq!(first_text("t", response).unwrap(), "one");
    }

    #[test]
    fn empty_content_is_explicit() {
        let err = first_text("get_time", ToolResponse::default()).unwrap_err();
        assert!(matches!(err, AgendaError::EmptyToolResponse { tool } if tool == "get_time"));
    }

    #[test]
    fn wait_distinguishes_timeout_from_disconnect() {
        let (tx, rx) = std::sync::mpsc::sync_channel::<Result<(), AgendaError>>(1);
        let err = wait(&rx, Duration::from_millis(10), || AgendaError::Internal("late".into()))
            .unwrap_err();
        assert!(matches!(err, AgendaError::Internal(_)));

        drop(tx);
        let err = wait(&rx, Duration::from_millis(10), || AgendaError::Internal("late".into()))
            .unwrap_err();
        assert!(matches!(err, AgendaError::Transport { .. }));
    }
}
