// SPDX-FileCopyrightText: 2026 Agenda Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The service context: one thread, one single-threaded runtime, one
//! transport.
//!
//! Commands arrive over an unbounded channel. Each invocation runs as its
//! own task so a slow tool never blocks discovery or other calls, and each
//! carries a cancellation token the caller fires on timeout.

use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::thread::{JoinHandle, ThreadId};
use std::time::Duration;

use agenda_core::{AgendaError, ToolDescriptor, ToolTransport};
use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::invocation::{self, PendingInvocation};
use crate::table::ToolTable;

pub(crate) type Reply<T> = std::sync::mpsc::SyncSender<Result<T, AgendaError>>;

pub(crate) enum ServiceCommand {
    Invoke(PendingInvocation),
    Discover { reply: Reply<Vec<ToolDescriptor>> },
    Shutdown,
}

/// Owns the service thread. Dropping it stops the runtime and joins the
/// thread; in-flight calls then fail with a transport error.
pub struct ServiceContext {
    handle: ServiceHandle,
    thread: Option<JoinHandle<()>>,
}

/// Cheap, cloneable, thread-safe entry point into a [`ServiceContext`].
#[derive(Clone)]
pub struct ServiceHandle {
    pub(crate) commands: mpsc::UnboundedSender<ServiceCommand>,
    pub(crate) pending: Arc<DashMap<u64, CancellationToken>>,
    pub(crate) next_id: Arc<AtomicU64>,
    pub(crate) service_thread: ThreadId,
    pub(crate) timeout: Duration,
}

impl ServiceContext {
    /// Spawns the service thread and its runtime around `transport`.
    pub fn start(transport: Arc<dyn ToolTransport>, timeout: Duration) -> Result<Self, AgendaError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AgendaError::Internal(format!("failed to build service runtime: {e}")))?;

        let (commands, receiver) = mpsc::unbounded_channel();
        let pending: Arc<DashMap<u64, CancellationToken>> = Arc::new(DashMap::new());

        let thread = std::thread::Builder::new()
            .name("agenda-service".into())
            .spawn({
                let pending = Arc::clone(&pending);
                move || runtime.block_on(serve(transport, receiver, pending))
            })
            .map_err(|e| AgendaError::Internal(format!("failed to spawn service thread: {e}")))?;

        info!(timeout_secs = timeout.as_secs_f64(), "service context started");

        Ok(Self {
            handle: ServiceHandle {
                commands,
                pending,
                next_id: Arc::new(AtomicU64::new(1)),
                service_thread: thread.thread().id(),
                timeout,
            },
            thread: Some(thread),
        })
    }

    pub fn handle(&self) -> ServiceHandle {
        self.handle.clone()
    }
}

impl Drop for ServiceContext {
    fn drop(&mut self) {
        let _ = self.handle.commands.send(ServiceCommand::Shutdown);
        if let Some(thread) = self.thread.take()
            && thread.join().is_err()
        {
            warn!("service thread panicked");
        }
    }
}

impl ServiceHandle {
    /// Lists the remote tools, bounded by the call timeout.
    pub fn discover(&self) -> Result<ToolTable, AgendaError> {
        self.ensure_off_service_thread()?;
        let (reply, response) = std::sync::mpsc::sync_channel(1);
        self.commands
            .send(ServiceCommand::Discover { reply })
            .map_err(|_| stopped())?;

        let tools = invocation::wait(&response, self.timeout, || AgendaError::ToolInvocationTimeout {
            tool: "tools/list".into(),
            after: self.timeout,
        })??;
        Ok(ToolTable::new(tools))
    }

    /// Number of invocations submitted and not yet finished or abandoned.
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Blocking on the service thread would wait on a reply that thread
    /// itself has to produce.
    pub(crate) fn ensure_off_service_thread(&self) -> Result<(), AgendaError> {
        if std::thread::current().id() == self.service_thread {
            return Err(AgendaError::Internal(
                "blocking tool call issued from inside the service context".into(),
            ));
        }
        Ok(())
    }
}

pub(crate) fn stopped() -> AgendaError {
    AgendaError::transport("service context is not running")
}

async fn serve(
    transport: Arc<dyn ToolTransport>,
    mut commands: mpsc::UnboundedReceiver<ServiceCommand>,
    pending: Arc<DashMap<u64, CancellationToken>>,
) {
    while let Some(command) = commands.recv().await {
        match command {
            ServiceCommand::Invoke(invocation) => {
                tokio::spawn(invocation::run(
                    Arc::clone(&transport),
                    invocation,
                    Arc::clone(&pending),
                ));
            }
            ServiceCommand::Discover { reply } => {
                let transport = Arc::clone(&transport);
                tokio::spawn(async move {
                    let _ = reply.send(transport.list_tools().await);
                });
            }
            ServiceCommand::Shutdown => break,
        }
    }
    debug!(abandoned = pending.len(), "service context stopping");
    for entry in pending.iter() {
        entry.value().cancel();
    }
    pending.clear();
}
