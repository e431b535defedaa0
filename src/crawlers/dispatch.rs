use crate::results::Request;
use tokio::sync::mpsc;

/// Sending half of the request queue shared with the worker pool
#[derive(Debug, Clone)]
pub(crate) enum RequestSender {
    Unbounded(mpsc::UnboundedSender<Request>),
    Bounded(mpsc::Sender<Request>),
}

/// Receiving half of the request queue, shared by all workers
#[derive(Debug)]
pub(crate) enum RequestReceiver {
    Unbounded(mpsc::UnboundedReceiver<Request>),
    Bounded(mpsc::Receiver<Request>),
}

impl RequestReceiver {
    pub async fn recv(&mut self) -> Option<Request> {
        match self {
            RequestReceiver::Unbounded(rx) => rx.recv().await,
            RequestReceiver::Bounded(rx) => rx.recv().await,
        }
    }
}

/// Creates the request queue. `None` is unbounded; `Some(n)` must be non-zero.
pub(crate) fn request_channel(capacity: Option<usize>) -> (RequestSender, RequestReceiver) {
    match capacity {
        Some(capacity) => {
            let (tx, rx) = mpsc::channel(capacity);
            (RequestSender::Bounded(tx), RequestReceiver::Bounded(rx))
        }
        None => {
            let (tx, rx) = mpsc::unbounded_channel();
            (RequestSender::Unbounded(tx), RequestReceiver::Unbounded(rx))
        }
    }
}

/// Forwards requests to the worker pool and counts how many are in flight.
///
/// Owned by the frontier controller; nothing else touches the counter.
#[derive(Debug)]
pub(crate) struct Dispatcher {
    tx: RequestSender,
    in_flight: usize,
    dispatched: usize,
}

impl Dispatcher {
    pub fn new(tx: RequestSender) -> Self {
        Self {
            tx,
            in_flight: 0,
            dispatched: 0,
        }
    }

    /// Hands a request to the pool without ever waiting on the queue.
    ///
    /// On a bounded queue the send runs on its own task, so a full queue cannot
    /// stall the controller while it should be draining results.
    pub fn submit(&mut self, request: Request) {
        self.in_flight += 1;
        self.dispatched += 1;
        ::log::trace!(
            "Dispatching {} at depth {} ({} in flight)",
            request.url,
            request.remaining_depth,
            self.in_flight
        );

        match &self.tx {
            RequestSender::Unbounded(tx) => {
                if let Err(e) = tx.send(request) {
                    ::log::error!("Worker pool is gone, dropped request for {}", e.0.url);
                }
            }
            RequestSender::Bounded(tx) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    if let Err(e) = tx.send(request).await {
                        ::log::error!("Worker pool is gone, dropped request for {}", e.0.url);
                    }
                });
            }
        }
    }

    /// Records that one result has been consumed
    pub fn complete(&mut self) {
        debug_assert!(self.in_flight > 0, "result consumed with nothing in flight");
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn dispatched(&self) -> usize {
        self.dispatched
    }
}
