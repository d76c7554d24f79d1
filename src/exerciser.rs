use std::{fmt, sync::Arc, time::Duration};

use tokio::{
    select,
    sync::watch,
    task::spawn,
    time::{sleep, timeout_at, Instant},
};
use tonic::{Code, Status};

use crate::error::ExerciserError;

/// Produces a fresh request payload for every call or send.
pub type RequestFactory<Req> = Arc<dyn Fn() -> Req + Send + Sync>;

/// The four RPC call shapes the exerciser can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallMode {
    Unary,
    ClientStream,
    ServerStream,
    Bidi,
}

impl fmt::Display for CallMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unary => "unary",
            Self::ClientStream => "client-streaming",
            Self::ServerStream => "server-streaming",
            Self::Bidi => "bidirectional-streaming",
        };
        write!(f, "{name}")
    }
}

/// One batch of work for [`run`]: which call shape to drive, how to build
/// request payloads, how many iterations, and the single time budget shared
/// by the whole batch.
///
/// The iteration count bounds unary calls and stream reads. For
/// client-streaming it has no protocol effect (that mode is a single
/// send-then-close-and-receive cycle). `pacing` delays consecutive
/// bidirectional sends; `None` sends back-to-back.
pub struct CallSpec<Req> {
    pub mode: CallMode,
    pub factory: RequestFactory<Req>,
    pub iterations: usize,
    pub timeout: Duration,
    pub pacing: Option<Duration>,
}

impl<Req> CallSpec<Req> {
    pub fn new(
        mode: CallMode,
        factory: RequestFactory<Req>,
        iterations: usize,
        timeout: Duration,
    ) -> Self {
        Self {
            mode,
            factory,
            iterations,
            timeout,
            pacing: None,
        }
    }

    #[must_use]
    pub fn with_pacing(mut self, pacing: Option<Duration>) -> Self {
        self.pacing = pacing;
        self
    }
}

/// Terminal state of one exercised call batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallStatus {
    Success,
    TimedOut,
    Failed(String),
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::TimedOut => write!(f, "timed out"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

/// Outcome of one [`run`] invocation. `summaries` preserves transport
/// delivery order; on `TimedOut` and `Failed` it holds whatever was received
/// before the batch stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallResult {
    pub mode: CallMode,
    pub elapsed: Duration,
    pub summaries: Vec<String>,
    pub status: CallStatus,
}

impl CallResult {
    pub fn received(&self) -> usize {
        self.summaries.len()
    }
}

impl fmt::Display for CallResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} messages in {:?} ({})",
            self.mode,
            self.received(),
            self.elapsed,
            self.status
        )
    }
}

/// Ordered results of a whole run, accumulated by the caller.
#[derive(Debug, Default)]
pub struct Report {
    results: Vec<CallResult>,
}

impl Report {
    pub fn push(&mut self, result: CallResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[CallResult] {
        &self.results
    }

    pub fn total_elapsed(&self) -> Duration {
        self.results.iter().map(|result| result.elapsed).sum()
    }
}

/// Renders a received payload for the result summary list.
pub trait Summarize {
    fn summarize(&self) -> String;
}

/// Pushes one request into an open send direction.
#[tonic::async_trait]
pub trait SendHandle<Req> {
    async fn send(&mut self, request: Req) -> Result<(), Status>;
}

/// Pulls the next message from an open receive direction.
/// `Ok(None)` signals clean end of data, never an error.
#[tonic::async_trait]
pub trait ReceiveHandle<Resp> {
    async fn receive(&mut self) -> Result<Option<Resp>, Status>;
}

/// An open client-streaming call: send any number of requests, then close
/// the send side and wait for the single aggregated response.
#[tonic::async_trait]
pub trait ClientStreamHandle<Req, Resp>: SendHandle<Req> {
    async fn close_and_receive(self) -> Result<Resp, Status>;
}

/// The four call primitives the exerciser drives, implemented over a live
/// connection. Opening a bidirectional call yields split sender/receiver
/// halves so the sender can run concurrently with the caller's read loop.
#[tonic::async_trait]
pub trait ExerciseClient {
    type Request: Send + 'static;
    type Response: Send + 'static;
    type ClientStream: ClientStreamHandle<Self::Request, Self::Response> + Send;
    type ServerStream: ReceiveHandle<Self::Response> + Send;
    type BidiSender: SendHandle<Self::Request> + Send + 'static;
    type BidiReceiver: ReceiveHandle<Self::Response> + Send;

    async fn unary(&mut self, request: Self::Request) -> Result<Self::Response, Status>;

    async fn open_client_stream(&mut self) -> Result<Self::ClientStream, Status>;

    async fn open_server_stream(
        &mut self,
        request: Self::Request,
    ) -> Result<Self::ServerStream, Status>;

    async fn open_bidi_stream(
        &mut self,
    ) -> Result<(Self::BidiSender, Self::BidiReceiver), Status>;
}

/// Drives one [`CallSpec`] against a connected client and produces one
/// [`CallResult`].
///
/// A single deadline covers the whole batch; every await inside is bounded
/// by it. Expiry yields `TimedOut` with partial results, a mid-call
/// transport failure yields `Failed` with partial results, and a failure to
/// open a streaming call is surfaced as [`ExerciserError::Connection`].
/// Never retries.
pub async fn run<C>(
    client: &mut C,
    spec: &CallSpec<C::Request>,
) -> Result<CallResult, ExerciserError>
where
    C: ExerciseClient,
    C::Response: Summarize,
{
    debug!(
        "Starting {} batch: {} iterations, {:?} budget",
        spec.mode, spec.iterations, spec.timeout
    );
    let started = Instant::now();
    let deadline = started + spec.timeout;

    let (summaries, status) = match spec.mode {
        CallMode::Unary => run_unary(client, spec, deadline).await?,
        CallMode::ClientStream => run_client_stream(client, spec, deadline).await?,
        CallMode::ServerStream => run_server_stream(client, spec, deadline).await?,
        CallMode::Bidi => run_bidi(client, spec, deadline).await?,
    };

    Ok(CallResult {
        mode: spec.mode,
        elapsed: started.elapsed(),
        summaries,
        status,
    })
}

type Outcome = (Vec<String>, CallStatus);

/// Maps a transport status to a terminal state. A deadline reported by the
/// transport is still a timeout, not a hard failure.
fn status_outcome(status: Status) -> CallStatus {
    if status.code() == Code::DeadlineExceeded {
        CallStatus::TimedOut
    } else {
        CallStatus::Failed(status.to_string())
    }
}

async fn run_unary<C>(
    client: &mut C,
    spec: &CallSpec<C::Request>,
    deadline: Instant,
) -> Result<Outcome, ExerciserError>
where
    C: ExerciseClient,
    C::Response: Summarize,
{
    let mut summaries = Vec::with_capacity(spec.iterations);
    for _ in 0..spec.iterations {
        let request = (spec.factory)();
        match timeout_at(deadline, client.unary(request)).await {
            Ok(Ok(response)) => {
                let summary = response.summarize();
                debug!("[{}] reply #{}: {summary}", spec.mode, summaries.len() + 1);
                summaries.push(summary);
            }
            Ok(Err(status)) => return Ok((summaries, status_outcome(status))),
            Err(_) => return Ok((summaries, CallStatus::TimedOut)),
        }
    }
    Ok((summaries, CallStatus::Success))
}

async fn run_server_stream<C>(
    client: &mut C,
    spec: &CallSpec<C::Request>,
    deadline: Instant,
) -> Result<Outcome, ExerciserError>
where
    C: ExerciseClient,
    C::Response: Summarize,
{
    let request = (spec.factory)();
    let mut stream = match timeout_at(deadline, client.open_server_stream(request)).await {
        Ok(Ok(stream)) => stream,
        Ok(Err(status)) => return Err(ExerciserError::Connection(status)),
        Err(_) => return Ok((Vec::new(), CallStatus::TimedOut)),
    };

    let mut summaries = Vec::new();
    // Cap reads at the iteration count in case the server streams forever.
    while summaries.len() < spec.iterations {
        match timeout_at(deadline, stream.receive()).await {
            Ok(Ok(Some(response))) => {
                let summary = response.summarize();
                debug!("[{}] reply #{}: {summary}", spec.mode, summaries.len() + 1);
                summaries.push(summary);
            }
            Ok(Ok(None)) => break,
            Ok(Err(status)) => return Ok((summaries, status_outcome(status))),
            Err(_) => return Ok((summaries, CallStatus::TimedOut)),
        }
    }
    Ok((summaries, CallStatus::Success))
}

async fn run_client_stream<C>(
    client: &mut C,
    spec: &CallSpec<C::Request>,
    deadline: Instant,
) -> Result<Outcome, ExerciserError>
where
    C: ExerciseClient,
    C::Response: Summarize,
{
    let mut call = match timeout_at(deadline, client.open_client_stream()).await {
        Ok(Ok(call)) => call,
        Ok(Err(status)) => return Err(ExerciserError::Connection(status)),
        Err(_) => return Ok((Vec::new(), CallStatus::TimedOut)),
    };

    match timeout_at(deadline, call.send((spec.factory)())).await {
        Ok(Ok(())) => (),
        Ok(Err(status)) => return Ok((Vec::new(), status_outcome(status))),
        Err(_) => return Ok((Vec::new(), CallStatus::TimedOut)),
    }

    match timeout_at(deadline, call.close_and_receive()).await {
        Ok(Ok(response)) => {
            let summary = response.summarize();
            debug!("[{}] aggregated reply: {summary}", spec.mode);
            Ok((vec![summary], CallStatus::Success))
        }
        Ok(Err(status)) => Ok((Vec::new(), status_outcome(status))),
        Err(_) => Ok((Vec::new(), CallStatus::TimedOut)),
    }
}

async fn run_bidi<C>(
    client: &mut C,
    spec: &CallSpec<C::Request>,
    deadline: Instant,
) -> Result<Outcome, ExerciserError>
where
    C: ExerciseClient,
    C::Response: Summarize,
{
    let (sender, mut receiver) = match timeout_at(deadline, client.open_bidi_stream()).await {
        Ok(Ok(halves)) => halves,
        Ok(Err(status)) => return Err(ExerciserError::Connection(status)),
        Err(_) => return Ok((Vec::new(), CallStatus::TimedOut)),
    };

    let (cancel_tx, cancel_rx) = watch::channel(false);
    let sender_task = spawn(drive_sender(
        sender,
        Arc::clone(&spec.factory),
        spec.iterations,
        spec.pacing,
        cancel_rx,
    ));

    let mut summaries = Vec::new();
    let mut status = CallStatus::Success;
    // The sender paces itself; reads stop at end-of-data, the iteration cap,
    // or the deadline. Received and sent counts are independent.
    while summaries.len() < spec.iterations {
        match timeout_at(deadline, receiver.receive()).await {
            Ok(Ok(Some(response))) => {
                let summary = response.summarize();
                debug!("[{}] reply #{}: {summary}", spec.mode, summaries.len() + 1);
                summaries.push(summary);
            }
            Ok(Ok(None)) => break,
            Ok(Err(transport_status)) => {
                status = status_outcome(transport_status);
                break;
            }
            Err(_) => {
                status = CallStatus::TimedOut;
                break;
            }
        }
    }

    // Stop the sender on every exit path and wait for it before returning,
    // so no send task outlives this call.
    let _ = cancel_tx.send(true);
    let sent = match sender_task.await {
        Ok(sent) => sent,
        Err(err) => {
            warn!("Bidirectional sender task failed: {err}");
            0
        }
    };
    debug!("[{}] sender stopped after {sent} requests", spec.mode);

    Ok((summaries, status))
}

/// Sends requests on its own cadence until the iteration cap, a send
/// failure, or cancellation.
async fn drive_sender<S, Req>(
    mut sender: S,
    factory: RequestFactory<Req>,
    iterations: usize,
    pacing: Option<Duration>,
    mut cancel: watch::Receiver<bool>,
) -> usize
where
    S: SendHandle<Req> + Send,
    Req: Send + 'static,
{
    let mut sent = 0;
    while sent < iterations {
        let request = factory();
        select! {
            _ = cancel.changed() => break,
            result = sender.send(request) => {
                match result {
                    Ok(()) => sent += 1,
                    Err(status) => {
                        debug!("Bidirectional send failed: {status}");
                        break;
                    }
                }
            }
        }
        if let Some(delay) = pacing {
            select! {
                _ = cancel.changed() => break,
                () = sleep(delay) => (),
            }
        }
    }
    sent
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        sync::{
            atomic::{AtomicBool, AtomicUsize, Ordering},
            Arc,
        },
    };

    use super::*;

    impl Summarize for String {
        fn summarize(&self) -> String {
            self.clone()
        }
    }

    struct ScriptedStream {
        items: VecDeque<String>,
        hangs_at_end: bool,
    }

    #[tonic::async_trait]
    impl ReceiveHandle<String> for ScriptedStream {
        async fn receive(&mut self) -> Result<Option<String>, Status> {
            match self.items.pop_front() {
                Some(item) => Ok(Some(item)),
                None if self.hangs_at_end => std::future::pending().await,
                None => Ok(None),
            }
        }
    }

    struct RecordingSender {
        sent: Arc<AtomicUsize>,
        stopped: Arc<AtomicBool>,
        blocks: bool,
    }

    #[tonic::async_trait]
    impl SendHandle<String> for RecordingSender {
        async fn send(&mut self, _request: String) -> Result<(), Status> {
            if self.blocks {
                std::future::pending::<()>().await;
            }
            self.sent.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    impl Drop for RecordingSender {
        fn drop(&mut self) {
            self.stopped.store(true, Ordering::SeqCst);
        }
    }

    struct ScriptedClientStream {
        close_error: Option<Status>,
        sent: usize,
    }

    #[tonic::async_trait]
    impl SendHandle<String> for ScriptedClientStream {
        async fn send(&mut self, _request: String) -> Result<(), Status> {
            self.sent += 1;
            Ok(())
        }
    }

    #[tonic::async_trait]
    impl ClientStreamHandle<String, String> for ScriptedClientStream {
        async fn close_and_receive(self) -> Result<String, Status> {
            match self.close_error {
                Some(status) => Err(status),
                None => Ok(format!("greeted {} times", self.sent)),
            }
        }
    }

    #[derive(Default)]
    struct StubClient {
        unary_calls: usize,
        unary_fail_at: Option<usize>,
        unary_hangs: bool,
        stream_items: Vec<String>,
        stream_hangs_at_end: bool,
        close_error: Option<Status>,
        open_fails: bool,
        sent: Arc<AtomicUsize>,
        sender_stopped: Arc<AtomicBool>,
        sender_blocks: bool,
    }

    #[tonic::async_trait]
    impl ExerciseClient for StubClient {
        type Request = String;
        type Response = String;
        type ClientStream = ScriptedClientStream;
        type ServerStream = ScriptedStream;
        type BidiSender = RecordingSender;
        type BidiReceiver = ScriptedStream;

        async fn unary(&mut self, _request: String) -> Result<String, Status> {
            if self.unary_hangs {
                std::future::pending::<()>().await;
            }
            self.unary_calls += 1;
            if self.unary_fail_at == Some(self.unary_calls) {
                return Err(Status::internal("stub failure"));
            }
            Ok("hi".to_string())
        }

        async fn open_client_stream(&mut self) -> Result<ScriptedClientStream, Status> {
            if self.open_fails {
                return Err(Status::unavailable("stub refused the call"));
            }
            Ok(ScriptedClientStream {
                close_error: self.close_error.take(),
                sent: 0,
            })
        }

        async fn open_server_stream(&mut self, _request: String) -> Result<ScriptedStream, Status> {
            if self.open_fails {
                return Err(Status::unavailable("stub refused the call"));
            }
            Ok(ScriptedStream {
                items: self.stream_items.clone().into(),
                hangs_at_end: self.stream_hangs_at_end,
            })
        }

        async fn open_bidi_stream(&mut self) -> Result<(RecordingSender, ScriptedStream), Status> {
            if self.open_fails {
                return Err(Status::unavailable("stub refused the call"));
            }
            Ok((
                RecordingSender {
                    sent: Arc::clone(&self.sent),
                    stopped: Arc::clone(&self.sender_stopped),
                    blocks: self.sender_blocks,
                },
                ScriptedStream {
                    items: self.stream_items.clone().into(),
                    hangs_at_end: self.stream_hangs_at_end,
                },
            ))
        }
    }

    fn spec(mode: CallMode, iterations: usize, timeout: Duration) -> CallSpec<String> {
        CallSpec::new(mode, Arc::new(|| "world".to_string()), iterations, timeout)
    }

    fn replies(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("reply {i}")).collect()
    }

    #[tokio::test]
    async fn unary_batch_completes() {
        let mut client = StubClient::default();
        let spec = spec(CallMode::Unary, 5, Duration::from_secs(1));

        let result = run(&mut client, &spec).await.unwrap();

        assert_eq!(result.status, CallStatus::Success);
        assert_eq!(result.received(), 5);
        assert!(result.summaries.iter().all(|summary| summary == "hi"));
    }

    #[tokio::test]
    async fn unary_failure_aborts_batch() {
        let mut client = StubClient {
            unary_fail_at: Some(3),
            ..Default::default()
        };
        let spec = spec(CallMode::Unary, 5, Duration::from_secs(1));

        let result = run(&mut client, &spec).await.unwrap();

        assert!(matches!(result.status, CallStatus::Failed(_)));
        assert_eq!(result.received(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn unary_hang_yields_timeout() {
        let mut client = StubClient {
            unary_hangs: true,
            ..Default::default()
        };
        let spec = spec(CallMode::Unary, 5, Duration::from_millis(10));

        let result = run(&mut client, &spec).await.unwrap();

        assert_eq!(result.status, CallStatus::TimedOut);
        assert_eq!(result.received(), 0);
    }

    #[tokio::test]
    async fn server_stream_end_of_data_is_success() {
        let mut client = StubClient {
            stream_items: replies(3),
            ..Default::default()
        };
        let spec = spec(CallMode::ServerStream, 3, Duration::from_secs(1));

        let result = run(&mut client, &spec).await.unwrap();

        assert_eq!(result.status, CallStatus::Success);
        assert_eq!(result.received(), 3);
    }

    #[tokio::test]
    async fn server_stream_caps_reads_at_iteration_count() {
        let mut client = StubClient {
            stream_items: replies(10),
            ..Default::default()
        };
        let spec = spec(CallMode::ServerStream, 3, Duration::from_secs(1));

        let result = run(&mut client, &spec).await.unwrap();

        assert_eq!(result.status, CallStatus::Success);
        assert_eq!(result.received(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn server_stream_blocked_yields_timeout() {
        let mut client = StubClient {
            stream_hangs_at_end: true,
            ..Default::default()
        };
        let spec = spec(CallMode::ServerStream, 3, Duration::from_millis(10));

        let result = run(&mut client, &spec).await.unwrap();

        assert_eq!(result.status, CallStatus::TimedOut);
        assert_eq!(result.received(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn server_stream_timeout_preserves_partial_reads() {
        let mut client = StubClient {
            stream_items: replies(2),
            stream_hangs_at_end: true,
            ..Default::default()
        };
        let spec = spec(CallMode::ServerStream, 5, Duration::from_millis(10));

        let result = run(&mut client, &spec).await.unwrap();

        assert_eq!(result.status, CallStatus::TimedOut);
        assert_eq!(result.received(), 2);
        assert_eq!(result.summaries, vec!["reply 0", "reply 1"]);
    }

    #[tokio::test]
    async fn client_stream_is_a_single_cycle() {
        let mut client = StubClient::default();
        let spec = spec(CallMode::ClientStream, 7, Duration::from_secs(1));

        let result = run(&mut client, &spec).await.unwrap();

        assert_eq!(result.status, CallStatus::Success);
        assert_eq!(result.summaries, vec!["greeted 1 times"]);
    }

    #[tokio::test]
    async fn client_stream_close_failure() {
        let mut client = StubClient {
            close_error: Some(Status::internal("close rejected")),
            ..Default::default()
        };
        let spec = spec(CallMode::ClientStream, 1, Duration::from_secs(1));

        let result = run(&mut client, &spec).await.unwrap();

        assert!(matches!(result.status, CallStatus::Failed(_)));
        assert_eq!(result.received(), 0);
    }

    #[tokio::test]
    async fn bidi_reader_bounded_by_iteration_count() {
        let mut client = StubClient {
            stream_items: replies(10),
            ..Default::default()
        };
        let sent = Arc::clone(&client.sent);
        let stopped = Arc::clone(&client.sender_stopped);
        let spec = spec(CallMode::Bidi, 4, Duration::from_secs(1));

        let result = run(&mut client, &spec).await.unwrap();

        assert_eq!(result.status, CallStatus::Success);
        assert_eq!(result.received(), 4);
        assert!(sent.load(Ordering::SeqCst) <= 4);
        assert!(stopped.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn bidi_sender_stops_without_reader_progress() {
        let mut client = StubClient {
            stream_hangs_at_end: true,
            ..Default::default()
        };
        let sent = Arc::clone(&client.sent);
        let stopped = Arc::clone(&client.sender_stopped);
        let spec = spec(CallMode::Bidi, 3, Duration::from_millis(10));

        let result = run(&mut client, &spec).await.unwrap();

        assert_eq!(result.status, CallStatus::TimedOut);
        assert_eq!(result.received(), 0);
        assert!(sent.load(Ordering::SeqCst) <= 3);
        assert!(stopped.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn bidi_cancellation_stops_blocked_sender() {
        let mut client = StubClient {
            stream_hangs_at_end: true,
            sender_blocks: true,
            ..Default::default()
        };
        let sent = Arc::clone(&client.sent);
        let stopped = Arc::clone(&client.sender_stopped);
        let spec = spec(CallMode::Bidi, 5, Duration::from_millis(10));

        let result = run(&mut client, &spec).await.unwrap();

        assert_eq!(result.status, CallStatus::TimedOut);
        assert_eq!(sent.load(Ordering::SeqCst), 0);
        // run() joined the sender task, so its handle is gone by now.
        assert!(stopped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn bidi_end_of_data_is_success() {
        let mut client = StubClient {
            stream_items: replies(2),
            ..Default::default()
        };
        let spec = spec(CallMode::Bidi, 5, Duration::from_secs(1));

        let result = run(&mut client, &spec).await.unwrap();

        assert_eq!(result.status, CallStatus::Success);
        assert_eq!(result.received(), 2);
    }

    #[tokio::test]
    async fn open_failure_surfaces_connection_error() {
        let mut client = StubClient {
            open_fails: true,
            ..Default::default()
        };

        for mode in [CallMode::ServerStream, CallMode::ClientStream, CallMode::Bidi] {
            let spec = spec(mode, 1, Duration::from_secs(1));
            let result = run(&mut client, &spec).await;
            assert!(matches!(result, Err(ExerciserError::Connection(_))));
        }
    }

    #[tokio::test]
    async fn report_accumulates_results_in_order() {
        let unary = CallResult {
            mode: CallMode::Unary,
            elapsed: Duration::from_millis(250),
            summaries: vec!["hi".to_string()],
            status: CallStatus::Success,
        };
        let bidi = CallResult {
            mode: CallMode::Bidi,
            elapsed: Duration::from_millis(750),
            summaries: Vec::new(),
            status: CallStatus::TimedOut,
        };

        let mut report = Report::default();
        report.push(unary.clone());
        report.push(bidi);

        assert_eq!(report.results()[0].mode, CallMode::Unary);
        assert_eq!(report.results()[1].mode, CallMode::Bidi);
        assert_eq!(report.total_elapsed(), Duration::from_secs(1));
        assert_eq!(unary.to_string(), "unary: 1 messages in 250ms (success)");
    }
}
