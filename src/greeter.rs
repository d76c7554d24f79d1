use std::{fs::read_to_string, sync::Arc, time::Duration};

use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tonic::{
    transport::{Certificate, Channel, ClientTlsConfig, Endpoint},
    Request, Status, Streaming,
};

use crate::{
    config::Config,
    error::ExerciserError,
    exerciser::{
        CallMode, CallSpec, ClientStreamHandle, ExerciseClient, ReceiveHandle, RequestFactory,
        SendHandle, Summarize,
    },
    proto::{greeter_client::GreeterClient, HelloReply, HelloRequest},
};

const TEN_SECS: Duration = Duration::from_secs(10);

/// Connects a channel to the configured greeter endpoint and wraps it in an
/// exerciser client.
pub async fn setup_client(config: &Config) -> Result<GreeterExerciser, ExerciserError> {
    debug!("Preparing gRPC client configuration");
    // Use CA if provided, otherwise load certificates from system for https.
    let mut endpoint = Endpoint::from_shared(config.grpc_url.clone())?
        .http2_keep_alive_interval(TEN_SECS)
        .tcp_keepalive(Some(TEN_SECS))
        .keep_alive_while_idle(true);
    if let Some(ca) = &config.grpc_ca {
        let ca = read_to_string(ca).map_err(|err| {
            error!("Failed to read CA file: {err}");
            ExerciserError::InvalidCaFile
        })?;
        let tls = ClientTlsConfig::new().ca_certificate(Certificate::from_pem(ca));
        endpoint = endpoint.tls_config(tls)?;
    } else if config.grpc_url.starts_with("https") {
        endpoint = endpoint.tls_config(ClientTlsConfig::new().with_native_roots())?;
    }
    let channel = endpoint.connect().await?;
    debug!("gRPC client configuration done");

    Ok(GreeterExerciser::new(channel))
}

/// Builds the call batch for one mode from the runtime configuration.
pub fn hello_spec(config: &Config, mode: CallMode) -> CallSpec<HelloRequest> {
    let name = config.name.clone();
    let factory: RequestFactory<HelloRequest> =
        Arc::new(move || HelloRequest { name: name.clone() });
    CallSpec::new(
        mode,
        factory,
        config.iterations,
        Duration::from_secs(config.timeout),
    )
    .with_pacing(config.send_interval_ms.map(Duration::from_millis))
}

/// [`ExerciseClient`] backed by the generated greeter stubs.
pub struct GreeterExerciser {
    client: GreeterClient<Channel>,
}

impl GreeterExerciser {
    #[must_use]
    pub fn new(channel: Channel) -> Self {
        Self {
            client: GreeterClient::new(channel),
        }
    }
}

/// Open client-streaming call. Requests are buffered locally and submitted
/// as one outbound stream when the send side closes.
pub struct GreeterClientStream {
    client: GreeterClient<Channel>,
    requests: Vec<HelloRequest>,
}

#[tonic::async_trait]
impl SendHandle<HelloRequest> for GreeterClientStream {
    async fn send(&mut self, request: HelloRequest) -> Result<(), Status> {
        self.requests.push(request);
        Ok(())
    }
}

#[tonic::async_trait]
impl ClientStreamHandle<HelloRequest, HelloReply> for GreeterClientStream {
    async fn close_and_receive(mut self) -> Result<HelloReply, Status> {
        let outbound = tokio_stream::iter(self.requests);
        let response = self
            .client
            .say_hello_client_stream(Request::new(outbound))
            .await?;
        Ok(response.into_inner())
    }
}

/// Receive half of a server-streaming or bidirectional call.
pub struct GreeterReplyStream {
    inner: Streaming<HelloReply>,
}

#[tonic::async_trait]
impl ReceiveHandle<HelloReply> for GreeterReplyStream {
    async fn receive(&mut self) -> Result<Option<HelloReply>, Status> {
        self.inner.message().await
    }
}

/// Send half of an open bidirectional call. Dropping it closes the outbound
/// stream.
pub struct GreeterBidiSender {
    tx: mpsc::UnboundedSender<HelloRequest>,
}

#[tonic::async_trait]
impl SendHandle<HelloRequest> for GreeterBidiSender {
    async fn send(&mut self, request: HelloRequest) -> Result<(), Status> {
        self.tx
            .send(request)
            .map_err(|_| Status::unavailable("request stream closed"))
    }
}

#[tonic::async_trait]
impl ExerciseClient for GreeterExerciser {
    type Request = HelloRequest;
    type Response = HelloReply;
    type ClientStream = GreeterClientStream;
    type ServerStream = GreeterReplyStream;
    type BidiSender = GreeterBidiSender;
    type BidiReceiver = GreeterReplyStream;

    async fn unary(&mut self, request: HelloRequest) -> Result<HelloReply, Status> {
        let response = self.client.say_hello(Request::new(request)).await?;
        Ok(response.into_inner())
    }

    async fn open_client_stream(&mut self) -> Result<GreeterClientStream, Status> {
        Ok(GreeterClientStream {
            client: self.client.clone(),
            requests: Vec::new(),
        })
    }

    async fn open_server_stream(
        &mut self,
        request: HelloRequest,
    ) -> Result<GreeterReplyStream, Status> {
        let response = self
            .client
            .say_hello_server_stream(Request::new(request))
            .await?;
        Ok(GreeterReplyStream {
            inner: response.into_inner(),
        })
    }

    async fn open_bidi_stream(
        &mut self,
    ) -> Result<(GreeterBidiSender, GreeterReplyStream), Status> {
        let (tx, rx) = mpsc::unbounded_channel();
        let response = self
            .client
            .say_hello_bidi_stream(Request::new(UnboundedReceiverStream::new(rx)))
            .await?;
        Ok((
            GreeterBidiSender { tx },
            GreeterReplyStream {
                inner: response.into_inner(),
            },
        ))
    }
}

impl Summarize for HelloReply {
    fn summarize(&self) -> String {
        self.message.clone()
    }
}
