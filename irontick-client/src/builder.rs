//! Ticker builder and streaming engine.

use crate::dispatcher::Dispatcher;
use crate::error::TickerError;
use crate::events::TickerEvent;
use crate::reconnect::{ReconnectPolicy, ReconnectState};
use crate::registry::SubscriptionRegistry;
use crate::session::TickerSession;
use crate::state::ConnectionState;
use irontick_core::{Postback, PriceDivisors, TickMode, WireCommand, decode_frame};
use std::sync::Arc;
use std::sync::atomic::AtomicU8;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::protocol::Message;

/// Default venue endpoint.
pub const DEFAULT_ROOT_URL: &str = "wss://ws.kite.trade";

/// Builder for configuring and creating a ticker.
pub struct TickerBuilder {
    api_key: String,
    access_token: String,
    root_url: String,
    connect_timeout: Duration,
    reconnect: ReconnectPolicy,
    divisors: PriceDivisors,
    channel_capacity: usize,
}

impl TickerBuilder {
    /// Creates a new ticker builder with the given credentials.
    #[must_use]
    pub fn new(api_key: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            access_token: access_token.into(),
            root_url: DEFAULT_ROOT_URL.to_string(),
            connect_timeout: Duration::from_secs(30),
            reconnect: ReconnectPolicy::default(),
            divisors: PriceDivisors::default(),
            channel_capacity: 256,
        }
    }

    /// Overrides the venue endpoint.
    #[must_use]
    pub fn root_url(mut self, url: impl Into<String>) -> Self {
        self.root_url = url.into();
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Enables or disables automatic reconnection.
    #[must_use]
    pub fn reconnect(mut self, enabled: bool) -> Self {
        self.reconnect.enabled = enabled;
        self
    }

    /// Replaces the whole reconnection policy.
    #[must_use]
    pub fn reconnect_policy(mut self, policy: ReconnectPolicy) -> Self {
        self.reconnect = policy;
        self
    }

    /// Sets the delay before the first reconnect attempt.
    #[must_use]
    pub fn reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect.base_delay = delay;
        self
    }

    /// Sets the maximum reconnection attempts (0 = unlimited).
    #[must_use]
    pub fn max_reconnect_attempts(mut self, max: usize) -> Self {
        self.reconnect.max_attempts = max;
        self
    }

    /// Replaces the price divisor table.
    #[must_use]
    pub fn divisors(mut self, divisors: PriceDivisors) -> Self {
        self.divisors = divisors;
        self
    }

    /// Sets the command channel capacity.
    #[must_use]
    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Builds the ticker and its control handle.
    #[must_use]
    pub fn build(self, dispatcher: Dispatcher) -> (Ticker, TickerHandle) {
        let (cmd_tx, cmd_rx) = mpsc::channel(self.channel_capacity);
        let state = Arc::new(AtomicU8::new(ConnectionState::Disconnected.as_u8()));

        let ticker = Ticker {
            url: stream_url(&self.root_url, &self.api_key, &self.access_token),
            connect_timeout: self.connect_timeout,
            reconnect: ReconnectState::new(self.reconnect),
            divisors: self.divisors,
            registry: SubscriptionRegistry::new(),
            dispatcher,
            state: Arc::clone(&state),
            cmd_rx,
        };

        let handle = TickerHandle { cmd_tx, state };

        (ticker, handle)
    }
}

fn stream_url(root_url: &str, api_key: &str, access_token: &str) -> String {
    format!("{root_url}?api_key={api_key}&access_token={access_token}")
}

/// The streaming engine.
///
/// Owns the session, the subscription registry and the dispatcher; runs as
/// a single task driven by [`Ticker::run`].
pub struct Ticker {
    // Embeds the credentials, so it must never appear in logs.
    url: String,
    connect_timeout: Duration,
    reconnect: ReconnectState,
    divisors: PriceDivisors,
    registry: SubscriptionRegistry,
    dispatcher: Dispatcher,
    state: Arc<AtomicU8>,
    cmd_rx: mpsc::Receiver<TickerCommand>,
}

impl Ticker {
    /// Runs the engine until the caller closes it, credentials are
    /// rejected, or the reconnect budget is spent.
    ///
    /// # Errors
    /// Returns `TickerError::AuthRejected` on a credential rejection and
    /// `TickerError::MaxReconnectAttempts` once the retry budget is spent.
    pub async fn run(&mut self) -> Result<(), TickerError> {
        self.reconnect.reset();

        loop {
            match self.connect_and_stream().await {
                Ok(()) => {
                    return self.finish_closed("closed by client");
                }
                Err(TickerError::AuthRejected { status }) => {
                    tracing::error!(status, "authentication rejected");
                    self.set_state(ConnectionState::Closed);
                    self.dispatcher.dispatch(&TickerEvent::Error {
                        error: TickerError::AuthRejected { status }.to_string(),
                    });
                    self.dispatcher.dispatch(&TickerEvent::Noreconnect);
                    return Err(TickerError::AuthRejected { status });
                }
                Err(error) => {
                    tracing::warn!(%error, "session ended");
                    self.dispatcher.dispatch(&TickerEvent::Disconnect {
                        error: error.to_string(),
                    });

                    if let Some(delay) = self.reconnect.on_failure() {
                        let attempt = self.reconnect.attempts();
                        self.set_state(ConnectionState::Reconnecting);
                        tracing::info!(attempt, ?delay, "reconnecting after backoff");
                        self.dispatcher
                            .dispatch(&TickerEvent::Reconnect { attempt, delay });
                        if self.wait_backoff(delay).await {
                            return self.finish_closed("closed by client");
                        }
                    } else {
                        tracing::error!("reconnect attempts exhausted");
                        self.set_state(ConnectionState::Closed);
                        self.dispatcher.dispatch(&TickerEvent::Noreconnect);
                        return Err(TickerError::MaxReconnectAttempts);
                    }
                }
            }
        }
    }

    async fn connect_and_stream(&mut self) -> Result<(), TickerError> {
        self.set_state(ConnectionState::Connecting);

        // Commands issued while offline only record intent; a queued close
        // wins before any dial.
        if self.drain_offline_commands() {
            return Ok(());
        }

        let mut session =
            tokio::time::timeout(self.connect_timeout, TickerSession::connect(&self.url))
                .await
                .map_err(|_| TickerError::ConnectTimeout)??;

        self.reconnect.on_success();
        self.set_state(ConnectionState::Connected);
        tracing::info!("connected");
        self.dispatcher.dispatch(&TickerEvent::Connect);

        self.replay_subscriptions(&mut session).await?;

        loop {
            tokio::select! {
                cmd = self.cmd_rx.recv() => {
                    match cmd {
                        Some(TickerCommand::Close) | None => {
                            session.close().await;
                            return Ok(());
                        }
                        Some(cmd) => self.apply_command(&mut session, cmd).await?,
                    }
                }

                message = session.recv() => {
                    match message? {
                        Some(message) => self.handle_message(&mut session, message).await?,
                        None => {
                            return Err(TickerError::ConnectionClosed {
                                code: None,
                                reason: None,
                            });
                        }
                    }
                }
            }
        }
    }

    /// Re-sends the consolidated registry snapshot, one subscribe plus one
    /// mode command per mode group.
    async fn replay_subscriptions(
        &mut self,
        session: &mut TickerSession,
    ) -> Result<(), TickerError> {
        let groups = self.registry.grouped();
        if groups.is_empty() {
            return Ok(());
        }

        tracing::debug!(tokens = self.registry.len(), "replaying subscriptions");
        for (mode, tokens) in groups {
            self.send_command(session, &WireCommand::Subscribe(tokens.clone()))
                .await?;
            self.send_command(session, &WireCommand::Mode(mode, tokens))
                .await?;
        }
        Ok(())
    }

    async fn apply_command(
        &mut self,
        session: &mut TickerSession,
        cmd: TickerCommand,
    ) -> Result<(), TickerError> {
        match cmd {
            TickerCommand::Subscribe(tokens) => {
                self.registry.subscribe(&tokens);
                self.send_command(session, &WireCommand::Subscribe(tokens))
                    .await
            }
            TickerCommand::Unsubscribe(tokens) => {
                self.registry.unsubscribe(&tokens);
                self.send_command(session, &WireCommand::Unsubscribe(tokens))
                    .await
            }
            TickerCommand::SetMode(mode, tokens) => {
                self.registry.set_mode(mode, &tokens);
                self.send_command(session, &WireCommand::Mode(mode, tokens))
                    .await
            }
            TickerCommand::Resubscribe => self.replay_subscriptions(session).await,
            // Handled by the connected loop before reaching here.
            TickerCommand::Close => Ok(()),
        }
    }

    async fn send_command(
        &mut self,
        session: &mut TickerSession,
        command: &WireCommand,
    ) -> Result<(), TickerError> {
        session.send_text(command.to_json()?).await
    }

    async fn handle_message(
        &mut self,
        session: &mut TickerSession,
        message: Message,
    ) -> Result<(), TickerError> {
        match message {
            Message::Binary(payload) => {
                let ticks = decode_frame(&payload, &self.divisors);
                tracing::trace!(bytes = payload.len(), ticks = ticks.len(), "binary frame");
                self.dispatcher.dispatch(&TickerEvent::Message(payload));
                if !ticks.is_empty() {
                    self.dispatcher.dispatch(&TickerEvent::Ticks(ticks));
                }
                Ok(())
            }
            Message::Text(text) => {
                self.handle_postback(&text);
                Ok(())
            }
            Message::Ping(payload) => session.send_pong(payload).await,
            Message::Pong(_) => Ok(()),
            Message::Close(frame) => {
                let (code, reason) = match frame {
                    Some(frame) => (
                        Some(u16::from(frame.code)),
                        Some(frame.reason.into_owned()),
                    ),
                    None => (None, None),
                };
                Err(TickerError::ConnectionClosed { code, reason })
            }
            Message::Frame(_) => Ok(()),
        }
    }

    fn handle_postback(&mut self, text: &str) {
        match Postback::parse(text) {
            Ok(Postback::Order(data)) => {
                self.dispatcher.dispatch(&TickerEvent::OrderUpdate(data));
            }
            Ok(Postback::Error(message)) => {
                self.dispatcher
                    .dispatch(&TickerEvent::Error { error: message });
            }
            Ok(Postback::Other { kind, .. }) => {
                tracing::debug!(kind = %kind, "ignoring text message");
            }
            Err(error) => {
                tracing::debug!(%error, "dropping unparseable text message");
            }
        }
    }

    /// Applies queued commands without a live session.
    ///
    /// Returns true when close was requested or every handle is gone.
    fn drain_offline_commands(&mut self) -> bool {
        loop {
            match self.cmd_rx.try_recv() {
                Ok(TickerCommand::Close) => return true,
                Ok(cmd) => self.apply_offline(cmd),
                Err(mpsc::error::TryRecvError::Empty) => return false,
                Err(mpsc::error::TryRecvError::Disconnected) => return true,
            }
        }
    }

    fn apply_offline(&mut self, cmd: TickerCommand) {
        match cmd {
            TickerCommand::Subscribe(tokens) => self.registry.subscribe(&tokens),
            TickerCommand::Unsubscribe(tokens) => self.registry.unsubscribe(&tokens),
            TickerCommand::SetMode(mode, tokens) => self.registry.set_mode(mode, &tokens),
            // The next connect replays the registry anyway.
            TickerCommand::Resubscribe => {}
            // Handled by the caller.
            TickerCommand::Close => {}
        }
    }

    /// Sleeps out a backoff delay while staying responsive to commands.
    ///
    /// Returns true when close was requested, canceling the pending
    /// attempt.
    async fn wait_backoff(&mut self, delay: Duration) -> bool {
        let sleep = tokio::time::sleep(delay);
        tokio::pin!(sleep);

        loop {
            tokio::select! {
                () = &mut sleep => return false,
                cmd = self.cmd_rx.recv() => {
                    match cmd {
                        Some(TickerCommand::Close) | None => return true,
                        Some(cmd) => self.apply_offline(cmd),
                    }
                }
            }
        }
    }

    fn finish_closed(&mut self, reason: &str) -> Result<(), TickerError> {
        self.set_state(ConnectionState::Closed);
        self.dispatcher.dispatch(&TickerEvent::Close {
            code: None,
            reason: reason.to_string(),
        });
        Ok(())
    }

    fn set_state(&mut self, state: ConnectionState) {
        tracing::debug!(?state, "state transition");
        state.store(&self.state);
    }
}

/// Handle for controlling a running ticker.
///
/// Handles are cheap to clone; dropping every handle closes the session.
#[derive(Clone)]
pub struct TickerHandle {
    cmd_tx: mpsc::Sender<TickerCommand>,
    state: Arc<AtomicU8>,
}

impl TickerHandle {
    /// Subscribes instrument tokens at the default mode.
    ///
    /// # Errors
    /// Returns `TickerError::Channel` if the engine has shut down.
    pub async fn subscribe(&self, tokens: Vec<u32>) -> Result<(), TickerError> {
        self.send(TickerCommand::Subscribe(tokens)).await
    }

    /// Unsubscribes instrument tokens.
    ///
    /// # Errors
    /// Returns `TickerError::Channel` if the engine has shut down.
    pub async fn unsubscribe(&self, tokens: Vec<u32>) -> Result<(), TickerError> {
        self.send(TickerCommand::Unsubscribe(tokens)).await
    }

    /// Sets the streaming mode for instrument tokens, subscribing any that
    /// are new.
    ///
    /// # Errors
    /// Returns `TickerError::Channel` if the engine has shut down.
    pub async fn set_mode(&self, mode: TickMode, tokens: Vec<u32>) -> Result<(), TickerError> {
        self.send(TickerCommand::SetMode(mode, tokens)).await
    }

    /// Replays the full subscription snapshot over the live connection.
    ///
    /// # Errors
    /// Returns `TickerError::Channel` if the engine has shut down.
    pub async fn resubscribe(&self) -> Result<(), TickerError> {
        self.send(TickerCommand::Resubscribe).await
    }

    /// Closes the session and stops the engine.
    ///
    /// # Errors
    /// Returns `TickerError::Channel` if the engine has shut down.
    pub async fn close(&self) -> Result<(), TickerError> {
        self.send(TickerCommand::Close).await
    }

    async fn send(&self, command: TickerCommand) -> Result<(), TickerError> {
        self.cmd_tx
            .send(command)
            .await
            .map_err(|_| TickerError::Channel)
    }

    /// Current connection state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_atomic(&self.state)
    }

    /// Whether a live session is established.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state().is_connected()
    }
}

/// Commands accepted by a running ticker.
#[derive(Debug, Clone)]
pub enum TickerCommand {
    /// Subscribe instrument tokens at the default mode.
    Subscribe(Vec<u32>),
    /// Unsubscribe instrument tokens.
    Unsubscribe(Vec<u32>),
    /// Set the streaming mode for instrument tokens.
    SetMode(TickMode, Vec<u32>),
    /// Replay the full subscription snapshot.
    Resubscribe,
    /// Close the session and stop the engine.
    Close,
}
