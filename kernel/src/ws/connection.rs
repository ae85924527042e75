//! WebSocket connection lifecycle management.

use axum::extract::ws::{Message, WebSocket};
use bytes::Bytes;
use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use crate::game::{GameService, GameSnapshot};
use crate::ws::broadcaster::BroadcastReceiver;
use crate::ws::types::{BroadcastMessage, ClientCommand, ClientId, DirectFrame, WsError};

const PING_INTERVAL: Duration = Duration::from_secs(30);

/// One browser attached to the game.
pub struct Connection {
    client_id: ClientId,
    stream: WebSocket,
    receiver: BroadcastReceiver,
    initial: Option<GameSnapshot>,
    service: Arc<GameService>,
}

impl Connection {
    /// Wraps an upgraded socket. The initial snapshot and the subscription
    /// are taken together, so every event is delivered exactly once: either
    /// folded into the snapshot or as its own frame.
    pub fn new(stream: WebSocket, service: Arc<GameService>) -> Self {
        let client_id = ClientId::generate();
        info!(client_id = %client_id, "WebSocket connection established");
        let (snapshot, receiver) = service.attach();
        Self {
            client_id,
            stream,
            receiver,
            initial: Some(snapshot),
            service,
        }
    }

    /// Returns the client ID for this connection.
    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Runs the connection loop: initial snapshot, then client commands,
    /// broadcasts and keep-alive pings until either side closes.
    ///
    /// # Errors
    ///
    /// Returns an error if sending on the socket fails or a frame cannot be
    /// encoded.
    pub async fn run(mut self) -> Result<(), WsError> {
        if let Some(snapshot) = self.initial.take() {
            self.send_direct(&DirectFrame::Snapshot { snapshot }).await?;
        }
        let mut ping_interval = interval(PING_INTERVAL);

        loop {
            tokio::select! {
                incoming = self.stream.next() => {
                    match incoming {
                        Some(Ok(msg)) => {
                            if self.handle_incoming_message(msg).await? {
                                break;
                            }
                        }
                        Some(Err(e)) => {
                            error!(client_id = %self.client_id, error = %e, "WebSocket error");
                            return Err(WsError::AxumWs(e));
                        }
                        None => {
                            debug!(client_id = %self.client_id, "Stream ended");
                            break;
                        }
                    }
                }

                broadcast_result = self.receiver.recv() => {
                    match broadcast_result {
                        Ok(BroadcastMessage::Shutdown) => {
                            self.send_broadcast_message(&BroadcastMessage::Shutdown).await?;
                            info!(client_id = %self.client_id, "Shutdown broadcast received");
                            break;
                        }
                        Ok(msg) => self.send_broadcast_message(&msg).await?,
                        Err(WsError::Lagged(skipped)) => {
                            warn!(client_id = %self.client_id, skipped, "Client lagged, resending snapshot");
                            self.resync().await?;
                        }
                        Err(WsError::ChannelClosed) => {
                            info!(client_id = %self.client_id, "Broadcast channel closed");
                            break;
                        }
                        Err(e) => {
                            warn!(client_id = %self.client_id, error = %e, "Broadcast error");
                        }
                    }
                }

                _ = ping_interval.tick() => {
                    self.send_ping().await?;
                }
            }
        }

        self.graceful_close().await
    }

    async fn handle_incoming_message(&mut self, message: Message) -> Result<bool, WsError> {
        match message {
            Message::Text(text) => {
                debug!(client_id = %self.client_id, len = text.len(), "Received text");
                self.handle_command(text.as_str()).await?;
                Ok(false)
            }
            Message::Binary(data) => {
                debug!(client_id = %self.client_id, len = data.len(), "Received binary");
                self.send_direct(&DirectFrame::Error {
                    message: "binary frames are not supported".to_string(),
                })
                .await?;
                Ok(false)
            }
            Message::Ping(data) => {
                debug!(client_id = %self.client_id, "Ping received");
                self.stream
                    .send(Message::Pong(data))
                    .await
                    .map_err(WsError::AxumWs)?;
                Ok(false)
            }
            Message::Pong(_) => {
                debug!(client_id = %self.client_id, "Pong received");
                Ok(false)
            }
            Message::Close(_) => {
                info!(client_id = %self.client_id, "Client initiated close");
                Ok(true)
            }
        }
    }

    async fn handle_command(&mut self, text: &str) -> Result<(), WsError> {
        let command = match serde_json::from_str::<ClientCommand>(text) {
            Ok(command) => command,
            Err(e) => {
                warn!(client_id = %self.client_id, error = %e, "Invalid client frame");
                return self
                    .send_direct(&DirectFrame::Error {
                        message: format!("invalid command: {e}"),
                    })
                    .await;
            }
        };

        debug!(client_id = %self.client_id, ?command, "Client command");
        match command {
            ClientCommand::StartGame { secret_word } => {
                if self.service.start_game(&secret_word).is_none() {
                    debug!(client_id = %self.client_id, "Blank secret word ignored");
                }
                Ok(())
            }
            ClientCommand::Reset => {
                self.service.reset();
                Ok(())
            }
            ClientCommand::Review => match self.service.review() {
                Ok(_) => Ok(()),
                Err(e) => {
                    self.send_direct(&DirectFrame::Error {
                        message: e.to_string(),
                    })
                    .await
                }
            },
        }
    }

    /// Starts over from a fresh snapshot on a fresh subscription.
    async fn resync(&mut self) -> Result<(), WsError> {
        let (snapshot, receiver) = self.service.attach();
        self.receiver = receiver;
        self.send_direct(&DirectFrame::Snapshot { snapshot }).await
    }

    async fn send_direct(&mut self, frame: &DirectFrame) -> Result<(), WsError> {
        let payload = frame.to_payload()?;
        self.stream
            .send(Message::Text(payload.into()))
            .await
            .map_err(WsError::AxumWs)
    }

    async fn send_broadcast_message(&mut self, message: &BroadcastMessage) -> Result<(), WsError> {
        let payload = message.to_frame_payload()?;
        self.stream
            .send(Message::Text(payload.into()))
            .await
            .map_err(WsError::AxumWs)
    }

    async fn send_ping(&mut self) -> Result<(), WsError> {
        debug!(client_id = %self.client_id, "Sending ping");
        self.stream
            .send(Message::Ping(Bytes::new()))
            .await
            .map_err(WsError::AxumWs)
    }

    async fn graceful_close(mut self) -> Result<(), WsError> {
        debug!(client_id = %self.client_id, "Closing gracefully");
        self.stream
            .send(Message::Close(None))
            .await
            .map_err(WsError::AxumWs)?;
        info!(client_id = %self.client_id, "Connection closed");
        Ok(())
    }
}
