//! WebSocket session management.

use crate::error::TickerError;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::protocol::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};

/// A live WebSocket session with the venue.
#[derive(Debug)]
pub struct TickerSession {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TickerSession {
    /// Opens a session against the given URL.
    ///
    /// # Errors
    ///
    /// A handshake refused with an HTTP client-error status maps to
    /// [`TickerError::AuthRejected`]; any other failure surfaces as a
    /// websocket error.
    pub async fn connect(url: &str) -> Result<Self, TickerError> {
        match connect_async(url).await {
            Ok((stream, _response)) => Ok(Self { stream }),
            Err(tokio_tungstenite::tungstenite::Error::Http(response))
                if response.status().is_client_error() =>
            {
                Err(TickerError::AuthRejected {
                    status: response.status().as_u16(),
                })
            }
            Err(e) => Err(TickerError::WebSocket(e)),
        }
    }

    /// Sends a text control message to the venue.
    ///
    /// # Errors
    /// Returns a websocket error if the send fails.
    pub async fn send_text(&mut self, text: String) -> Result<(), TickerError> {
        Ok(self.stream.send(Message::Text(text)).await?)
    }

    /// Answers a server ping with its payload.
    ///
    /// # Errors
    /// Returns a websocket error if the send fails.
    pub async fn send_pong(&mut self, payload: Vec<u8>) -> Result<(), TickerError> {
        Ok(self.stream.send(Message::Pong(payload)).await?)
    }

    /// Receives the next message from the venue.
    ///
    /// # Returns
    /// `Ok(Some(message))` if received, `Ok(None)` if the stream ended
    /// without a close frame.
    ///
    /// # Errors
    /// Returns a websocket error if the receive fails.
    pub async fn recv(&mut self) -> Result<Option<Message>, TickerError> {
        match self.stream.next().await {
            Some(result) => Ok(Some(result?)),
            None => Ok(None),
        }
    }

    /// Closes the session. Errors are ignored since the peer may already
    /// be gone.
    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_session_text_roundtrip() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let mut ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            if let Some(Ok(Message::Text(text))) = ws.next().await {
                ws.send(Message::Text(text)).await.unwrap();
            }
        });

        let mut session = TickerSession::connect(&format!("ws://{addr}")).await.unwrap();
        session.send_text("hello".to_string()).await.unwrap();
        match session.recv().await.unwrap() {
            Some(Message::Text(text)) => assert_eq!(text, "hello"),
            other => panic!("unexpected message: {other:?}"),
        }

        session.close().await;
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_connect_maps_client_error_to_auth_rejected() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let server = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }
            stream
                .write_all(b"HTTP/1.1 403 Forbidden\r\ncontent-length: 0\r\n\r\n")
                .await
                .unwrap();
        });

        let result = TickerSession::connect(&format!("ws://{addr}")).await;
        match result {
            Err(TickerError::AuthRejected { status }) => assert_eq!(status, 403),
            other => panic!("unexpected connect result: {other:?}"),
        }

        server.await.unwrap();
    }
}
