//! Example self-contained local feed.
//!
//! Run with: `cargo run --example local_feed`
//!
//! Starts a loopback mock venue emitting one LTP tick every 500ms, then
//! streams it with a ticker client for a few seconds. No credentials or
//! network access needed.

use futures::{SinkExt, StreamExt};
use irontick::prelude::*;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::protocol::Message;

fn ltp_frame(token: u32, price: u32) -> Vec<u8> {
    let mut frame = Vec::new();
    frame.extend_from_slice(&1u16.to_be_bytes());
    frame.extend_from_slice(&8u16.to_be_bytes());
    frame.extend_from_slice(&token.to_be_bytes());
    frame.extend_from_slice(&price.to_be_bytes());
    frame
}

async fn mock_venue(listener: TcpListener) {
    while let Ok((stream, _)) = listener.accept().await {
        tokio::spawn(handle_connection(stream));
    }
}

async fn handle_connection(stream: TcpStream) {
    let Ok(mut ws) = tokio_tungstenite::accept_async(stream).await else {
        return;
    };

    let mut price = 250_000u32;
    let mut feed = tokio::time::interval(Duration::from_millis(500));

    loop {
        tokio::select! {
            message = ws.next() => {
                match message {
                    Some(Ok(Message::Text(text))) => println!("[Venue] {text}"),
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => return,
                    Some(Ok(_)) => {}
                }
            }
            _ = feed.tick() => {
                price += 25;
                if ws.send(Message::Binary(ltp_frame(738_561, price))).await.is_err() {
                    return;
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(mock_venue(listener));

    println!("Mock venue listening on {addr}");

    let mut dispatcher = Dispatcher::new();
    dispatcher.on_connect(|| println!("[Client] Connected"));
    dispatcher.on_ticks(|ticks| {
        for tick in ticks {
            println!(
                "[Client] {} last={:.2}",
                tick.instrument_token, tick.last_price
            );
        }
    });
    dispatcher.on_close(|_, reason| println!("[Client] Closed: {reason}"));

    let (mut ticker, handle) = TickerBuilder::new("demo-key", "demo-token")
        .root_url(format!("ws://{addr}"))
        .build(dispatcher);

    let ticker_task = tokio::spawn(async move {
        if let Err(e) = ticker.run().await {
            eprintln!("[Client] Stopped: {e}");
        }
    });

    handle.subscribe(vec![738_561]).await?;

    tokio::time::sleep(Duration::from_secs(5)).await;

    handle.close().await?;
    ticker_task.await?;

    println!("Demo finished");
    Ok(())
}
