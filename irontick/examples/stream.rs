//! Example live market-data streamer.
//!
//! Run with:
//! `IRONTICK_API_KEY=... IRONTICK_ACCESS_TOKEN=... cargo run --example stream`
//!
//! Subscribes a pair of instruments and prints decoded ticks until Ctrl-C.

use irontick::prelude::*;
use std::env;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let api_key = env::var("IRONTICK_API_KEY")?;
    let access_token = env::var("IRONTICK_ACCESS_TOKEN")?;

    let mut dispatcher = Dispatcher::new();
    dispatcher.on_connect(|| println!("[Ticker] Connected"));
    dispatcher.on_ticks(|ticks| {
        for tick in ticks {
            println!(
                "[Ticker] {} {:?} last={:.2} change={:+.2}%",
                tick.instrument_token, tick.mode, tick.last_price, tick.change
            );
        }
    });
    dispatcher.on_disconnect(|error| eprintln!("[Ticker] Disconnected: {error}"));
    dispatcher.on_reconnect(|attempt, delay| {
        println!("[Ticker] Reconnect attempt {attempt} in {delay:?}");
    });
    dispatcher.on_order_update(|order| println!("[Ticker] Order update: {order}"));
    dispatcher.on_error(|error| eprintln!("[Ticker] Error: {error}"));
    dispatcher.on_close(|code, reason| println!("[Ticker] Closed ({code:?}): {reason}"));

    let (mut ticker, handle) = TickerBuilder::new(api_key, access_token).build(dispatcher);

    let ticker_task = tokio::spawn(async move {
        if let Err(e) = ticker.run().await {
            eprintln!("[Ticker] Stopped: {e}");
        }
    });

    // NSE instrument tokens
    handle.subscribe(vec![738_561, 408_065]).await?;
    handle.set_mode(TickMode::Full, vec![738_561]).await?;

    println!("Streaming... press Ctrl-C to stop");
    tokio::signal::ctrl_c().await?;

    handle.close().await?;
    ticker_task.await?;

    Ok(())
}
