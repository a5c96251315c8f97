//! # Road Traffic
//!
//! Console host for the traffic screen. The host is ready as soon as the
//! process starts; after that each line on stdin is a UI event:
//!
//! - `traffic` clicks the "get traffic" control,
//! - `locate` re-centres the map on the device,
//! - `quit` closes the screen.
//!
//! Events are handled on one thread, and a click can arrive while an earlier
//! request is still outstanding.

mod config;
mod provider;

use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use futures::future::LocalBoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};
use traffic_screen::{Config, FetchOutcome, TrafficScreenController};

use crate::provider::Provider;

type Screen = TrafficScreenController<Provider>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Event {
    Traffic,
    Locate,
    Quit,
}

impl FromStr for Event {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "traffic" | "t" => Ok(Self::Traffic),
            "locate" | "l" => Ok(Self::Locate),
            "quit" | "q" => Ok(Self::Quit),
            other => Err(anyhow!("unknown event: {other}")),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    Registry::default()
        .with(EnvFilter::new(config::get_log_filter()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let screen = Screen::new(Provider::new()?, Config::from_env());
    screen.initialize().await.context("initializing screen")?;
    locate(&screen).await;

    println!("events: traffic | locate | quit");
    run(&screen).await?;

    info!(phase = %screen.phase(), status = %screen.traffic_status(), "screen closed");
    Ok(())
}

async fn run(screen: &Screen) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: FuturesUnordered<LocalBoxFuture<'_, ()>> = FuturesUnordered::new();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading ui events")? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Event>() {
                    Ok(Event::Traffic) => pending.push(click(screen).boxed_local()),
                    Ok(Event::Locate) => pending.push(locate(screen).boxed_local()),
                    Ok(Event::Quit) => break,
                    Err(err) => warn!(error = %err, "ignoring event"),
                }
            }
            Some(()) = pending.next(), if !pending.is_empty() => {}
        }
    }

    // let outstanding requests settle before the screen goes away
    while pending.next().await.is_some() {}
    Ok(())
}

async fn click(screen: &Screen) {
    match screen.fetch_traffic_report().await {
        Ok(FetchOutcome::Rendered(report)) => {
            println!("{}: {}", report.name, report.status);
        }
        Ok(FetchOutcome::Ignored) => println!("still waiting for the previous report"),
        Ok(FetchOutcome::Rejected { .. } | FetchOutcome::Unreachable) => {}
        Err(err) => error!(error = %err, "fetching traffic report failed"),
    }
}

async fn locate(screen: &Screen) {
    if let Err(err) = screen.geolocate_device().await {
        error!(error = %err, "locating device failed");
    }
}
