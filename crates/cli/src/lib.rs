//! `profitlayer` command: render the profit snippet for one order from
//! fixture files.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::Parser;

use profitlayer_analytics::{Clock, EmitterConfig, FixedClock, ProfitEventEmitter, SystemClock};
use profitlayer_core::OrderId;
use profitlayer_infra::{load_costs, load_orders};
use profitlayer_observability::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "profitlayer", about = "Render the gross-profit data-layer push for an order")]
pub struct Args {
    /// JSON array of orders.
    #[arg(long)]
    pub orders: PathBuf,

    /// JSON array of product cost records.
    #[arg(long)]
    pub costs: PathBuf,

    /// Order to render the snippet for.
    #[arg(long)]
    pub order_id: OrderId,

    /// JSON emitter config. Without it, PROFITLAYER_* variables apply.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Pin "now" (RFC 3339) instead of reading the system clock.
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,

    /// Log output format (json or compact).
    #[arg(long, env = "PROFITLAYER_LOG_FORMAT", default_value = "json")]
    pub log_format: LogFormat,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<EmitterConfig> {
    let Some(path) = path else {
        return Ok(EmitterConfig::from_env());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse config {}", path.display()))
}

/// The rendered snippet, or `None` when the order gets no event.
pub fn run(args: &Args) -> anyhow::Result<Option<String>> {
    let config = load_config(args.config.as_deref())?;
    let orders = load_orders(&args.orders)?;
    let costs = load_costs(&args.costs)?;

    // A one-shot run reads the clock once either way.
    let now = args.now.unwrap_or_else(|| SystemClock.now());
    let emitter = ProfitEventEmitter::new(config, orders, costs)
        .context("invalid emitter config")?
        .with_clock(FixedClock(now));

    Ok(emitter.emit(args.order_id))
}
