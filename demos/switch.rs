use clap::{Parser, Subcommand};
use std::net::Ipv4Addr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use yeelight_lan::{Discovery, SearchOptions};

/// Find a Yeelight bulb on the local network and switch it
#[derive(Parser)]
struct Args {
    /// Seconds to wait for discovery answers
    #[arg(long, default_value_t = 5)]
    timeout: u64,

    /// Local IPv4 address to search from
    #[arg(long)]
    interface: Option<Ipv4Addr>,

    /// Transition effect: sudden or smooth
    #[arg(long, default_value = "smooth")]
    effect: String,

    /// Transition duration in milliseconds
    #[arg(long, default_value_t = 500)]
    duration: i64,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Switch the bulb on
    On,
    /// Switch the bulb off
    Off,
    /// Set brightness
    Bright { value: i64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let mut options = SearchOptions::default().with_timeout(Duration::from_secs(args.timeout));
    if let Some(interface) = args.interface {
        options = options.with_interface(interface);
    }

    let bulb = Discovery::find_bulb(&options).await?;
    println!(
        "{} \"{}\" at {} (power {}, brightness {})",
        bulb.model,
        bulb.name,
        bulb.address(),
        if bulb.power_on { "on" } else { "off" },
        bulb.brightness
    );

    match args.action {
        Action::On => bulb.set_power(true, &args.effect, args.duration, 0).await?,
        Action::Off => bulb.set_power(false, &args.effect, args.duration, 0).await?,
        Action::Bright { value } => bulb.set_brightness(value, &args.effect, args.duration).await?,
    }

    Ok(())
}
