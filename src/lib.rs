//! Rust library for discovering and controlling Yeelight smart bulbs on the local network
//!
//! Bulbs answer a multicast search with a set of headers describing their
//! identity, capabilities and current state. This library turns such an answer
//! into a typed [`Bulb`] and sends control commands to it over the bulb's
//! line-delimited JSON protocol.
//!
//! # Quick Start
//!
//! ```no_run
//! use yeelight_lan::{Discovery, SearchOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let bulb = Discovery::find_bulb(&SearchOptions::default()).await?;
//!     println!("Found {} at {}", bulb.model, bulb.address());
//!
//!     bulb.set_power(true, "smooth", 500, 0).await?;
//!     bulb.set_brightness(50, "sudden", 0).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Without Discovery
//!
//! A [`Bulb`] can be built from any [`Advertisement`], for example one
//! remembered from an earlier search:
//!
//! ```no_run
//! use yeelight_lan::{Advertisement, Bulb};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ad = Advertisement::new("yeelight://192.168.1.5:55443")
//!         .with_header("Id", "0x000000000015243f");
//!     let bulb = Bulb::from_advertisement(&ad)?;
//!     bulb.toggle().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - **Discovery**: multicast search on `239.255.255.250:1982`
//! - **Bulb**: typed view of one search answer
//! - **Control**: command methods on [`Bulb`]
//! - **Protocol**: JSON command encoding
//! - **Connection**: one TCP connection per command

mod bulb;
mod connection;
mod control;
mod discovery;
mod error;
mod protocol;
mod types;

// Public exports
pub use bulb::{Bulb, UNKNOWN};
pub use discovery::{Discovery, SearchOptions, DEFAULT_SEARCH_TARGET, MULTICAST_ADDR};
pub use error::{BulbError, Result};
pub use protocol::{Command, TERMINATOR};
pub use types::{Advertisement, DeviceId, Rgb};
