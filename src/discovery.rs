use crate::bulb::Bulb;
use crate::error::{BulbError, Result};
use crate::types::Advertisement;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::{timeout, Instant};

/// Multicast group and port bulbs listen on for searches
pub const MULTICAST_ADDR: SocketAddrV4 = SocketAddrV4::new(Ipv4Addr::new(239, 255, 255, 250), 1982);

/// Search target answered by Yeelight bulbs
pub const DEFAULT_SEARCH_TARGET: &str = "wifi_bulb";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_DATAGRAM: usize = 2048;

/// Options for a discovery search
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Value of the `ST` header
    pub search_target: String,

    /// How long to collect answers
    pub timeout: Duration,

    /// Local interface to search from, any when `None`
    pub interface: Option<Ipv4Addr>,

    /// Where the search request is sent
    pub multicast_addr: SocketAddr,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            search_target: DEFAULT_SEARCH_TARGET.to_string(),
            timeout: DEFAULT_TIMEOUT,
            interface: None,
            multicast_addr: SocketAddr::V4(MULTICAST_ADDR),
        }
    }
}

impl SearchOptions {
    pub fn with_search_target(mut self, search_target: impl Into<String>) -> Self {
        self.search_target = search_target.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_interface(mut self, interface: Ipv4Addr) -> Self {
        self.interface = Some(interface);
        self
    }

    pub fn with_multicast_addr(mut self, addr: SocketAddr) -> Self {
        self.multicast_addr = addr;
        self
    }

    fn request(&self) -> String {
        format!(
            "M-SEARCH * HTTP/1.1\r\nHOST: {}\r\nMAN: \"ssdp:discover\"\r\nST: {}\r\n\r\n",
            self.multicast_addr, self.search_target
        )
    }
}

/// Multicast discovery for bulbs on the local network
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use yeelight_lan::{Discovery, SearchOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let options = SearchOptions::default().with_timeout(Duration::from_secs(2));
///     for ad in Discovery::search(&options).await? {
///         println!("Found bulb at {}", ad.location);
///     }
///     Ok(())
/// }
/// ```
pub struct Discovery;

impl Discovery {
    /// Send one search request and collect answers until the timeout elapses
    ///
    /// Answers are returned in arrival order, one per location. An empty list
    /// is not an error.
    pub async fn search(options: &SearchOptions) -> Result<Vec<Advertisement>> {
        let bind_addr = SocketAddr::from((options.interface.unwrap_or(Ipv4Addr::UNSPECIFIED), 0));
        let socket = UdpSocket::bind(bind_addr).await?;

        tracing::info!("Searching for {} via {}", options.search_target, options.multicast_addr);
        socket
            .send_to(options.request().as_bytes(), options.multicast_addr)
            .await?;

        let mut found: Vec<Advertisement> = Vec::new();
        let mut buffer = [0u8; MAX_DATAGRAM];
        let deadline = Instant::now() + options.timeout;

        loop {
            let now = Instant::now();
            if now >= deadline {
                break;
            }

            match timeout(deadline - now, socket.recv_from(&mut buffer)).await {
                Ok(Ok((len, src))) => {
                    let text = String::from_utf8_lossy(&buffer[..len]);
                    tracing::debug!("Discovery answer from {}: {}", src, text);

                    let Some(ad) = Advertisement::parse_response(&text) else {
                        tracing::warn!("Ignoring unexpected datagram from {}", src);
                        continue;
                    };

                    if found.iter().any(|known| known.location == ad.location) {
                        tracing::debug!("Already found {}, skipping", ad.location);
                        continue;
                    }

                    tracing::info!("Found bulb at {}", ad.location);
                    found.push(ad);
                }
                Ok(Err(e)) => {
                    tracing::warn!("Discovery receive error: {}", e);
                }
                Err(_) => break,
            }
        }

        tracing::info!("Discovery finished with {} answer(s)", found.len());
        Ok(found)
    }

    /// Search and parse the first bulb that answered
    pub async fn find_bulb(options: &SearchOptions) -> Result<Bulb> {
        let found = Self::search(options).await?;
        if found.is_empty() {
            tracing::warn!("No bulb answered within {:?}", options.timeout);
            return Err(BulbError::DeviceNotFound);
        }
        Bulb::from_first(&found)
    }
}
