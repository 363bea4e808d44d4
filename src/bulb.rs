use crate::error::{BulbError, Result};
use crate::types::{Advertisement, DeviceId, Rgb};
use url::{Host, Url};

/// Length of the `0x` marker in front of the advertised id
const ID_PREFIX_LEN: usize = 2;

/// Value of lenient integer fields that could not be read
pub const UNKNOWN: i64 = -1;

/// A discovered bulb
///
/// Built once from a discovery answer and never updated; run discovery again
/// for fresh state. Integer fields hold [`UNKNOWN`] when the bulb did not
/// advertise them.
#[derive(Debug, Clone)]
pub struct Bulb {
    pub id: DeviceId,
    pub model: String,
    pub name: String,
    pub power_on: bool,
    pub brightness: i64,
    pub saturation: i64,
    pub hue: i64,
    pub temperature: i64,
    pub rgb: Rgb,
    pub color_mode: i64,
    pub firmware_version: i64,

    /// Method names from the `Support` header, in advertised order
    pub support: Vec<String>,

    pub scheme: String,
    pub host: String,

    /// Port as written in the location, empty when absent
    pub port: String,

    advertisement: Advertisement,
}

impl Bulb {
    /// Parse a discovery answer
    ///
    /// Fails on an unparsable location or a missing/invalid `Id` header.
    /// Other headers are best effort.
    pub fn from_advertisement(advertisement: &Advertisement) -> Result<Self> {
        let url = Url::parse(&advertisement.location).map_err(|source| BulbError::MalformedLocation {
            location: advertisement.location.clone(),
            source,
        })?;

        let id = parse_header_hex(advertisement, "Id")?;

        let host = match url.host() {
            Some(Host::Ipv6(addr)) => addr.to_string(),
            Some(host) => host.to_string(),
            None => String::new(),
        };
        let port = url.port().map(|p| p.to_string()).unwrap_or_default();

        let bulb = Self {
            id,
            model: header_text(advertisement, "Model"),
            name: header_text(advertisement, "Name"),
            power_on: advertisement.header("Power") == Some("on"),
            brightness: parse_header_int(advertisement, "Bright"),
            saturation: parse_header_int(advertisement, "Sat"),
            hue: parse_header_int(advertisement, "Hue"),
            temperature: parse_header_int(advertisement, "Ct"),
            rgb: Rgb::from_packed(parse_header_int(advertisement, "Rgb")),
            color_mode: parse_header_int(advertisement, "Color_mode"),
            firmware_version: parse_header_int(advertisement, "Fw_ver"),
            support: header_text(advertisement, "Support")
                .split(' ')
                .map(str::to_string)
                .collect(),
            scheme: url.scheme().to_string(),
            host,
            port,
            advertisement: advertisement.clone(),
        };

        tracing::info!("Found bulb {} ({}) at {}", bulb.id, bulb.model, bulb.address());
        Ok(bulb)
    }

    /// Parse the first of a list of discovery answers
    pub fn from_first(advertisements: &[Advertisement]) -> Result<Self> {
        let first = advertisements.first().ok_or(BulbError::DeviceNotFound)?;
        Self::from_advertisement(first)
    }

    /// Get the discovery answer this bulb was parsed from
    pub fn advertisement(&self) -> &Advertisement {
        &self.advertisement
    }

    /// Check whether the bulb advertised a method
    pub fn supports(&self, method: &str) -> bool {
        self.support.iter().any(|m| m == method)
    }

    /// `host:port` for the control connection
    pub fn address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

fn header_text(advertisement: &Advertisement, name: &str) -> String {
    advertisement.header(name).unwrap_or_default().to_string()
}

fn parse_header_int(advertisement: &Advertisement, name: &str) -> i64 {
    match advertisement.header(name).map(str::parse::<i64>) {
        Some(Ok(value)) => value,
        _ => {
            tracing::warn!("Can't extract header ({})", name);
            UNKNOWN
        }
    }
}

fn parse_header_hex(advertisement: &Advertisement, name: &str) -> Result<DeviceId> {
    let raw = advertisement.header(name).unwrap_or_default();
    raw.get(ID_PREFIX_LEN..)
        .and_then(DeviceId::from_hex)
        .ok_or_else(|| BulbError::MissingIdentifier(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    fn sample() -> Advertisement {
        Advertisement::new("yeelight://192.168.1.5:55443")
            .with_header("Id", "0x000000000015243f")
            .with_header("Model", "color")
            .with_header("Name", "desk")
            .with_header("Power", "on")
            .with_header("Rgb", "16711680")
            .with_header("Bright", "100")
            .with_header("Ct", "4000")
            .with_header("Hue", "359")
            .with_header("Sat", "0")
            .with_header("Color_mode", "2")
            .with_header("Fw_ver", "18")
            .with_header("Support", "get_prop set_default set_power toggle set_bright")
    }

    #[test]
    fn test_full_advertisement() {
        let bulb = Bulb::from_advertisement(&sample()).unwrap();
        assert_eq!(bulb.id.value(), &BigUint::from(0x15243fu32));
        assert_eq!(bulb.model, "color");
        assert_eq!(bulb.name, "desk");
        assert!(bulb.power_on);
        assert_eq!(bulb.rgb, Rgb::new(0xFF, 0, 0));
        assert_eq!(bulb.brightness, 100);
        assert_eq!(bulb.temperature, 4000);
        assert_eq!(bulb.hue, 359);
        assert_eq!(bulb.saturation, 0);
        assert_eq!(bulb.color_mode, 2);
        assert_eq!(bulb.firmware_version, 18);
        assert_eq!(bulb.support.len(), 5);
        assert!(bulb.supports("set_bright"));
        assert!(!bulb.supports("set_rgb"));
        assert_eq!(bulb.advertisement(), &sample());
    }

    #[test]
    fn test_location_parts() {
        let bulb = Bulb::from_advertisement(&sample()).unwrap();
        assert_eq!(bulb.host, "192.168.1.5");
        assert_eq!(bulb.port, "55443");
        assert_eq!(bulb.scheme, "yeelight");
        assert_eq!(bulb.address(), "192.168.1.5:55443");
    }

    #[test]
    fn test_location_without_port() {
        let ad = Advertisement::new("yeelight://bulb.local").with_header("Id", "0x1");
        let bulb = Bulb::from_advertisement(&ad).unwrap();
        assert_eq!(bulb.host, "bulb.local");
        assert_eq!(bulb.port, "");
    }

    #[test]
    fn test_ipv6_location() {
        let ad = Advertisement::new("yeelight://[fe80::1]:55443").with_header("Id", "0x1");
        let bulb = Bulb::from_advertisement(&ad).unwrap();
        assert_eq!(bulb.host, "fe80::1");
        assert_eq!(bulb.address(), "[fe80::1]:55443");
    }

    #[test]
    fn test_malformed_location() {
        let ad = sample();
        let ad = Advertisement { location: "not a url".to_string(), ..ad };
        assert!(matches!(
            Bulb::from_advertisement(&ad),
            Err(BulbError::MalformedLocation { .. })
        ));
    }

    #[test]
    fn test_missing_identifier() {
        let mut ad = sample();
        ad.headers.remove("Id");
        assert!(matches!(
            Bulb::from_advertisement(&ad),
            Err(BulbError::MissingIdentifier(_))
        ));

        for bad in ["", "0", "0x", "0xnothex"] {
            let ad = sample().with_header("Id", bad);
            assert!(
                matches!(Bulb::from_advertisement(&ad), Err(BulbError::MissingIdentifier(_))),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_identifier_prefix_is_not_checked() {
        let ad = sample().with_header("Id", "##ff");
        let bulb = Bulb::from_advertisement(&ad).unwrap();
        assert_eq!(bulb.id.value(), &BigUint::from(255u32));
    }

    #[test]
    fn test_lenient_integers() {
        let ad = Advertisement::new("yeelight://10.0.0.7:55443")
            .with_header("Id", "0xab")
            .with_header("Bright", "abc")
            .with_header("Ct", "-20")
            .with_header("Hue", "0")
            .with_header("Sat", "")
            .with_header("Fw_ver", "4.5");
        let bulb = Bulb::from_advertisement(&ad).unwrap();
        assert_eq!(bulb.brightness, UNKNOWN);
        assert_eq!(bulb.temperature, -20);
        assert_eq!(bulb.hue, 0);
        assert_eq!(bulb.saturation, UNKNOWN);
        assert_eq!(bulb.firmware_version, UNKNOWN);
        assert_eq!(bulb.color_mode, UNKNOWN);
        assert_eq!(bulb.model, "");
        assert_eq!(bulb.name, "");
        // Missing packed color decodes from -1
        assert_eq!(bulb.rgb, Rgb::new(0xFF, 0xFF, 0xFF));
    }

    #[test]
    fn test_power_is_exact_match() {
        for (value, expected) in [("on", true), ("On", false), ("off", false), ("", false), ("on ", false)] {
            let ad = sample().with_header("Power", value);
            assert_eq!(Bulb::from_advertisement(&ad).unwrap().power_on, expected, "{:?}", value);
        }

        let mut ad = sample();
        ad.headers.remove("Power");
        assert!(!Bulb::from_advertisement(&ad).unwrap().power_on);
    }

    #[test]
    fn test_support_split() {
        let ad = sample().with_header("Support", "set_power set_bright");
        assert_eq!(
            Bulb::from_advertisement(&ad).unwrap().support,
            vec!["set_power".to_string(), "set_bright".to_string()]
        );

        let ad = sample().with_header("Support", "");
        assert_eq!(Bulb::from_advertisement(&ad).unwrap().support, vec![String::new()]);

        let ad = sample().with_header("Support", "a  b");
        assert_eq!(Bulb::from_advertisement(&ad).unwrap().support, vec!["a", "", "b"]);
    }

    #[test]
    fn test_from_first() {
        assert!(matches!(Bulb::from_first(&[]), Err(BulbError::DeviceNotFound)));

        let other = Advertisement::new("yeelight://10.0.0.9:55443").with_header("Id", "0x2");
        let bulb = Bulb::from_first(&[sample(), other]).unwrap();
        assert_eq!(bulb.host, "192.168.1.5");
    }
}
