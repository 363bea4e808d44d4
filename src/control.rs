use crate::bulb::Bulb;
use crate::connection::send_once;
use crate::error::Result;
use crate::protocol::Command;
use crate::types::Rgb;
use serde_json::{json, Value};

impl Bulb {
    /// Send a raw method call to the bulb
    ///
    /// Each call uses its own TCP connection. The bulb's reply, if any, is not
    /// read, so an invalid method or parameter is not reported here.
    pub async fn send_command(&self, method: &str, params: Vec<Value>) -> Result<()> {
        let payload = Command::new(self.id.clone(), method)
            .with_params(params)
            .encode()?;
        let addr = self.address();

        tracing::debug!("Sending to {}: {}", addr, String::from_utf8_lossy(&payload).trim_end());
        send_once(&addr, &payload).await?;
        tracing::info!("Sent {} to {}", method, self.id);

        Ok(())
    }

    // ========== Power ==========

    /// Switch the bulb on or off
    ///
    /// `effect` is `"sudden"` or `"smooth"`; `duration_ms` only applies to
    /// smooth transitions. `mode` selects the mode to switch on into
    /// (0 keeps the current one).
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use yeelight_lan::{Discovery, SearchOptions};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let bulb = Discovery::find_bulb(&SearchOptions::default()).await?;
    /// bulb.set_power(true, "smooth", 500, 0).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn set_power(&self, on: bool, effect: &str, duration_ms: i64, mode: i64) -> Result<()> {
        let power = if on { "on" } else { "off" };
        self.send_command("set_power", vec![json!(power), json!(effect), json!(duration_ms), json!(mode)])
            .await
    }

    /// Flip the power state
    pub async fn toggle(&self) -> Result<()> {
        self.send_command("toggle", Vec::new()).await
    }

    // ========== Light ==========

    /// Set brightness (1-100 on current firmware)
    pub async fn set_brightness(&self, value: i64, effect: &str, duration_ms: i64) -> Result<()> {
        self.send_command("set_bright", vec![json!(value), json!(effect), json!(duration_ms)])
            .await
    }

    /// Set the color, sent packed as `0xRRGGBB`
    pub async fn set_rgb(&self, rgb: Rgb, effect: &str, duration_ms: i64) -> Result<()> {
        self.send_command("set_rgb", vec![json!(rgb.packed()), json!(effect), json!(duration_ms)])
            .await
    }

    /// Set white color temperature in kelvin
    pub async fn set_color_temperature(&self, kelvin: i64, effect: &str, duration_ms: i64) -> Result<()> {
        self.send_command("set_ct_abx", vec![json!(kelvin), json!(effect), json!(duration_ms)])
            .await
    }

    // ========== Misc ==========

    /// Store a name on the bulb
    pub async fn set_name(&self, name: &str) -> Result<()> {
        self.send_command("set_name", vec![json!(name)]).await
    }
}
