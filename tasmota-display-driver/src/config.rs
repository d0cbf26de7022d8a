use crate::errors::DisplayDriverError;

const DEFAULT_MQTT_SERVER: &str = "mqtt.powston.com";
const DEFAULT_MQTT_PORT: u16 = 1883;
const DEFAULT_INVERTER: &str = "inverter_1";
const DEFAULT_DISPLAY: &str = "tasmota_EAB2A0";

#[derive(Debug, Clone)]
pub struct Config {
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub inverter: String,
    pub display_id: String,
    pub syslog: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, DisplayDriverError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self, DisplayDriverError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match var("POWSTON_MQTT_PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| DisplayDriverError::Config("POWSTON_MQTT_PORT", port))?,
            None => DEFAULT_MQTT_PORT,
        };

        let syslog = matches!(
            var("POWSTON_DISPLAY_SYSLOG").as_deref(),
            Some("1" | "true" | "yes" | "on")
        );

        Ok(Self {
            server: var("POWSTON_MQTT_SERVER").unwrap_or_else(|| DEFAULT_MQTT_SERVER.to_string()),
            port,
            username: var("POWSTON_MQTT_USERNAME").unwrap_or_default(),
            password: var("POWSTON_MQTT_PASSWORD").unwrap_or_default(),
            inverter: var("POWSTON_INVERTER").unwrap_or_else(|| DEFAULT_INVERTER.to_string()),
            display_id: var("POWSTON_DISPLAY").unwrap_or_else(|| DEFAULT_DISPLAY.to_string()),
            syslog,
        })
    }
}
