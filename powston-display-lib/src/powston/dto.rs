use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};

/// Inverter state as published by Powston on `{user}/powston/{inverter}/state`.
///
/// Every field is optional and `null` counts as absent. Prices are in cents,
/// power in watts. Only a JSON object decodes; arrays are rejected even when
/// their length happens to match the field count.
#[derive(Serialize, Deserialize, PartialEq, Debug, Default, Clone)]
#[serde(try_from = "Map<String, Value>")]
pub struct InverterState {
    pub last_inverter_time: Option<String>,
    pub action: Option<String>,
    pub house_power: Option<f64>,
    pub grid_power: Option<f64>,
    pub battery_soc: Option<f64>,
    pub battery_voltage: Option<f64>,
    pub sell_price: Option<f64>,
    pub buy_price: Option<f64>,
    pub forecast: Option<Vec<f64>>,
}

impl TryFrom<Map<String, Value>> for InverterState {
    type Error = serde_json::Error;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        Ok(Self {
            last_inverter_time: field(&mut fields, "last_inverter_time")?,
            action: field(&mut fields, "action")?,
            house_power: field(&mut fields, "house_power")?,
            grid_power: field(&mut fields, "grid_power")?,
            battery_soc: field(&mut fields, "battery_soc")?,
            battery_voltage: field(&mut fields, "battery_voltage")?,
            sell_price: field(&mut fields, "sell_price")?,
            buy_price: field(&mut fields, "buy_price")?,
            forecast: field(&mut fields, "forecast")?,
        })
    }
}

fn field<T>(fields: &mut Map<String, Value>, name: &str) -> Result<Option<T>, serde_json::Error>
where
    T: DeserializeOwned,
{
    match fields.remove(name) {
        Some(value) => serde_json::from_value(value),
        None => Ok(None),
    }
}
