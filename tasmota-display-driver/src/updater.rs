use crate::{
    errors::DisplayDriverError,
    format::{
        format_currency, format_percentage, format_power, format_timestamp, DISPLAY_TIMEZONE,
    },
    mqtt::CommandPublisher,
    tasmota::{
        dto::{DisplayClear, DisplayText, Position},
        topics::TasmotaDisplay,
    },
};
use chrono_tz::Tz;
use log::{debug, info, warn};
use powston_display_lib::{
    powston::{dto::InverterState, topics::tenant_of},
    topic::{Decode, Encode, Topic},
};

const INVERTER_TIME_POSITION: Position = Position::new(1, 0);
const HOUSE_POWER_POSITION: Position = Position::new(2, 15);
const BATTERY_POSITION: Position = Position::new(2, 40);
const SELL_PRICE_POSITION: Position = Position::new(2, 80);
const BUY_PRICE_POSITION: Position = Position::new(2, 100);
const FORECAST_POSITIONS: [Position; 3] = [
    Position::new(1, 120),
    Position::new(1, 130),
    Position::new(1, 140),
];

/// A forecast is only shown when it is longer than this.
const FORECAST_MIN_LEN: usize = 10;
/// Values read by the three forecast lines.
const FORECAST_LEN: usize = 16;

/// Redraws one display from each inverter state message.
pub struct DisplayUpdater<P> {
    publisher: P,
    display_id: String,
}

impl<P> DisplayUpdater<P>
where
    P: CommandPublisher,
{
    pub fn new(publisher: P, display_id: impl Into<String>) -> Self {
        Self {
            publisher,
            display_id: display_id.into(),
        }
    }

    /// Clears the display and writes every section `payload` has the data
    /// for. A payload that is not an inverter state publishes nothing.
    pub async fn handle(&self, topic: &str, payload: &[u8]) -> Result<(), DisplayDriverError> {
        let state = InverterState::decode(payload)?;
        let display = TasmotaDisplay::new(tenant_of(topic), &self.display_id);

        // The display paints as bytes arrive, so it has to be blank before
        // the first line is sent
        self.send(&display.clear, &DisplayClear).await?;
        self.publisher.flush().await?;

        if let Some(line) = inverter_time_line(&state, DISPLAY_TIMEZONE) {
            self.send(&display.text, &line).await?;
        }
        if let Some(line) = house_power_line(&state) {
            self.send(&display.text, &line).await?;
        }
        if let Some(line) = battery_line(&state) {
            self.send(&display.text, &line).await?;
        }
        if let Some([sell, buy]) = price_lines(&state) {
            self.send(&display.text, &sell).await?;
            self.send(&display.text, &buy).await?;
            info!("Published buy price '{}'", buy.text);
        }
        for line in forecast_lines(&state) {
            self.send(&display.text, &line).await?;
            self.publisher.flush().await?;
        }
        Ok(())
    }

    async fn send<M>(&self, topic: &Topic<M>, message: &M) -> Result<(), DisplayDriverError>
    where
        M: Encode,
    {
        let payload = topic.encode(message);
        debug!("Publishing {:?} to '{}'", payload, topic);
        self.publisher.publish(topic.name(), payload).await
    }
}

fn inverter_time_line(state: &InverterState, timezone: Tz) -> Option<DisplayText> {
    let (Some(time), Some(action)) = (&state.last_inverter_time, &state.action) else {
        warn!("Missing 'last_inverter_time' or 'action' in data");
        return None;
    };
    match format_timestamp(time, timezone) {
        Ok(time) => Some(DisplayText::new(
            INVERTER_TIME_POSITION,
            format!("{}: {}", time, action),
        )),
        Err(e) => {
            warn!("Invalid 'last_inverter_time' '{}' in data: {}", time, e);
            None
        }
    }
}

fn house_power_line(state: &InverterState) -> Option<DisplayText> {
    let (Some(house), Some(grid)) = (state.house_power, state.grid_power) else {
        warn!("Missing 'house_power' or 'grid_power' in data");
        return None;
    };
    Some(DisplayText::new(
        HOUSE_POWER_POSITION,
        format!("House: {}/{}", format_power(house), format_power(grid)),
    ))
}

fn battery_line(state: &InverterState) -> Option<DisplayText> {
    let (Some(soc), Some(voltage)) = (state.battery_soc, state.battery_voltage) else {
        warn!("Missing 'battery_soc' or 'battery_voltage' in data");
        return None;
    };
    Some(DisplayText::new(
        BATTERY_POSITION,
        format!("Battery: {}/{:.1}V", format_percentage(soc), voltage),
    ))
}

/// Sell and buy price lines. Prices arrive in cents.
fn price_lines(state: &InverterState) -> Option<[DisplayText; 2]> {
    let (Some(sell), Some(buy)) = (state.sell_price, state.buy_price) else {
        warn!("Missing 'buy_price' or 'sell_price' in data");
        return None;
    };
    Some([
        DisplayText::new(
            SELL_PRICE_POSITION,
            format!("Sell: {}/kWh", format_currency(sell / 100.0)),
        ),
        DisplayText::new(
            BUY_PRICE_POSITION,
            format!("Buy: {}/kWh", format_currency(buy / 100.0)),
        ),
    ])
}

// Line three starts at index 11; element 10 has never been shown.
fn forecast_lines(state: &InverterState) -> Vec<DisplayText> {
    let Some(forecast) = &state.forecast else {
        warn!("Missing 'forecast' in data");
        return Vec::new();
    };
    if forecast.len() <= FORECAST_MIN_LEN {
        debug!("Forecast too short to display ({} values)", forecast.len());
        return Vec::new();
    }
    if forecast.len() < FORECAST_LEN {
        warn!(
            "Forecast has {} values, {} needed for all lines",
            forecast.len(),
            FORECAST_LEN
        );
        return Vec::new();
    }

    let join = |values: &[f64]| {
        values
            .iter()
            .map(|value| format_currency(*value))
            .collect::<Vec<_>>()
            .join(", ")
    };

    vec![
        DisplayText::new(
            FORECAST_POSITIONS[0],
            format!("Fcst: {}", join(&forecast[0..4])),
        ),
        DisplayText::new(FORECAST_POSITIONS[1], join(&forecast[4..10])),
        DisplayText::new(FORECAST_POSITIONS[2], join(&forecast[11..16])),
    ]
}
