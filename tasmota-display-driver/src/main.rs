use anyhow::{anyhow, Context, Result};
use config::Config;
use errors::DisplayDriverError;
use log::{error, info, LevelFilter};
use powston_display_lib::powston::topics::inverter_state_topic;
use rumqttc::{AsyncClient, MqttOptions, QoS};
use std::time::Duration;
use syslog::{BasicLogger, Facility, Formatter3164};
use updater::DisplayUpdater;

mod config;
mod errors;
mod format;
mod mqtt;
mod tasmota;
mod updater;

const MQTT_CLIENT_NAME: &str = "powston-display-updater";
const SYSLOG_PROCESS_NAME: &str = "powstondisplayd";

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    if config.syslog {
        let logger = syslog::unix(syslog_formatter())
            .map_err(|e| anyhow!("Failed to initialize syslog: {}", e))?;
        log::set_boxed_logger(Box::new(BasicLogger::new(logger)))
            .map(|()| log::set_max_level(LevelFilter::Info))
            .context("Failed to install syslog logger")?;
    } else {
        env_logger::init();
    }

    println!(
        "Starting Powston Display Driver (powstondisplayd) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let mut mqttoptions = MqttOptions::new(MQTT_CLIENT_NAME, config.server.as_str(), config.port);
    mqttoptions.set_keep_alive(Duration::from_secs(5));
    if !config.username.is_empty() {
        mqttoptions.set_credentials(config.username.as_str(), config.password.as_str());
    }

    let (client, eventloop) = AsyncClient::new(mqttoptions, 10);

    let state_topic = inverter_state_topic(&config.username, &config.inverter);
    client.subscribe(state_topic.name(), QoS::AtMostOnce).await?;
    info!("Subscribed to '{}'", state_topic);

    let (publisher, mut incoming, _handle) = mqtt::spawn(client, eventloop);
    let updater = DisplayUpdater::new(publisher, config.display_id);

    while let Some(publish) = incoming.recv().await {
        info!("Received message on topic '{}'", publish.topic);
        match updater.handle(&publish.topic, &publish.payload).await {
            Ok(()) => {}
            Err(DisplayDriverError::InvalidPayload(e)) => {
                error!("Dropping message on '{}': {}", publish.topic, e);
            }
            Err(e) => {
                error!("Failed to update display: {:?}", e);
                std::process::exit(1);
            }
        }
    }
    // If the channel closed the connection to the broker was lost
    std::process::exit(1);
}

fn syslog_formatter() -> Formatter3164 {
    Formatter3164 {
        facility: Facility::LOG_DAEMON,
        hostname: None,
        process: SYSLOG_PROCESS_NAME.into(),
        pid: std::process::id(),
    }
}
