use thiserror::Error;

#[derive(Error, Debug)]
pub enum DisplayDriverError {
    #[error("Inverter state payload is not valid JSON: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("Failed to publish display command: {0}")]
    Publish(#[from] rumqttc::ClientError),

    #[error("MQTT event loop stopped before pending commands were written")]
    FlushInterrupted,

    #[error("Invalid value for {0}: {1}")]
    Config(&'static str, String),
}
