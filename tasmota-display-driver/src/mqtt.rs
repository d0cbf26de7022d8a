use crate::errors::DisplayDriverError;
use async_trait::async_trait;
use bytes::Bytes;
use log::{debug, error};
use rumqttc::{AsyncClient, Event, EventLoop, Outgoing, Packet, Publish, QoS};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};

/// Outbound side of the bus as seen by the display updater.
#[async_trait]
pub trait CommandPublisher: Send + Sync {
    async fn publish(&self, topic: &str, payload: Bytes) -> Result<(), DisplayDriverError>;

    /// Waits until every command published so far has been written to the
    /// transport.
    async fn flush(&self) -> Result<(), DisplayDriverError>;
}

/// Publishes queued versus publishes the event loop reported as written.
pub struct WriteTracker {
    issued: AtomicU64,
    written: watch::Receiver<u64>,
}

impl WriteTracker {
    /// The sender is bumped once per `Outgoing::Publish`. Dropping it fails
    /// any pending or later `drained` call.
    pub fn new() -> (Self, watch::Sender<u64>) {
        let (written_tx, written_rx) = watch::channel(0u64);
        (
            Self {
                issued: AtomicU64::new(0),
                written: written_rx,
            },
            written_tx,
        )
    }

    pub fn issued(&self) {
        self.issued.fetch_add(1, Ordering::SeqCst);
    }

    pub async fn drained(&self) -> Result<(), DisplayDriverError> {
        let issued = self.issued.load(Ordering::SeqCst);
        let mut written = self.written.clone();
        let drained = written
            .wait_for(|written| *written >= issued)
            .await
            .map(|_| ());
        drained.map_err(|_| DisplayDriverError::FlushInterrupted)
    }
}

pub struct MqttPublisher {
    client: AsyncClient,
    writes: WriteTracker,
}

/// Starts polling `eventloop` on its own task.
///
/// Incoming publishes are forwarded on the returned receiver, which closes
/// once the event loop fails. The channel is unbounded so the event loop
/// keeps writing while the handler waits in `flush`.
pub fn spawn(
    client: AsyncClient,
    mut eventloop: EventLoop,
) -> (
    MqttPublisher,
    mpsc::UnboundedReceiver<Publish>,
    JoinHandle<()>,
) {
    let (writes, written_tx) = WriteTracker::new();
    let (incoming_tx, incoming_rx) = mpsc::unbounded_channel();

    let handle = tokio::spawn(async move {
        loop {
            match eventloop.poll().await {
                Ok(Event::Incoming(Packet::Publish(publish))) => {
                    if incoming_tx.send(publish).is_err() {
                        break;
                    }
                }
                Ok(Event::Outgoing(Outgoing::Publish(_))) => {
                    written_tx.send_modify(|written| *written += 1);
                }
                Ok(notification) => debug!("Received = {:?}", notification),
                Err(e) => {
                    // Stopping here closes both channels, which ends the
                    // message loop and any pending flush
                    error!("Error MQTT Event loop returned: {:?}", e);
                    break;
                }
            }
        }
    });

    (MqttPublisher { client, writes }, incoming_rx, handle)
}

#[async_trait]
impl CommandPublisher for MqttPublisher {
    async fn publish(&self, topic: &str, payload: Bytes) -> Result<(), DisplayDriverError> {
        self.client
            .publish_bytes(topic, QoS::AtMostOnce, false, payload)
            .await?;
        self.writes.issued();
        Ok(())
    }

    async fn flush(&self) -> Result<(), DisplayDriverError> {
        self.writes.drained().await
    }
}
