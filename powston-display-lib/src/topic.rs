use bytes::Bytes;
use serde::Deserialize;
use std::{fmt, marker::PhantomData};

pub trait Encode {
    fn encode(message: &Self) -> Bytes;
}

pub trait Decode {
    type Output;
    type DecodeError;

    fn decode<T: AsRef<[u8]>>(payload: T) -> Result<Self::Output, Self::DecodeError>;
}

/// An MQTT topic name bound to the message type carried on it.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Topic<M>(String, PhantomData<M>);

impl<M> Topic<M> {
    pub fn new(topic: impl Into<String>) -> Self {
        Self(topic.into(), PhantomData {})
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl<M> Topic<M>
where
    M: Encode,
{
    pub fn encode(&self, message: &M) -> Bytes {
        M::encode(message)
    }
}

impl<M> Topic<M>
where
    M: Decode,
{
    pub fn decode<T>(&self, payload: T) -> Result<M::Output, M::DecodeError>
    where
        T: AsRef<[u8]>,
    {
        M::decode(payload)
    }
}

// Inbound messages are JSON. Outbound display commands are plain text, so
// `Encode` is implemented per command type rather than through serde.
impl<M> Decode for M
where
    M: for<'a> Deserialize<'a>,
{
    type Output = Self;
    type DecodeError = serde_json::Error;

    fn decode<T: AsRef<[u8]>>(payload: T) -> Result<Self::Output, Self::DecodeError> {
        serde_json::from_slice(payload.as_ref())
    }
}

impl<T> fmt::Display for Topic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
