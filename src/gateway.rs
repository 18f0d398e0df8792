//! Connection to the serial bridge that relays radio packets from the motes.
//!
//! A [`Gateway`] owns both halves of a byte stream. Outbound messages are
//! framed and written by [`Gateway::send`]; inbound frames are reassembled by
//! a delivery task (see [`Gateway::start`]) and handed to the listeners
//! registered for their message type.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::task::JoinHandle;
use tokio_serial::SerialPortBuilderExt;

use crate::config::READ_TIMEOUT;
use crate::error::GatewayError;
use crate::frame::{Frame, FrameRecorder};
use crate::message::Message;
use crate::source::Source;

const READ_BUFFER_SIZE: usize = 64;

/// Callback for inbound messages of one type.
///
/// Runs on the delivery task; implementations must return quickly and must
/// not register further listeners from inside the callback.
pub trait MessageListener<M: Message>: Send + Sync {
    fn message_received(&self, to: u16, message: M);
}

/// Decodes a payload and invokes one listener; `false` if the payload did not decode.
type Dispatch = Box<dyn Fn(u16, &[u8]) -> bool + Send + Sync>;
type Registry = Arc<RwLock<HashMap<u8, Vec<Dispatch>>>>;

type Reader = Box<dyn AsyncRead + Send + Unpin>;
type Writer = Box<dyn AsyncWrite + Send + Unpin>;

pub struct Gateway {
    writer: tokio::sync::Mutex<Writer>,
    reader: Mutex<Option<Reader>>,
    listeners: Registry,
}

impl Gateway {
    /// Opens the serial port named by `source`. Must be called within a tokio runtime.
    pub fn connect(source: &Source) -> Result<Self, GatewayError> {
        log::info!("Opening {}", source);
        let port = tokio_serial::new(source.device(), source.baud_rate())
            .timeout(READ_TIMEOUT)
            .open_native_async()?;
        Ok(Gateway::from_stream(port))
    }

    pub fn from_stream<S>(stream: S) -> Self
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (reader, writer) = tokio::io::split(stream);
        Gateway {
            writer: tokio::sync::Mutex::new(Box::new(writer)),
            reader: Mutex::new(Some(Box::new(reader))),
            listeners: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn register_listener<M: Message>(&self, listener: Arc<dyn MessageListener<M>>) {
        let dispatch: Dispatch = Box::new(move |to, payload| match M::decode(payload) {
            Some(message) => {
                listener.message_received(to, message);
                true
            }
            None => false,
        });
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(M::AM_TYPE)
            .or_default()
            .push(dispatch);
    }

    pub async fn send<M: Message>(&self, address: u16, message: &M) -> Result<(), GatewayError> {
        let frame = Frame::new(address, M::AM_TYPE, message.encode());
        let mut writer = self.writer.lock().await;
        writer.write_all(frame.encode().as_bytes()).await?;
        writer.flush().await?;
        Ok(())
    }

    /// Spawns the delivery task. It runs until the stream ends or fails.
    pub fn start(&self) -> Result<JoinHandle<()>, GatewayError> {
        let reader = self
            .reader
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(GatewayError::AlreadyStarted)?;
        let listeners = Arc::clone(&self.listeners);
        Ok(tokio::spawn(deliver(reader, listeners)))
    }
}

async fn deliver(mut reader: Reader, listeners: Registry) {
    let mut recorder = FrameRecorder::new();
    let mut buf = BytesMut::with_capacity(READ_BUFFER_SIZE);
    loop {
        buf.clear();
        match reader.read_buf(&mut buf).await {
            Ok(0) => {
                log::info!("Gateway stream closed");
                break;
            }
            Ok(_) => {
                for &b in buf.iter() {
                    if let Some(frame) = recorder.push(b) {
                        dispatch(&listeners, frame);
                    }
                }
            }
            Err(ref e) if e.kind() == ErrorKind::TimedOut => (),
            Err(e) => {
                log::error!("Gateway read failed: {}", e);
                break;
            }
        }
    }
}

fn dispatch(listeners: &Registry, frame: Frame) {
    let listeners = listeners.read().unwrap_or_else(PoisonError::into_inner);
    let Some(registered) = listeners.get(&frame.am_type) else {
        log::debug!("No listener for message type {}", frame.am_type);
        return;
    };
    for listener in registered {
        if !listener(frame.dest, &frame.payload) {
            log::warn!(
                "Dropping undecodable message of type {}: {:?}",
                frame.am_type,
                frame.payload
            );
        }
    }
}
