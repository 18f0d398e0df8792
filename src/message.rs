/// A typed message carried in the payload of a [`Frame`](crate::frame::Frame).
pub trait Message: Sized + Send + 'static {
    /// Active message type the frame is tagged with
    const AM_TYPE: u8;

    fn decode(payload: &[u8]) -> Option<Self>;

    fn encode(&self) -> Vec<u8>;
}

/// State change reported by a mote: its id and whether it went on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateMessage {
    pub id: u8,
    pub state: u8,
}

impl Message for StateMessage {
    const AM_TYPE: u8 = 0x93;

    fn decode(payload: &[u8]) -> Option<Self> {
        match payload {
            [id, state, ..] => Some(StateMessage {
                id: *id,
                state: *state,
            }),
            _ => None,
        }
    }

    fn encode(&self) -> Vec<u8> {
        vec![self.id, self.state]
    }
}

/// Test packet understood by the TestSerial mote application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TestMessage {
    pub counter: u16,
}

impl Message for TestMessage {
    const AM_TYPE: u8 = 0x89;

    fn decode(payload: &[u8]) -> Option<Self> {
        let bytes: [u8; 2] = payload.get(..2)?.try_into().ok()?;
        Some(TestMessage {
            counter: u16::from_be_bytes(bytes),
        })
    }

    fn encode(&self) -> Vec<u8> {
        self.counter.to_be_bytes().to_vec()
    }
}
