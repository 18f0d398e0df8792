//! Line framing spoken by the serial bridge.
//!
//! Inbound frames look like `OK <dest> <am_type> <byte> <byte> ...\r\n`,
//! outbound frames like `SEND <dest> <am_type> <byte> ...\r\n`. Everything
//! between frames (boot banners, debug prints of the bridge firmware) is
//! skipped by the recorder.

use std::fmt::Write;

const ACTIVATE: &[u8] = b"OK ";
const TERMINATE: &[u8] = b"\r\n";
const SEND_PREFIX: &str = "SEND";
/// Longest body kept before a line is given up as noise
pub const MAX_BODY_LEN: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub dest: u16,
    pub am_type: u8,
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn new(dest: u16, am_type: u8, payload: Vec<u8>) -> Self {
        Frame {
            dest,
            am_type,
            payload,
        }
    }

    /// Parses the body of a recorded line, i.e. without prefix and terminator.
    pub fn parse(body: &str) -> Option<Self> {
        let mut fields = body.split_whitespace();
        let dest: u16 = fields.next()?.parse().ok()?;
        let am_type: u8 = fields.next()?.parse().ok()?;
        let payload = fields
            .map(|f| f.parse::<u8>().ok())
            .collect::<Option<Vec<u8>>>()?;

        Some(Frame {
            dest,
            am_type,
            payload,
        })
    }

    /// Renders the outbound form, terminator included.
    pub fn encode(&self) -> String {
        let mut line = format!("{} {} {}", SEND_PREFIX, self.dest, self.am_type);
        for b in &self.payload {
            // writing into a String cannot fail
            let _ = write!(line, " {}", b);
        }
        line.push_str("\r\n");
        line
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameRecorderState {
    NotRecording,
    /// Number of activation bytes matched so far
    Activating(usize),
    Recording,
    /// Number of terminator bytes matched so far
    Terminating(usize),
}

/// Reassembles frames from a byte stream, one byte at a time.
pub struct FrameRecorder {
    buffer: Vec<u8>,
    state: FrameRecorderState,
}

impl Default for FrameRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameRecorder {
    pub fn new() -> Self {
        FrameRecorder {
            buffer: Vec::new(),
            state: FrameRecorderState::NotRecording,
        }
    }

    pub fn push(&mut self, byte: u8) -> Option<Frame> {
        match self.state {
            FrameRecorderState::NotRecording => {
                if byte == ACTIVATE[0] {
                    self.state = FrameRecorderState::Activating(1);
                }
                None
            }
            FrameRecorderState::Activating(matched) => {
                if byte == ACTIVATE[matched] {
                    self.state = if matched + 1 == ACTIVATE.len() {
                        FrameRecorderState::Recording
                    } else {
                        FrameRecorderState::Activating(matched + 1)
                    };
                } else if byte == ACTIVATE[0] {
                    self.state = FrameRecorderState::Activating(1);
                } else {
                    self.state = FrameRecorderState::NotRecording;
                }
                None
            }
            FrameRecorderState::Recording => {
                if byte == TERMINATE[0] {
                    self.state = FrameRecorderState::Terminating(1);
                } else {
                    self.buffer.push(byte);
                    self.drop_if_overlong();
                }
                None
            }
            FrameRecorderState::Terminating(matched) => {
                if byte == TERMINATE[matched] {
                    if matched + 1 == TERMINATE.len() {
                        self.state = FrameRecorderState::NotRecording;
                        return self.finish();
                    }
                    self.state = FrameRecorderState::Terminating(matched + 1);
                } else {
                    // false alarm, keep what looked like a terminator
                    self.buffer.extend_from_slice(&TERMINATE[..matched]);
                    if byte == TERMINATE[0] {
                        self.state = FrameRecorderState::Terminating(1);
                    } else {
                        self.buffer.push(byte);
                        self.state = FrameRecorderState::Recording;
                    }
                    self.drop_if_overlong();
                }
                None
            }
        }
    }

    fn drop_if_overlong(&mut self) {
        if self.buffer.len() > MAX_BODY_LEN {
            log::debug!("Dropping line longer than {} bytes", MAX_BODY_LEN);
            self.buffer.clear();
            self.state = FrameRecorderState::NotRecording;
        }
    }

    fn finish(&mut self) -> Option<Frame> {
        let body = std::mem::take(&mut self.buffer);
        let body = std::str::from_utf8(&body).ok()?;
        let frame = Frame::parse(body);
        if frame.is_none() {
            log::debug!("Dropping malformed frame {:?}", body);
        }
        frame
    }
}

#[cfg(test)]
mod test {
    use super::{Frame, FrameRecorder, MAX_BODY_LEN};

    fn record(data: &[&str]) -> Vec<Frame> {
        let mut recorder = FrameRecorder::new();
        data.iter()
            .flat_map(|s| s.bytes())
            .filter_map(|b| recorder.push(b))
            .collect()
    }

    #[test]
    fn test_frame_construction() {
        let data = [
            "OK 0 147 0 1\r\nOK 0 147 1 1\r\nOK 0 147 0 0\r\nOK 0 1",
            "OK 0 ",
            "\n[BaseStation ready (serial 115200)",
            "]\r\n",
            "OK 0 147 1 ",
            "0\r\n",
            "OOK 0 147 0 1\r\n",
            "OK 65535 137 0 0\r\n",
        ];

        let res = record(&data);

        let expect = [
            Frame::new(0, 147, vec![0, 1]),
            Frame::new(0, 147, vec![1, 1]),
            Frame::new(0, 147, vec![0, 0]),
            Frame::new(0, 147, vec![1, 0]),
            Frame::new(0, 147, vec![0, 1]),
            Frame::new(65535, 137, vec![0, 0]),
        ];
        assert_eq!(res, expect);
    }

    #[test]
    fn test_malformed_lines_are_dropped() {
        let data = [
            "OK 0\r\n",
            "OK 0 147 300\r\n",
            "OK zero 147 1 1\r\n",
            "OK 70000 147 1 1\r\n",
            "OK 0 147 1 1\r\n",
        ];
        assert_eq!(record(&data), vec![Frame::new(0, 147, vec![1, 1])]);
    }

    #[test]
    fn test_lone_carriage_return_stays_in_body() {
        // '\r' without '\n' becomes whitespace inside the body
        let res = record(&["OK 0 147\r1 1\r\n"]);
        assert_eq!(res, vec![Frame::new(0, 147, vec![1, 1])]);
    }

    #[test]
    fn test_unterminated_line_is_dropped() {
        let noise = "1 ".repeat(MAX_BODY_LEN);
        let mut recorder = FrameRecorder::new();
        let res: Vec<Frame> = ["OK ", noise.as_str(), "OK 0 147 1 1\r\n"]
            .iter()
            .flat_map(|s| s.bytes())
            .filter_map(|b| recorder.push(b))
            .collect();

        assert!(recorder.buffer.len() <= MAX_BODY_LEN);
        assert_eq!(res, vec![Frame::new(0, 147, vec![1, 1])]);
    }

    #[test]
    fn test_encode() {
        let frame = Frame::new(0, 137, vec![0, 0]);
        assert_eq!(frame.encode(), "SEND 0 137 0 0\r\n");
        assert_eq!(Frame::new(3, 9, vec![]).encode(), "SEND 3 9\r\n");
    }
}
