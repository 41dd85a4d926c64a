//! Incremental UTF-8 decoding for streamed response bodies.
//!
//! Transport chunks carry no semantic boundaries and can split a
//! multi-byte character across deliveries, so the decoder keeps the
//! incomplete trailing sequence between calls. Invalid sequences decode
//! to U+FFFD without aborting the stream.

/// Streaming UTF-8 decoder with partial multi-byte carry.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    pending: Vec<u8>,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the next transport chunk.
    ///
    /// Concatenating the outputs of successive `feed` calls over any
    /// chunking of a valid UTF-8 byte sequence yields the original text.
    pub fn feed(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let buf = std::mem::take(&mut self.pending);

        let mut out = String::with_capacity(buf.len());
        let mut offset = 0;
        while offset < buf.len() {
            match std::str::from_utf8(&buf[offset..]) {
                Ok(valid) => {
                    out.push_str(valid);
                    offset = buf.len();
                }
                Err(err) => {
                    let valid_end = offset + err.valid_up_to();
                    if let Ok(valid) = std::str::from_utf8(&buf[offset..valid_end]) {
                        out.push_str(valid);
                    }
                    match err.error_len() {
                        // Invalid bytes: substitute and keep going.
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            offset = valid_end + len;
                        }
                        // Incomplete trailing sequence: carry it into the
                        // next call.
                        None => {
                            self.pending.extend_from_slice(&buf[valid_end..]);
                            return out;
                        }
                    }
                }
            }
        }
        out
    }

    /// Flush at end-of-stream. A dangling partial sequence becomes U+FFFD.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            String::new()
        } else {
            self.pending.clear();
            char::REPLACEMENT_CHARACTER.to_string()
        }
    }
}
