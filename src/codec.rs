use bytes::{Buf, BytesMut};
use std::io;
use tokio_util::codec::Decoder;

/// Re-encodes a byte stream in some legacy charset into UTF-8 chunks.
pub struct Utf8Transcoder {
    decoder: encoding_rs::Decoder,
    scratch: Vec<u8>,
    // encoding_rs decoders must not be fed again once flushed with `last`
    finished: bool,
}

impl Utf8Transcoder {
    pub fn new(encoding: &'static encoding_rs::Encoding) -> Self {
        Self {
            decoder: encoding.new_decoder(),
            scratch: Vec::new(),
            finished: false,
        }
    }

    fn transcode(&mut self, src: &mut BytesMut, last: bool) -> Option<BytesMut> {
        let needed = self
            .decoder
            .max_utf8_buffer_length(src.len())
            .unwrap_or(src.len() * 3 + 16);
        self.scratch.resize(needed, 0);

        let (_result, read, written, _replaced) =
            self.decoder.decode_to_utf8(src, &mut self.scratch, last);
        src.advance(read);

        (written > 0).then(|| BytesMut::from(&self.scratch[..written]))
    }
}

impl Decoder for Utf8Transcoder {
    type Item = BytesMut;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }
        Ok(self.transcode(src, false))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if self.finished {
            buf.clear();
            return Ok(None);
        }
        let out = self.transcode(buf, true);
        self.finished = true;
        buf.clear();
        Ok(out)
    }
}

/// Splits a byte stream on `\n` without requiring valid UTF-8.
///
/// Yielded lines exclude the newline; a trailing `\r` is left in place for the
/// field trimmer to remove.
#[derive(Debug, Default)]
pub struct RawLineCodec {
    // bytes already searched for a newline in the pending buffer
    scanned: usize,
}

impl RawLineCodec {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Decoder for RawLineCodec {
    type Item = BytesMut;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match src[self.scanned..].iter().position(|&b| b == b'\n') {
            Some(off) => {
                let end = self.scanned + off;
                self.scanned = 0;
                let mut line = src.split_to(end + 1);
                line.truncate(end);
                Ok(Some(line))
            }
            None => {
                self.scanned = src.len();
                Ok(None)
            }
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if let Some(line) = self.decode(buf)? {
            return Ok(Some(line));
        }
        self.scanned = 0;
        if buf.is_empty() {
            Ok(None)
        } else {
            Ok(Some(buf.split()))
        }
    }
}
