//! Length-prefixed framing for persisted code streams.
//!
//! A stored stream is `<varint length><code bytes>` where the varint is
//! little-endian base-128: seven payload bits per byte, high bit set on
//! every byte except the last.

use std::io::{Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt};

use crate::codec::{ArithmeticCodec, Mode};
use crate::errors::FastAcError;

/// Writes `value` as a little-endian base-128 varint.
pub fn write_varint<W: Write>(dst: &mut W, mut value: u64) -> std::io::Result<()> {
    while value >= 0x80 {
        dst.write_u8((value as u8) | 0x80)?;
        value >>= 7;
    }
    dst.write_u8(value as u8)
}

/// Reads a little-endian base-128 varint.
pub fn read_varint<R: Read>(src: &mut R) -> Result<u64, FastAcError> {
    let mut value = 0u64;
    let mut shift = 0u32;
    loop {
        let byte = src.read_u8()?;
        value |= u64::from(byte & 0x7F) << shift;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
        shift += 7;
        if shift > 63 {
            return Err(FastAcError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "varint does not fit in 64 bits",
            )));
        }
    }
}

impl ArithmeticCodec<'_> {
    /// Stops the encoder and writes the framed stream to `dst`.
    ///
    /// Returns the number of code bytes (the varint's value).
    pub fn write_to<W: Write>(&mut self, dst: &mut W) -> Result<usize, FastAcError> {
        let code_bytes = self.stop_encoder()?;
        write_varint(dst, code_bytes as u64)?;
        dst.write_all(&self.buffer()[..code_bytes])?;
        Ok(code_bytes)
    }

    /// Reads a framed stream from `src` and starts the decoder on it.
    ///
    /// Returns the number of code bytes read. On any error the codec is
    /// left in [`Mode::Idle`].
    pub fn read_from<R: Read>(&mut self, src: &mut R) -> Result<usize, FastAcError> {
        self.check_mode(Mode::Idle)?;
        let length = read_varint(src)?;
        if length > self.capacity() as u64 {
            return Err(FastAcError::StreamTooLong {
                length,
                capacity: self.capacity(),
            });
        }
        let length = length as usize;
        src.read_exact(&mut self.buffer_mut()[..length])?;
        self.start_decoder()?;
        Ok(length)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    fn varint_bytes(value: u64) -> Vec<u8> {
        let mut bytes = Vec::new();
        write_varint(&mut bytes, value).unwrap();
        bytes
    }

    #[test]
    fn varint_boundaries() {
        assert_eq!(varint_bytes(0), vec![0x00]);
        assert_eq!(varint_bytes(1), vec![0x01]);
        assert_eq!(varint_bytes(127), vec![0x7F]);
        assert_eq!(varint_bytes(128), vec![0x80, 0x01]);
        assert_eq!(varint_bytes(16383), vec![0xFF, 0x7F]);
        assert_eq!(varint_bytes(16384), vec![0x80, 0x80, 0x01]);
        assert_eq!(varint_bytes(u64::max_value()).len(), 10);

        for value in &[0u64, 1, 127, 128, 300, 16383, 16384, 1 << 40, u64::max_value()] {
            let bytes = varint_bytes(*value);
            let decoded = read_varint(&mut Cursor::new(bytes)).unwrap();
            assert_eq!(decoded, *value);
        }
    }

    #[test]
    fn truncated_varint_is_an_io_error() {
        let mut src = Cursor::new(vec![0x80u8]);
        assert!(matches!(
            read_varint(&mut src),
            Err(FastAcError::IoError(_))
        ));
    }

    #[test]
    fn overlong_varint_is_rejected() {
        let mut src = Cursor::new(vec![0x80u8; 11]);
        assert!(matches!(
            read_varint(&mut src),
            Err(FastAcError::IoError(_))
        ));
    }

    #[test]
    fn oversized_stream_is_rejected() {
        let mut codec = ArithmeticCodec::new(16).unwrap();
        let mut frame = Vec::new();
        write_varint(&mut frame, 17).unwrap();
        frame.extend(std::iter::repeat(0u8).take(17));
        let result = codec.read_from(&mut Cursor::new(frame));
        assert!(matches!(result, Err(FastAcError::StreamTooLong { .. })));
        assert_eq!(codec.mode(), Mode::Idle);
    }

    #[test]
    fn short_stream_is_an_io_error() {
        let mut codec = ArithmeticCodec::new(16).unwrap();
        let mut frame = Vec::new();
        write_varint(&mut frame, 10).unwrap();
        frame.extend(std::iter::repeat(0u8).take(5));
        let result = codec.read_from(&mut Cursor::new(frame));
        assert!(matches!(result, Err(FastAcError::IoError(_))));
        assert_eq!(codec.mode(), Mode::Idle);
    }
}
