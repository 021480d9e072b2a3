use std::io::BufRead;

use bytes::{Bytes, BytesMut};

use crate::errors::{Result, TruncatedStreamSnafu};

/// Reading helpers on top of [`BufRead`], reporting short reads as
/// [`Error::TruncatedStream`](crate::errors::Error::TruncatedStream).
pub trait BufReadParsing: BufRead + Sized {
    fn read_u8(&mut self) -> Result<u8> {
        let arr = self.read_array::<1>()?;
        Ok(arr[0])
    }

    fn read_be_u16(&mut self) -> Result<u16> {
        let arr = self.read_array::<2>()?;

        Ok(u16::from_be_bytes(arr))
    }

    fn read_be_u32(&mut self) -> Result<u32> {
        let arr = self.read_array::<4>()?;

        Ok(u32::from_be_bytes(arr))
    }

    /// Returns `false` once the underlying reader is exhausted.
    fn has_remaining(&mut self) -> Result<bool> {
        let has_remaining = !self.fill_buf()?.is_empty();
        Ok(has_remaining)
    }

    fn read_array<const C: usize>(&mut self) -> Result<[u8; C]> {
        let mut arr = [0u8; C];
        let mut read = 0;

        while read < arr.len() {
            let buf = self.fill_buf()?;
            if buf.is_empty() {
                break;
            }

            let available = (arr.len() - read).min(buf.len());
            arr[read..read + available].copy_from_slice(&buf[..available]);
            read += available;
            self.consume(available);
        }

        if read != arr.len() {
            return TruncatedStreamSnafu {
                needed: C,
                remaining: read,
            }
            .fail();
        }

        Ok(arr)
    }

    /// Reads exactly `size` bytes.
    fn take_bytes(&mut self, size: usize) -> Result<Bytes> {
        // Do not allocate everything upfront, only as data is actually available
        // to avoid OOM due to buggy sizes.
        let mut arr = BytesMut::with_capacity(size.min(1024));

        while arr.len() < size {
            let buf = self.fill_buf()?;
            if buf.is_empty() {
                break;
            }

            let available = (size - arr.len()).min(buf.len());
            arr.extend_from_slice(&buf[..available]);
            self.consume(available);
        }

        if arr.len() != size {
            return TruncatedStreamSnafu {
                needed: size,
                remaining: arr.len(),
            }
            .fail();
        }

        Ok(arr.freeze())
    }
}

impl<B: BufRead> BufReadParsing for B {}
