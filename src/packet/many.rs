use std::io::BufRead;
use std::iter::FusedIterator;

use log::{debug, warn};

use crate::errors::{IncompleteStreamSnafu, Result};
use crate::packet::single::{read_body, read_header};
use crate::packet::{Packet, ParserConfig, TrailingPartial};

/// Parses packets from the given reader, reassembling partial body chunks.
///
/// Only complete logical packets are yielded, in stream order. After the first
/// error the iterator is exhausted.
#[derive(Debug)]
pub struct PacketParser<R> {
    reader: R,
    config: ParserConfig,
    /// Fragments of the logical packet currently being assembled.
    pending: Option<Packet>,
    done: bool,
}

impl<R: BufRead> PacketParser<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ParserConfig::default())
    }

    pub fn with_config(reader: R, config: ParserConfig) -> Self {
        PacketParser {
            reader,
            config,
            pending: None,
            done: false,
        }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    fn next_logical(&mut self) -> Result<Option<Packet>> {
        loop {
            let Some((header, length)) = read_header(&mut self.reader)? else {
                return self.finish();
            };

            // the limit applies before any body byte is read
            if let Some(max) = self.config.max_body_len {
                let pending_len = self.pending.as_ref().map_or(0, |p| p.content().len());
                let total = pending_len.saturating_add(length.len() as usize);
                if total > max {
                    malformed_err!(
                        "packet body of {} bytes exceeds the limit of {}",
                        total,
                        max
                    );
                }
            }

            let packet = read_body(&mut self.reader, header, length)?;
            let packet = match self.pending.take() {
                Some(pending) => Packet::merge(&pending, &packet)?,
                None => packet,
            };

            if packet.is_partial() {
                debug!(
                    "pending partial {:?}, {} bytes so far",
                    packet.tag(),
                    packet.content().len()
                );
                self.pending = Some(packet);
                continue;
            }

            return Ok(Some(packet));
        }
    }

    fn finish(&mut self) -> Result<Option<Packet>> {
        if let Some(pending) = self.pending.take() {
            match self.config.trailing_partial {
                TrailingPartial::Drop => {
                    warn!(
                        "stream ended inside partial {:?}, dropping {} bytes",
                        pending.tag(),
                        pending.content().len()
                    );
                }
                TrailingPartial::Error => {
                    return IncompleteStreamSnafu { tag: pending.tag() }.fail();
                }
            }
        }

        Ok(None)
    }
}

impl<R: BufRead> Iterator for PacketParser<R> {
    type Item = Result<Packet>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_logical() {
            Ok(Some(packet)) => Some(Ok(packet)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<R: BufRead> FusedIterator for PacketParser<R> {}

/// Reads all packets from `reader`, handing each complete logical packet to `emit`.
///
/// Any error aborts the whole read, packets emitted before it stay emitted.
pub fn read_packets<R, F>(reader: R, emit: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(Packet),
{
    read_packets_with_config(reader, ParserConfig::default(), emit)
}

/// Like [`read_packets`], with explicit settings.
pub fn read_packets_with_config<R, F>(reader: R, config: ParserConfig, mut emit: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(Packet),
{
    for packet in PacketParser::with_config(reader, config) {
        emit(packet?);
    }

    Ok(())
}
