//! Big-endian primitive readers and writers shared by both codecs.
//!
//! Every read checks the remaining length first, so a short buffer surfaces as
//! [`CodecError::TruncatedPayload`] and never as a panic.

use solana_program::pubkey::Pubkey;

use crate::error::{CodecError, Result};

/// Forward-only cursor over an encoded payload.
pub(crate) struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub(crate) fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or(CodecError::TruncatedPayload {
            needed: usize::MAX,
            available: self.buf.len(),
        })?;
        if end > self.buf.len() {
            return Err(CodecError::TruncatedPayload {
                needed: end,
                available: self.buf.len(),
            });
        }
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub(crate) fn take_rest(&mut self) -> &'a [u8] {
        let slice = &self.buf[self.pos..];
        self.pos = self.buf.len();
        slice
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16> {
        let bytes = self.take(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    pub(crate) fn read_bytes32(&mut self) -> Result<[u8; 32]> {
        let mut out = [0u8; 32];
        out.copy_from_slice(self.take(32)?);
        Ok(out)
    }

    pub(crate) fn read_pubkey(&mut self) -> Result<Pubkey> {
        Ok(Pubkey::new_from_array(self.read_bytes32()?))
    }
}

pub(crate) fn write_u16(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

pub(crate) fn write_pubkey(out: &mut Vec<u8>, pubkey: &Pubkey) {
    out.extend_from_slice(pubkey.as_ref());
}

/// Narrows a length to the u16 used by both wire formats.
pub(crate) fn checked_u16(field: &'static str, len: usize) -> Result<u16> {
    u16::try_from(len).map_err(|_| CodecError::FieldOverflow {
        field,
        len,
        max: u16::MAX as usize,
    })
}
