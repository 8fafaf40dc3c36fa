use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use super::sid::PacSid;
use crate::utils::bytes_to_utf16_string;
use crate::{Error, ErrorKind, Result};

/// Size of the NDR stream prologue in front of a marshaled PAC structure:
/// the RPC common type header (8), the private header (8) and the top-level
/// referent id (4).
pub(crate) const NDR_PROLOGUE_SIZE: usize = 20;

/// An RPC_UNICODE_STRING header: the character data lives behind a deferred
/// referent and is resolved by [NdrReader::read_deferred_string] once the
/// whole fixed part has been consumed.
#[derive(Debug, Clone, Copy)]
pub(crate) struct UnicodeStringDescriptor {
    pub(crate) length: u16,
    #[allow(dead_code)]
    pub(crate) maximum_length: u16,
    pub(crate) pointer: u32,
}

impl UnicodeStringDescriptor {
    pub(crate) fn is_present(&self) -> bool {
        self.pointer != 0
    }
}

/// Little-endian cursor over one NDR-marshaled buffer.
///
/// NDR lays variable-size data out as deferred referents after the fixed part
/// of the enclosing structure, so decoding is two passes: read the fixed part
/// recording descriptors, then resolve each referent in declaration order.
pub(crate) struct NdrReader<'data> {
    stream: Cursor<&'data [u8]>,
    kind: ErrorKind,
}

impl<'data> NdrReader<'data> {
    pub(crate) fn new(data: &'data [u8], kind: ErrorKind) -> Self {
        Self {
            stream: Cursor::new(data),
            kind,
        }
    }

    pub(crate) fn skip_prologue(&mut self) -> Result<()> {
        self.skip(NDR_PROLOGUE_SIZE)
    }

    pub(crate) fn remaining(&self) -> usize {
        self.stream.get_ref().len() - self.stream.position() as usize
    }

    pub(crate) fn skip(&mut self, count: usize) -> Result<()> {
        if self.remaining() < count {
            return Err(self.fail(format!("cannot skip {} bytes: buffer exhausted", count)));
        }

        self.stream.set_position(self.stream.position() + count as u64);

        Ok(())
    }

    /// Aligns the cursor up to the next 4-byte NDR boundary.
    pub(crate) fn align4(&mut self) -> Result<()> {
        let misalignment = (self.stream.position() % 4) as usize;
        if misalignment != 0 {
            self.skip(4 - misalignment)?;
        }

        Ok(())
    }

    pub(crate) fn read_u16(&mut self) -> Result<u16> {
        self.stream
            .read_u16::<LittleEndian>()
            .map_err(|_| self.fail("unexpected end of buffer reading u16"))
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32> {
        self.stream
            .read_u32::<LittleEndian>()
            .map_err(|_| self.fail("unexpected end of buffer reading u32"))
    }

    pub(crate) fn read_u64(&mut self) -> Result<u64> {
        self.stream
            .read_u64::<LittleEndian>()
            .map_err(|_| self.fail("unexpected end of buffer reading u64"))
    }

    pub(crate) fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.stream
            .read_exact(buf)
            .map_err(|_| self.fail(format!("unexpected end of buffer reading {} bytes", buf.len())))
    }

    pub(crate) fn read_unicode_string_descriptor(&mut self) -> Result<UnicodeStringDescriptor> {
        Ok(UnicodeStringDescriptor {
            length: self.read_u16()?,
            maximum_length: self.read_u16()?,
            pointer: self.read_u32()?,
        })
    }

    /// Resolves a deferred string referent: a conformant varying UTF-16LE
    /// array `(maximumCount, offset, actualCount, chars...)`.
    pub(crate) fn read_deferred_string(&mut self, descriptor: &UnicodeStringDescriptor) -> Result<String> {
        self.align4()?;

        let _maximum_count = self.read_u32()?;
        let _offset = self.read_u32()?;
        let actual_count = self.read_u32()?;

        if u64::from(actual_count) * 2 != u64::from(descriptor.length) {
            return Err(self.fail(format!(
                "string referent length mismatch: header says {} bytes, referent carries {} characters",
                descriptor.length, actual_count
            )));
        }

        let byte_len = actual_count as usize * 2;
        if self.remaining() < byte_len {
            return Err(self.fail("string referent overruns the buffer"));
        }

        let mut bytes = vec![0_u8; byte_len];
        self.read_exact(&mut bytes)?;

        Ok(bytes_to_utf16_string(&bytes))
    }

    /// Reads an NDR-marshaled SID: the conformant array count, then the SID
    /// itself with its own embedded sub-authority count.
    pub(crate) fn read_sid(&mut self) -> Result<PacSid> {
        self.align4()?;

        let conformant_count = self.read_u32()?;

        let mut header = [0_u8; 8];
        self.read_exact(&mut header)?;

        let revision = header[0];
        let sub_authority_count = header[1];
        if u32::from(sub_authority_count) != conformant_count {
            return Err(self.fail(format!(
                "SID sub-authority count ({}) differs from its conformant array count ({})",
                sub_authority_count, conformant_count
            )));
        }

        let mut identifier_authority = [0_u8; 6];
        identifier_authority.copy_from_slice(&header[2..8]);

        let mut sub_authorities = Vec::with_capacity(usize::from(sub_authority_count));
        for _ in 0..sub_authority_count {
            sub_authorities.push(self.read_u32()?);
        }

        Ok(PacSid::new(revision, identifier_authority, sub_authorities))
    }

    pub(crate) fn fail(&self, description: impl Into<String>) -> Error {
        Error::new(self.kind, description)
    }
}
