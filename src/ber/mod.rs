
use std::io;

use byteorder::{BigEndian, ReadBytesExt};
#[cfg(test)]
use byteorder::WriteBytesExt;

#[repr(u8)]
pub(crate) enum Pc {
    Primitive = 0x00,
    Construct = 0x20,
}

#[repr(u8)]
enum Class {
    Universal = 0x00,
    Application = 0x40,
    ContextSpecific = 0x80,
}

#[repr(u8)]
enum Tag {
    BitString = 0x03,
    OctetString = 0x04,
    ObjectIdentifier = 0x06,
    Sequence = 0x10,
}

const TAG_MASK: u8 = 0x1F;

pub(crate) fn sizeof_length(length: u16) -> u16 {
    if length > 0xff {
        3
    } else if length > 0x7f {
        2
    } else {
        1
    }
}

#[cfg(test)]
pub(crate) fn write_sequence_tag(mut stream: impl io::Write, length: u16) -> io::Result<usize> {
    write_universal_tag(&mut stream, Tag::Sequence, Pc::Construct)?;
    write_length(stream, length).map(|length| length + 1)
}

pub(crate) fn read_sequence_tag(mut stream: impl io::Read) -> io::Result<u16> {
    let identifier = stream.read_u8()?;

    if identifier != Class::Universal as u8 | Pc::Construct as u8 | (TAG_MASK & Tag::Sequence as u8) {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "invalid sequence tag identifier",
        ))
    } else {
        read_length(stream)
    }
}

#[cfg(test)]
pub(crate) fn write_contextual_tag(mut stream: impl io::Write, tagnum: u8, length: u16, pc: Pc) -> io::Result<usize> {
    let identifier = Class::ContextSpecific as u8 | pc as u8 | (TAG_MASK & tagnum);
    stream.write_u8(identifier)?;

    write_length(stream, length).map(|length| length + 1)
}

pub(crate) fn read_contextual_tag(mut stream: impl io::Read, tagnum: u8, pc: Pc) -> io::Result<u16> {
    let identifier = stream.read_u8()?;

    if identifier != Class::ContextSpecific as u8 | pc as u8 | (TAG_MASK & tagnum) {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "invalid contextual tag identifier",
        ))
    } else {
        read_length(stream)
    }
}

#[cfg(test)]
pub(crate) fn write_application_tag(mut stream: impl io::Write, tagnum: u8, length: u16) -> io::Result<usize> {
    let identifier = Class::Application as u8 | Pc::Construct as u8 | (TAG_MASK & tagnum);
    stream.write_u8(identifier)?;

    write_length(stream, length).map(|length| length + 1)
}

pub(crate) fn read_application_tag(mut stream: impl io::Read, tagnum: u8) -> io::Result<u16> {
    let identifier = stream.read_u8()?;

    if identifier != Class::Application as u8 | Pc::Construct as u8 | (TAG_MASK & tagnum) {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "invalid application tag identifier",
        ))
    } else {
        read_length(stream)
    }
}

#[cfg(test)]
pub(crate) fn write_octet_string(mut stream: impl io::Write, value: &[u8]) -> io::Result<usize> {
    let tag_size = write_octet_string_tag(&mut stream, value.len() as u16)?;
    stream.write_all(value)?;
    Ok(tag_size + value.len())
}

#[cfg(test)]
pub(crate) fn write_octet_string_tag(mut stream: impl io::Write, length: u16) -> io::Result<usize> {
    write_universal_tag(&mut stream, Tag::OctetString, Pc::Primitive)?;
    write_length(&mut stream, length).map(|length| length + 1)
}

pub(crate) fn read_octet_string_tag(mut stream: impl io::Read) -> io::Result<u16> {
    read_universal_tag(&mut stream, Tag::OctetString, Pc::Primitive)?;
    read_length(stream)
}

pub(crate) fn read_octet_string(mut stream: impl io::Read) -> io::Result<Vec<u8>> {
    let length = read_octet_string_tag(&mut stream)?;

    let mut value = vec![0x00; usize::from(length)];
    stream.read_exact(&mut value)?;

    Ok(value)
}

/// Writes an OBJECT IDENTIFIER tag around already-encoded OID value bytes.
#[cfg(test)]
pub(crate) fn write_oid(mut stream: impl io::Write, value: &[u8]) -> io::Result<usize> {
    write_universal_tag(&mut stream, Tag::ObjectIdentifier, Pc::Primitive)?;
    let length_size = write_length(&mut stream, value.len() as u16)?;
    stream.write_all(value)?;

    Ok(1 + length_size + value.len())
}

/// Reads an OBJECT IDENTIFIER and returns its raw encoded value bytes.
pub(crate) fn read_oid(mut stream: impl io::Read) -> io::Result<Vec<u8>> {
    read_universal_tag(&mut stream, Tag::ObjectIdentifier, Pc::Primitive)?;
    let length = read_length(&mut stream)?;

    let mut value = vec![0x00; usize::from(length)];
    stream.read_exact(&mut value)?;

    Ok(value)
}

#[cfg(test)]
pub(crate) fn write_bit_string(mut stream: impl io::Write, unused_bits: u8, value: &[u8]) -> io::Result<usize> {
    write_universal_tag(&mut stream, Tag::BitString, Pc::Primitive)?;
    let length_size = write_length(&mut stream, value.len() as u16 + 1)?;
    stream.write_u8(unused_bits)?;
    stream.write_all(value)?;

    Ok(1 + length_size + 1 + value.len())
}

/// Reads a primitive BIT STRING and returns its content bytes
/// (the leading unused-bits octet is consumed and dropped).
pub(crate) fn read_bit_string(mut stream: impl io::Read) -> io::Result<Vec<u8>> {
    read_universal_tag(&mut stream, Tag::BitString, Pc::Primitive)?;
    let length = read_length(&mut stream)?;

    if length == 0 {
        return Err(io::Error::new(io::ErrorKind::InvalidData, "empty bit string"));
    }

    let _unused_bits = stream.read_u8()?;
    let mut value = vec![0x00; usize::from(length) - 1];
    stream.read_exact(&mut value)?;

    Ok(value)
}

#[cfg(test)]
fn write_universal_tag(mut stream: impl io::Write, tag: Tag, pc: Pc) -> io::Result<usize> {
    let identifier = Class::Universal as u8 | pc as u8 | (TAG_MASK & tag as u8);
    stream.write_u8(identifier)?;

    Ok(1)
}

fn read_universal_tag(mut stream: impl io::Read, tag: Tag, pc: Pc) -> io::Result<()> {
    let identifier = stream.read_u8()?;

    if identifier != Class::Universal as u8 | pc as u8 | (TAG_MASK & tag as u8) {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "invalid universal tag identifier",
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn write_length(mut stream: impl io::Write, length: u16) -> io::Result<usize> {
    if length > 0xFF {
        stream.write_u8(0x80 ^ 0x2)?;
        stream.write_u16::<BigEndian>(length)?;

        Ok(3)
    } else if length > 0x7F {
        stream.write_u8(0x80 ^ 0x1)?;
        stream.write_u8(length as u8)?;

        Ok(2)
    } else {
        stream.write_u8(length as u8)?;

        Ok(1)
    }
}

pub(crate) fn read_length(mut stream: impl io::Read) -> io::Result<u16> {
    let byte = stream.read_u8()?;

    if byte & 0x80 != 0 {
        let len = byte & !0x80;

        if len == 1 {
            stream.read_u8().map(u16::from)
        } else if len == 2 {
            let length = stream.read_u16::<BigEndian>()?;

            // u16 should be capable to hold the ASN1 structure length
            // this condition checks that length is not too big for the u16 type
            if length > u16::MAX - 1 /* tag byte */ - sizeof_length(length) {
                return Err(io::Error::new(io::ErrorKind::InvalidData, "the length is too big"));
            }

            Ok(length)
        } else {
            Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "invalid length of the length",
            ))
        }
    } else {
        Ok(u16::from(byte))
    }
}
