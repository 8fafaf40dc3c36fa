use bitflags::bitflags;

use super::sid::PacSid;
use crate::utils::bytes_to_utf16_string;
use crate::{Error, ErrorKind, Result};

bitflags! {
    /// UPN_DNS_INFO flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct UpnDnsFlags: u32 {
        /// The UPN was explicitly set on the account, as opposed to being
        /// synthesized by the KDC from the account name and DNS domain.
        const HAS_UPN = 0x1;
        /// The extended form carrying the SAM account name and SID is present.
        const HAS_SAM_NAME_AND_SID = 0x2;

        const _ = !0;
    }
}

/// The decoded UPN_DNS_INFO buffer.
///
/// [MS-PAC 2.10](https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-pac/1c0d6e11-6443-4846-b744-f9f810a504eb)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacUpnDnsInfo {
    pub upn: String,
    pub dns_domain_name: String,
    pub flags: UpnDnsFlags,
    /// Present when [UpnDnsFlags::HAS_SAM_NAME_AND_SID] is set.
    pub sam_name: Option<String>,
    /// Present when [UpnDnsFlags::HAS_SAM_NAME_AND_SID] is set.
    pub sid: Option<PacSid>,
}

impl PacUpnDnsInfo {
    /// Decodes the fixed header of `(length, offset)` pairs and resolves each
    /// string as a UTF-16LE substring at its declared offset.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let upn_length = read_u16(data, 0)?;
        let upn_offset = read_u16(data, 2)?;
        let dns_domain_name_length = read_u16(data, 4)?;
        let dns_domain_name_offset = read_u16(data, 6)?;
        let flags = UpnDnsFlags::from_bits_retain(read_u32(data, 8)?);

        let (sam_name, sid) = if flags.contains(UpnDnsFlags::HAS_SAM_NAME_AND_SID) {
            let sam_name_length = read_u16(data, 12)?;
            let sam_name_offset = read_u16(data, 14)?;
            let sid_length = read_u16(data, 16)?;
            let sid_offset = read_u16(data, 18)?;

            let sam_name = bytes_to_utf16_string(substring(data, sam_name_offset, sam_name_length)?);
            let sid = PacSid::parse(substring(data, sid_offset, sid_length)?)?;

            (Some(sam_name), Some(sid))
        } else {
            (None, None)
        };

        let upn = bytes_to_utf16_string(substring(data, upn_offset, upn_length)?);
        let dns_domain_name = bytes_to_utf16_string(substring(data, dns_domain_name_offset, dns_domain_name_length)?);

        Ok(Self {
            upn,
            dns_domain_name,
            flags,
            sam_name,
            sid,
        })
    }

    /// Whether the UPN was explicitly set on the account, as opposed to one
    /// the KDC synthesized from the account name and domain.
    pub fn has_upn(&self) -> bool {
        self.flags.contains(UpnDnsFlags::HAS_UPN)
    }
}

fn read_u16(data: &[u8], offset: usize) -> Result<u16> {
    let bytes = data
        .get(offset..offset + 2)
        .ok_or_else(|| Error::new(ErrorKind::MalformedUpnDnsInfo, "UPN_DNS_INFO header is truncated"))?;

    Ok(u16::from_le_bytes([bytes[0], bytes[1]]))
}

fn read_u32(data: &[u8], offset: usize) -> Result<u32> {
    let bytes = data
        .get(offset..offset + 4)
        .ok_or_else(|| Error::new(ErrorKind::MalformedUpnDnsInfo, "UPN_DNS_INFO header is truncated"))?;

    Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

fn substring(data: &[u8], offset: u16, length: u16) -> Result<&[u8]> {
    if length % 2 != 0 {
        return Err(Error::new(
            ErrorKind::MalformedUpnDnsInfo,
            format!("odd UTF-16 substring length: {}", length),
        ));
    }

    data.get(usize::from(offset)..usize::from(offset) + usize::from(length))
        .ok_or_else(|| {
            Error::new(
                ErrorKind::MalformedUpnDnsInfo,
                format!("substring (offset {}, length {}) lies outside the buffer", offset, length),
            )
        })
}
