mod client_info;
mod logon_info;
mod ndr;
mod sid;
mod upn_dns;

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};
pub use client_info::PacClientInfo;
pub use logon_info::{PacLogonInfo, UserFlags};
pub use sid::PacSid;
use time::OffsetDateTime;
use tracing::instrument;
pub use upn_dns::{PacUpnDnsInfo, UpnDnsFlags};

use crate::crypto::{Checksum, ChecksumSuite, KERB_NON_KERB_CKSUM_SALT};
use crate::kerberos::KerberosKey;
use crate::{Error, ErrorKind, Result};

/// [MS-PAC 2.4](https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-pac/3341cfa2-6ef5-42e0-b7bc-4544884bf399)
/// PAC_INFO_BUFFER ulType values this crate decodes further.
pub mod buffer_types {
    pub const LOGON_INFO: u32 = 1;
    pub const SERVER_CHECKSUM: u32 = 6;
    pub const PRIVSVR_CHECKSUM: u32 = 7;
    pub const CLIENT_INFO: u32 = 10;
    pub const UPN_DNS_INFO: u32 = 12;
}

const PAC_VERSION: u32 = 0;
/// ulType (4) + cbBufferSize (4) + Offset (8)
const PAC_INFO_BUFFER_SIZE: usize = 16;

/// How strictly [Pac::verify_signatures] treats the PRIVSVR (KDC) checksum.
///
/// The server checksum is always verified. The KDC checksum can only be
/// verified by a party holding the KDC key, which a regular service does not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChecksumPolicy {
    /// Verify the KDC checksum when a KDC key is supplied, skip it otherwise.
    #[default]
    IgnoreMissingKdcKey,
    /// Fail verification when no KDC key is supplied.
    RequireKdcKey,
}

/// One entry of the PAC buffer directory with its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacBuffer {
    buffer_type: u32,
    offset: u64,
    data: Vec<u8>,
}

impl PacBuffer {
    pub fn buffer_type(&self) -> u32 {
        self.buffer_type
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// A PAC signature buffer: algorithm identifier plus signature bytes.
///
/// [MS-PAC 2.8](https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-pac/6e95edd3-af93-41d4-8303-6c7955297315)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacSignature {
    pub checksum_type: u32,
    pub signature: Vec<u8>,
}

impl PacSignature {
    fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 4 {
            return Err(Error::new(ErrorKind::MalformedPac, "signature buffer is truncated"));
        }

        let checksum_type = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let signature_len = match ChecksumSuite::try_from(checksum_type) {
            Ok(ChecksumSuite::HmacMd5) => 16,
            Ok(ChecksumSuite::HmacSha196Aes128) | Ok(ChecksumSuite::HmacSha196Aes256) => 12,
            // unknown algorithm: keep everything after the type opaque
            Err(_) => data.len() - 4,
        };

        let signature = data
            .get(4..4 + signature_len)
            .ok_or_else(|| Error::new(ErrorKind::MalformedPac, "signature buffer is truncated"))?
            .to_vec();

        Ok(Self {
            checksum_type,
            signature,
        })
    }
}

/// The PAC buffer directory located in a ticket's authorization data.
///
/// Layout per [MS-PAC 2.3](https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-pac/6655b92f-ab06-490b-845d-037e6987275f):
/// `cBuffers: u32, Version: u32` followed by `cBuffers` PAC_INFO_BUFFER
/// entries of `(ulType: u32, cbBufferSize: u32, Offset: u64)`, all
/// little-endian, with the payloads at their declared offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pac {
    raw: Vec<u8>,
    buffers: Vec<PacBuffer>,
}

impl Pac {
    #[instrument(level = "trace", skip_all)]
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut stream = Cursor::new(data);

        let buffer_count = stream
            .read_u32::<LittleEndian>()
            .map_err(|_| Error::new(ErrorKind::MalformedPac, "PAC header is truncated"))?;
        let version = stream
            .read_u32::<LittleEndian>()
            .map_err(|_| Error::new(ErrorKind::MalformedPac, "PAC header is truncated"))?;

        if version != PAC_VERSION {
            return Err(Error::new(
                ErrorKind::InvalidPacVersion,
                format!("PAC version must be {} but got {}", PAC_VERSION, version),
            ));
        }

        if u64::from(buffer_count) * PAC_INFO_BUFFER_SIZE as u64 > (data.len() as u64).saturating_sub(8) {
            return Err(Error::new(
                ErrorKind::MalformedPac,
                format!("PAC directory announces {} buffers but the buffer is too small", buffer_count),
            ));
        }

        let mut buffers = Vec::with_capacity(buffer_count as usize);
        for index in 0..buffer_count {
            let buffer_type = stream.read_u32::<LittleEndian>().map_err(|_| directory_truncated(index))?;
            let buffer_size = stream.read_u32::<LittleEndian>().map_err(|_| directory_truncated(index))?;
            let offset = stream.read_u64::<LittleEndian>().map_err(|_| directory_truncated(index))?;

            let start = usize::try_from(offset)
                .map_err(|_| buffer_out_of_range(index, offset, buffer_size))?;
            let end = start
                .checked_add(buffer_size as usize)
                .filter(|end| *end <= data.len())
                .ok_or_else(|| buffer_out_of_range(index, offset, buffer_size))?;

            buffers.push(PacBuffer {
                buffer_type,
                offset,
                data: data[start..end].to_vec(),
            });
        }

        Ok(Self {
            raw: data.to_vec(),
            buffers,
        })
    }

    pub fn buffers(&self) -> &[PacBuffer] {
        &self.buffers
    }

    /// The first directory entry of the given type.
    pub fn buffer(&self, buffer_type: u32) -> Option<&PacBuffer> {
        self.buffers.iter().find(|buffer| buffer.buffer_type == buffer_type)
    }

    pub fn logon_info(&self) -> Result<Option<PacLogonInfo>> {
        self.buffer(buffer_types::LOGON_INFO)
            .map(|buffer| PacLogonInfo::parse(&buffer.data))
            .transpose()
    }

    pub fn upn_dns_info(&self) -> Result<Option<PacUpnDnsInfo>> {
        self.buffer(buffer_types::UPN_DNS_INFO)
            .map(|buffer| PacUpnDnsInfo::parse(&buffer.data))
            .transpose()
    }

    pub fn client_info(&self) -> Result<Option<PacClientInfo>> {
        self.buffer(buffer_types::CLIENT_INFO)
            .map(|buffer| PacClientInfo::parse(&buffer.data))
            .transpose()
    }

    pub fn server_checksum(&self) -> Result<Option<PacSignature>> {
        self.buffer(buffer_types::SERVER_CHECKSUM)
            .map(|buffer| PacSignature::parse(&buffer.data))
            .transpose()
    }

    pub fn kdc_checksum(&self) -> Result<Option<PacSignature>> {
        self.buffer(buffer_types::PRIVSVR_CHECKSUM)
            .map(|buffer| PacSignature::parse(&buffer.data))
            .transpose()
    }

    /// Verifies the PAC signatures: recomputes each checksum over the full
    /// PAC with both signature fields zeroed.
    ///
    /// The server checksum is keyed by the service key that decrypted the
    /// ticket and any mismatch is fatal. The KDC checksum is verified when
    /// `kdc_key` is supplied; `policy` decides whether its absence is
    /// tolerated.
    #[instrument(level = "trace", skip_all)]
    pub fn verify_signatures(
        &self,
        server_key: &KerberosKey,
        kdc_key: Option<&KerberosKey>,
        policy: ChecksumPolicy,
    ) -> Result<()> {
        let server_signature = self
            .server_checksum()?
            .ok_or_else(|| Error::new(ErrorKind::MalformedPac, "PAC carries no server checksum buffer"))?;
        let kdc_signature = self.kdc_checksum()?;

        let zeroed = self.with_zeroed_signatures(&server_signature, kdc_signature.as_ref());

        self.verify_one(&server_signature, server_key, &zeroed, "server")?;

        match (kdc_key, &kdc_signature) {
            (Some(key), Some(signature)) => self.verify_one(signature, key, &zeroed, "KDC"),
            (Some(_), None) => Err(Error::new(
                ErrorKind::PacChecksumMismatch,
                "PAC carries no KDC checksum buffer",
            )),
            (None, _) => match policy {
                ChecksumPolicy::IgnoreMissingKdcKey => Ok(()),
                ChecksumPolicy::RequireKdcKey => Err(Error::new(
                    ErrorKind::PacChecksumMismatch,
                    "KDC checksum verification requires the KDC key",
                )),
            },
        }
    }

    fn verify_one(&self, signature: &PacSignature, key: &KerberosKey, zeroed: &[u8], role: &str) -> Result<()> {
        let suite = ChecksumSuite::try_from(signature.checksum_type).map_err(|_| {
            Error::new(
                ErrorKind::PacChecksumMismatch,
                format!("unsupported {} checksum algorithm: {:#x}", role, signature.checksum_type),
            )
        })?;

        let calculated = suite
            .hasher()
            .checksum(key.key_bytes(), KERB_NON_KERB_CKSUM_SALT, zeroed)
            .map_err(|err| {
                Error::new(
                    ErrorKind::PacChecksumMismatch,
                    format!("cannot compute {} checksum: {}", role, err),
                )
            })?;

        if calculated != signature.signature {
            return Err(Error::new(
                ErrorKind::PacChecksumMismatch,
                format!("{} checksum does not match", role),
            ));
        }

        Ok(())
    }

    /// A copy of the raw PAC with the signature bytes of both checksum
    /// buffers zeroed, as MS-PAC prescribes for signature computation.
    fn with_zeroed_signatures(&self, server: &PacSignature, kdc: Option<&PacSignature>) -> Vec<u8> {
        let mut zeroed = self.raw.clone();

        let mut zero = |buffer_type: u32, signature_len: usize| {
            if let Some(buffer) = self.buffer(buffer_type) {
                let start = buffer.offset as usize + 4;
                zeroed[start..start + signature_len].fill(0);
            }
        };

        zero(buffer_types::SERVER_CHECKSUM, server.signature.len());
        if let Some(kdc) = kdc {
            zero(buffer_types::PRIVSVR_CHECKSUM, kdc.signature.len());
        }

        zeroed
    }
}

const FILETIME_NEVER: u64 = 0x7FFF_FFFF_FFFF_FFFF;
/// 100ns intervals between 1601-01-01 and the Unix epoch.
const FILETIME_UNIX_EPOCH: i128 = 116_444_736_000_000_000;

/// Converts a Windows FILETIME to a date; zero and the "never" sentinel map
/// to `None`.
pub(crate) fn filetime_to_date(filetime: u64) -> Option<OffsetDateTime> {
    if filetime == 0 || filetime == FILETIME_NEVER {
        return None;
    }

    OffsetDateTime::from_unix_timestamp_nanos((i128::from(filetime) - FILETIME_UNIX_EPOCH) * 100).ok()
}

fn directory_truncated(index: u32) -> Error {
    Error::new(
        ErrorKind::MalformedPac,
        format!("PAC directory entry {} is truncated", index),
    )
}

fn buffer_out_of_range(index: u32, offset: u64, length: u32) -> Error {
    Error::new(
        ErrorKind::MalformedPac,
        format!(
            "PAC buffer {} (offset {}, length {}) lies outside the PAC",
            index, offset, length
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory_entry(buffer_type: u32, size: u32, offset: u64) -> Vec<u8> {
        let mut entry = Vec::new();
        entry.extend_from_slice(&buffer_type.to_le_bytes());
        entry.extend_from_slice(&size.to_le_bytes());
        entry.extend_from_slice(&offset.to_le_bytes());
        entry
    }

    #[test]
    fn parse_minimal_directory() {
        let mut data = Vec::new();
        data.extend_from_slice(&1_u32.to_le_bytes());
        data.extend_from_slice(&0_u32.to_le_bytes());
        data.extend_from_slice(&directory_entry(99, 4, 24));
        data.extend_from_slice(&[0xAA, 0xBB, 0xCC, 0xDD]);

        let pac = Pac::parse(&data).unwrap();

        assert_eq!(pac.buffers().len(), 1);
        assert_eq!(pac.buffer(99).unwrap().data(), [0xAA, 0xBB, 0xCC, 0xDD]);
        assert_eq!(pac.buffer(buffer_types::LOGON_INFO), None);
    }

    #[test]
    fn nonzero_version_is_rejected() {
        let mut data = Vec::new();
        data.extend_from_slice(&0_u32.to_le_bytes());
        data.extend_from_slice(&1_u32.to_le_bytes());

        let err = Pac::parse(&data).unwrap_err();

        assert_eq!(err.kind, ErrorKind::InvalidPacVersion);
    }

    #[test]
    fn buffer_overrunning_the_pac_is_rejected() {
        let mut data = Vec::new();
        data.extend_from_slice(&1_u32.to_le_bytes());
        data.extend_from_slice(&0_u32.to_le_bytes());
        data.extend_from_slice(&directory_entry(1, 16, 24));

        let err = Pac::parse(&data).unwrap_err();

        assert_eq!(err.kind, ErrorKind::MalformedPac);
    }

    #[test]
    fn oversized_directory_count_is_rejected() {
        let mut data = Vec::new();
        data.extend_from_slice(&u32::MAX.to_le_bytes());
        data.extend_from_slice(&0_u32.to_le_bytes());

        let err = Pac::parse(&data).unwrap_err();

        assert_eq!(err.kind, ErrorKind::MalformedPac);
    }

    #[test]
    fn truncated_header_is_rejected() {
        assert_eq!(Pac::parse(&[0x04, 0x00]).unwrap_err().kind, ErrorKind::MalformedPac);
    }

    #[test]
    fn filetime_sentinels_map_to_none() {
        assert_eq!(filetime_to_date(0), None);
        assert_eq!(filetime_to_date(FILETIME_NEVER), None);

        // 2006-05-08 (from the MS-PAC reference vector's logon time)
        let date = filetime_to_date(0x01C66A650F6686D1).unwrap();
        assert_eq!(date.year(), 2006);
    }
}
