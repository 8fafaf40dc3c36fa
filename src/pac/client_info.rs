use time::OffsetDateTime;

use super::filetime_to_date;
use super::ndr::NdrReader;
use crate::utils::bytes_to_utf16_string;
use crate::{ErrorKind, Result};

/// The decoded PAC_CLIENT_INFO buffer: the client identity the ticket was
/// issued for, used by KDCs to verify the PAC is not detached.
///
/// [MS-PAC 2.7](https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-pac/e465cb27-4bc1-4173-8be0-b5fd64dc9ff7)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacClientInfo {
    pub client_id: Option<OffsetDateTime>,
    pub name: String,
}

impl PacClientInfo {
    pub fn parse(data: &[u8]) -> Result<Self> {
        // PAC_CLIENT_INFO is plain little-endian, no NDR prologue
        let mut reader = NdrReader::new(data, ErrorKind::MalformedClientInfo);

        let client_id = filetime_to_date(reader.read_u64()?);
        let name_length = reader.read_u16()?;
        if name_length % 2 != 0 {
            return Err(reader.fail(format!("odd client name length: {}", name_length)));
        }

        let mut name_bytes = vec![0_u8; usize::from(name_length)];
        reader.read_exact(&mut name_bytes)?;

        Ok(Self {
            client_id,
            name: bytes_to_utf16_string(&name_bytes),
        })
    }
}
