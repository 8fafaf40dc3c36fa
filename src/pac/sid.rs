use std::fmt;

use byteorder::{ByteOrder, LittleEndian};

use crate::{Error, ErrorKind, Result};

/// [MS-DTYP 2.4.2.2](https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-dtyp/78eb9013-1c3a-4970-ad1f-2b1dad588a25):
/// a SID carries at most 15 sub-authorities.
const MAX_SUB_AUTHORITY_COUNT: usize = 15;

/// A Windows security identifier in its fixed binary layout:
/// revision, sub-authority count, 6-byte big-endian identifier authority,
/// then little-endian 32-bit sub-authorities.
///
/// The canonical display form is `S-<revision>-<authority>-<sub1>-...-<subN>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacSid {
    revision: u8,
    identifier_authority: [u8; 6],
    sub_authorities: Vec<u32>,
}

impl PacSid {
    pub(crate) fn new(revision: u8, identifier_authority: [u8; 6], sub_authorities: Vec<u32>) -> Self {
        Self {
            revision,
            identifier_authority,
            sub_authorities,
        }
    }

    /// Decodes the fixed binary layout. The buffer must contain exactly the
    /// SID: 8 header bytes plus 4 bytes per sub-authority.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < 8 {
            return Err(Error::new(
                ErrorKind::MalformedSid,
                format!("SID buffer too short: {} bytes", data.len()),
            ));
        }

        let revision = data[0];
        let sub_authority_count = usize::from(data[1]);
        if sub_authority_count > MAX_SUB_AUTHORITY_COUNT {
            return Err(Error::new(
                ErrorKind::MalformedSid,
                format!("SID sub-authority count out of range: {}", sub_authority_count),
            ));
        }

        if data.len() != 8 + 4 * sub_authority_count {
            return Err(Error::new(
                ErrorKind::MalformedSid,
                format!(
                    "SID length mismatch: {} bytes for {} sub-authorities",
                    data.len(),
                    sub_authority_count
                ),
            ));
        }

        let mut identifier_authority = [0_u8; 6];
        identifier_authority.copy_from_slice(&data[2..8]);

        let sub_authorities = data[8..]
            .chunks_exact(4)
            .map(LittleEndian::read_u32)
            .collect();

        Ok(Self {
            revision,
            identifier_authority,
            sub_authorities,
        })
    }

    pub fn revision(&self) -> u8 {
        self.revision
    }

    /// The identifier authority as its 48-bit big-endian value.
    pub fn identifier_authority(&self) -> u64 {
        self.identifier_authority
            .iter()
            .fold(0_u64, |acc, byte| (acc << 8) | u64::from(*byte))
    }

    pub fn sub_authorities(&self) -> &[u32] {
        &self.sub_authorities
    }

    /// A copy of this SID with `relative_id` appended as the last
    /// sub-authority, turning a domain SID into a principal/group SID.
    pub fn with_relative_id(&self, relative_id: u32) -> PacSid {
        let mut sub_authorities = self.sub_authorities.clone();
        sub_authorities.push(relative_id);

        PacSid {
            revision: self.revision,
            identifier_authority: self.identifier_authority,
            sub_authorities,
        }
    }
}

impl fmt::Display for PacSid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}-{}", self.revision, self.identifier_authority())?;
        for sub_authority in &self.sub_authorities {
            write!(f, "-{}", sub_authority)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn parse_well_known_domain_sid() {
        // S-1-5-21-397955417-626881126-188441444 (from the MS-PAC reference vector)
        let data = [
            0x01, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x05, 0x15, 0x00, 0x00, 0x00, 89, 81, 184, 23, 102, 114, 93, 37,
            100, 99, 59, 11,
        ];

        let sid = PacSid::parse(&data).unwrap();

        assert_eq!(sid.revision(), 1);
        assert_eq!(sid.identifier_authority(), 5);
        assert_eq!(sid.sub_authorities(), [21, 397955417, 626881126, 188441444]);
        assert_eq!(sid.to_string(), "S-1-5-21-397955417-626881126-188441444");
    }

    #[test]
    fn relative_id_append() {
        let data = [
            0x01, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x05, 0x15, 0x00, 0x00, 0x00, 89, 81, 184, 23, 102, 114, 93, 37,
            100, 99, 59, 11,
        ];
        let domain = PacSid::parse(&data).unwrap();

        assert_eq!(
            domain.with_relative_id(513).to_string(),
            "S-1-5-21-397955417-626881126-188441444-513"
        );
    }

    #[test]
    fn zero_sub_authorities_renders_without_trailing_dash() {
        let sid = PacSid::parse(&[0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x05]).unwrap();

        assert_eq!(sid.to_string(), "S-1-5");
    }

    #[test]
    fn length_mismatch_is_malformed() {
        assert_eq!(PacSid::parse(&[0x01, 0x01]).unwrap_err().kind, ErrorKind::MalformedSid);
        // one sub-authority declared, two encoded
        let data = [0x01, 0x01, 0, 0, 0, 0, 0, 5, 1, 0, 0, 0, 2, 0, 0, 0];
        assert_eq!(PacSid::parse(&data).unwrap_err().kind, ErrorKind::MalformedSid);
        // count beyond the Windows bound
        let mut oversized = vec![0x01, 0x10, 0, 0, 0, 0, 0, 5];
        oversized.extend_from_slice(&[0_u8; 16 * 4]);
        assert_eq!(PacSid::parse(&oversized).unwrap_err().kind, ErrorKind::MalformedSid);
    }

    proptest! {
        #[test]
        fn canonical_form_for_valid_sub_authority_counts(
            revision in any::<u8>(),
            authority in 0_u64..(1 << 48),
            sub_authorities in proptest::collection::vec(any::<u32>(), 0..=15),
        ) {
            let mut data = vec![revision, sub_authorities.len() as u8];
            data.extend_from_slice(&authority.to_be_bytes()[2..]);
            for sub_authority in &sub_authorities {
                data.extend_from_slice(&sub_authority.to_le_bytes());
            }

            let sid = PacSid::parse(&data).unwrap();

            let mut expected = format!("S-{}-{}", revision, authority);
            for sub_authority in &sub_authorities {
                expected.push('-');
                expected.push_str(&sub_authority.to_string());
            }
            prop_assert_eq!(sid.to_string(), expected);
            prop_assert_eq!(sid.sub_authorities(), sub_authorities.as_slice());
        }
    }
}
