use picky_krb::data_types::{AuthorizationData, EncTicketPart};

use super::integer_as_u32;
use crate::{Error, ErrorKind, Result};

/// [RFC 4120 5.2.6.1](https://www.rfc-editor.org/rfc/rfc4120#section-5.2.6.1)
pub const AD_IF_RELEVANT: u32 = 1;
/// [MS-PAC 2.1](https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-pac/6655b92f-ab06-490b-845d-037e6987275f)
pub const AD_WIN2K_PAC: u32 = 128;

/// Bound on AD-IF-RELEVANT nesting. Well-formed tickets wrap the PAC exactly
/// once; anything deeper than this is treated as malformed input.
pub const MAX_AD_NESTING_DEPTH: usize = 8;

/// A single ticket authorization-data entry, with AD-IF-RELEVANT wrappers
/// decoded into their nested entry lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdEntry {
    IfRelevant(Vec<AdEntry>),
    Win2kPac(Vec<u8>),
    Other { ad_type: u32, data: Vec<u8> },
}

impl AdEntry {
    /// Decodes an authorization-data list, recursing into AD-IF-RELEVANT
    /// wrappers up to [MAX_AD_NESTING_DEPTH].
    pub fn parse_list(authorization_data: &AuthorizationData) -> Result<Vec<AdEntry>> {
        parse_nested(authorization_data, 0)
    }
}

fn parse_nested(authorization_data: &AuthorizationData, depth: usize) -> Result<Vec<AdEntry>> {
    if depth >= MAX_AD_NESTING_DEPTH {
        return Err(Error::new(
            ErrorKind::MalformedKerberosToken,
            format!("authorization data nested deeper than {} levels", MAX_AD_NESTING_DEPTH),
        ));
    }

    authorization_data
        .0
        .iter()
        .map(|entry| {
            let ad_type = integer_as_u32(&entry.ad_type.0).ok_or_else(|| {
                Error::new(
                    ErrorKind::MalformedKerberosToken,
                    "authorization data entry type out of range",
                )
            })?;
            let data = &entry.ad_data.0 .0;

            match ad_type {
                AD_IF_RELEVANT => {
                    let nested: AuthorizationData = picky_asn1_der::from_bytes(data).map_err(|err| {
                        Error::new(
                            ErrorKind::MalformedKerberosToken,
                            format!("invalid nested authorization data: {:?}", err),
                        )
                    })?;

                    Ok(AdEntry::IfRelevant(parse_nested(&nested, depth + 1)?))
                }
                AD_WIN2K_PAC => Ok(AdEntry::Win2kPac(data.clone())),
                ad_type => Ok(AdEntry::Other {
                    ad_type,
                    data: data.clone(),
                }),
            }
        })
        .collect()
}

/// Walks the decrypted ticket's authorization data and returns the first PAC
/// buffer found at any nesting level, or `None` when the ticket carries none.
pub fn find_pac_data(enc_part: &EncTicketPart) -> Result<Option<Vec<u8>>> {
    let authorization_data = match enc_part.0.authorization_data.0.as_ref() {
        Some(authorization_data) => &authorization_data.0,
        None => return Ok(None),
    };

    let entries = AdEntry::parse_list(authorization_data)?;

    Ok(first_pac(&entries))
}

fn first_pac(entries: &[AdEntry]) -> Option<Vec<u8>> {
    for entry in entries {
        match entry {
            AdEntry::Win2kPac(data) => return Some(data.clone()),
            AdEntry::IfRelevant(nested) => {
                if let Some(data) = first_pac(nested) {
                    return Some(data);
                }
            }
            AdEntry::Other { .. } => {}
        }
    }

    None
}
