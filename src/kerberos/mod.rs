mod authorization_data;
mod mech_token;
mod ticket;

pub use authorization_data::{find_pac_data, AdEntry, AD_IF_RELEVANT, AD_WIN2K_PAC, MAX_AD_NESTING_DEPTH};
pub use mech_token::KerberosMechToken;
use picky_asn1::wrapper::IntegerAsn1;
pub use ticket::decrypt_ticket;

use crate::crypto::CipherSuite;
use crate::secret::Secret;

/// A candidate Kerberos key, as loaded by the caller from a keytab or a login
/// subject's private credentials. This crate never reads a keytab itself.
#[derive(Debug, Clone)]
pub struct KerberosKey {
    encryption_type: CipherSuite,
    key_version: Option<u32>,
    key: Secret<Vec<u8>>,
}

impl KerberosKey {
    pub fn new(encryption_type: CipherSuite, key_version: Option<u32>, key: Vec<u8>) -> Self {
        Self {
            encryption_type,
            key_version,
            key: Secret::new(key),
        }
    }

    pub fn encryption_type(&self) -> CipherSuite {
        self.encryption_type
    }

    pub fn key_version(&self) -> Option<u32> {
        self.key_version
    }

    pub fn key_bytes(&self) -> &[u8] {
        self.key.as_ref()
    }
}

/// Folds a big-endian ASN.1 INTEGER into a u32, tolerating leading zero
/// octets. Returns `None` for values that do not fit.
pub(crate) fn integer_as_u32(value: &IntegerAsn1) -> Option<u32> {
    let bytes = value.0.as_slice();
    let significant = match bytes.iter().position(|byte| *byte != 0) {
        Some(position) => &bytes[position..],
        None => return Some(0),
    };

    if significant.len() > 4 {
        return None;
    }

    Some(
        significant
            .iter()
            .fold(0_u32, |acc, byte| (acc << 8) | u32::from(*byte)),
    )
}
