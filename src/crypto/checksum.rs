use super::aes::{checksum_sha_aes, AesSize};
use super::common::{compute_md5, hmac_md5};
use super::rc4::translate_key_usage;
use super::{KerberosCryptoError, KerberosCryptoResult};

/// [MS-PAC 2.8.1](https://learn.microsoft.com/en-us/openspecs/windows_protocols/ms-pac/6e95edd3-af93-41d4-8303-6c7955297315):
/// PAC signatures are computed with key usage KERB_NON_KERB_CKSUM_SALT.
pub const KERB_NON_KERB_CKSUM_SALT: i32 = 17;

//= [Assigned Numbers](https://datatracker.ietf.org/doc/html/rfc3961#section-8) and MS-PAC 2.8 =//
pub mod cksum_types {
    pub const HMAC_SHA1_96_AES128: u32 = 15;
    pub const HMAC_SHA1_96_AES256: u32 = 16;
    /// Microsoft-assigned negative identifier (-138) as it appears on the wire.
    pub const KERB_CHECKSUM_HMAC_MD5: u32 = 0xFFFF_FF76;
}

pub trait Checksum {
    fn checksum_type(&self) -> ChecksumSuite;
    fn checksum(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumSuite {
    HmacSha196Aes128,
    HmacSha196Aes256,
    HmacMd5,
}

impl ChecksumSuite {
    pub fn hasher(&self) -> Box<dyn Checksum> {
        match self {
            ChecksumSuite::HmacSha196Aes128 => Box::new(HmacSha196Aes128),
            ChecksumSuite::HmacSha196Aes256 => Box::new(HmacSha196Aes256),
            ChecksumSuite::HmacMd5 => Box::new(HmacMd5),
        }
    }
}

impl TryFrom<u32> for ChecksumSuite {
    type Error = KerberosCryptoError;

    fn try_from(identifier: u32) -> Result<Self, Self::Error> {
        match identifier {
            cksum_types::HMAC_SHA1_96_AES128 => Ok(Self::HmacSha196Aes128),
            cksum_types::HMAC_SHA1_96_AES256 => Ok(Self::HmacSha196Aes256),
            cksum_types::KERB_CHECKSUM_HMAC_MD5 => Ok(Self::HmacMd5),
            _ => Err(KerberosCryptoError::AlgorithmIdentifier(identifier)),
        }
    }
}

impl From<ChecksumSuite> for u32 {
    fn from(suite: ChecksumSuite) -> Self {
        match suite {
            ChecksumSuite::HmacSha196Aes128 => cksum_types::HMAC_SHA1_96_AES128,
            ChecksumSuite::HmacSha196Aes256 => cksum_types::HMAC_SHA1_96_AES256,
            ChecksumSuite::HmacMd5 => cksum_types::KERB_CHECKSUM_HMAC_MD5,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct HmacSha196Aes128;

impl Checksum for HmacSha196Aes128 {
    fn checksum_type(&self) -> ChecksumSuite {
        ChecksumSuite::HmacSha196Aes128
    }

    fn checksum(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        checksum_sha_aes(key, key_usage, payload, &AesSize::Aes128)
    }
}

#[derive(Debug, Default, Clone)]
pub struct HmacSha196Aes256;

impl Checksum for HmacSha196Aes256 {
    fn checksum_type(&self) -> ChecksumSuite {
        ChecksumSuite::HmacSha196Aes256
    }

    fn checksum(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        checksum_sha_aes(key, key_usage, payload, &AesSize::Aes256)
    }
}

/// [RFC 4757 4](https://datatracker.ietf.org/doc/html/rfc4757#section-4):
/// Ksign = HMAC-MD5(K, "signaturekey\0"); CHKSUM = HMAC-MD5(Ksign, MD5(T | data)).
#[derive(Debug, Default, Clone)]
pub struct HmacMd5;

impl Checksum for HmacMd5 {
    fn checksum_type(&self) -> ChecksumSuite {
        ChecksumSuite::HmacMd5
    }

    fn checksum(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        let ksign = hmac_md5(key, b"signaturekey\0")?;

        let mut to_digest = translate_key_usage(key_usage).to_le_bytes().to_vec();
        to_digest.extend_from_slice(payload);

        hmac_md5(&ksign, &compute_md5(&to_digest))
    }
}
