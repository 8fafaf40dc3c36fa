use super::aes::{Aes128CtsHmacSha196, Aes256CtsHmacSha196};
use super::des::DesCbcMd5;
use super::etypes::{AES128_CTS_HMAC_SHA1_96, AES256_CTS_HMAC_SHA1_96, DES_CBC_MD5, RC4_HMAC};
use super::rc4::Rc4HmacMd5;
use super::{KerberosCryptoError, KerberosCryptoResult};

/// A Kerberos encryption profile over a raw protocol key.
///
/// [Encryption and Checksum Specifications for Kerberos 5](https://datatracker.ietf.org/doc/html/rfc3961)
pub trait Cipher {
    fn cipher_type(&self) -> CipherSuite;
    fn key_size(&self) -> usize;

    fn encrypt(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>>;
    fn decrypt(&self, key: &[u8], key_usage: i32, cipher_data: &[u8]) -> KerberosCryptoResult<Vec<u8>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherSuite {
    DesCbcMd5,
    Aes128CtsHmacSha196,
    Aes256CtsHmacSha196,
    Rc4HmacMd5,
}

impl CipherSuite {
    pub fn cipher(&self) -> Box<dyn Cipher> {
        match self {
            CipherSuite::DesCbcMd5 => Box::new(DesCbcMd5::new()),
            CipherSuite::Aes128CtsHmacSha196 => Box::new(Aes128CtsHmacSha196::new()),
            CipherSuite::Aes256CtsHmacSha196 => Box::new(Aes256CtsHmacSha196::new()),
            CipherSuite::Rc4HmacMd5 => Box::new(Rc4HmacMd5::new()),
        }
    }
}

impl TryFrom<&[u8]> for CipherSuite {
    type Error = KerberosCryptoError;

    fn try_from(identifier: &[u8]) -> Result<Self, Self::Error> {
        if identifier.len() != 1 {
            return Err(KerberosCryptoError::AlgorithmIdentifierData(identifier.into()));
        }

        CipherSuite::try_from(identifier[0])
    }
}

impl TryFrom<u8> for CipherSuite {
    type Error = KerberosCryptoError;

    fn try_from(identifier: u8) -> Result<Self, Self::Error> {
        match identifier {
            DES_CBC_MD5 => Ok(Self::DesCbcMd5),
            AES128_CTS_HMAC_SHA1_96 => Ok(Self::Aes128CtsHmacSha196),
            AES256_CTS_HMAC_SHA1_96 => Ok(Self::Aes256CtsHmacSha196),
            RC4_HMAC => Ok(Self::Rc4HmacMd5),
            _ => Err(KerberosCryptoError::AlgorithmIdentifier(u32::from(identifier))),
        }
    }
}

impl From<CipherSuite> for u8 {
    fn from(cipher: CipherSuite) -> Self {
        match cipher {
            CipherSuite::DesCbcMd5 => DES_CBC_MD5,
            CipherSuite::Aes128CtsHmacSha196 => AES128_CTS_HMAC_SHA1_96,
            CipherSuite::Aes256CtsHmacSha196 => AES256_CTS_HMAC_SHA1_96,
            CipherSuite::Rc4HmacMd5 => RC4_HMAC,
        }
    }
}

impl From<&CipherSuite> for u8 {
    fn from(cipher: &CipherSuite) -> Self {
        u8::from(*cipher)
    }
}
