pub(crate) mod decrypt;
pub(crate) mod encrypt;
mod key_derivation;

use super::common::hmac_sha1;
use super::utils::{usage_kc, usage_ki};
use super::{Cipher, CipherSuite, KerberosCryptoError, KerberosCryptoResult};

use decrypt::decrypt_message;
use encrypt::encrypt_message;
pub(crate) use key_derivation::derive_key;

/// [Kerberos Algorithm Profile Parameters](https://www.rfc-editor.org/rfc/rfc3962.html#section-6)
/// cipher block size 16 octets
pub const AES_BLOCK_SIZE: usize = 16;
/// [Kerberos Algorithm Profile Parameters](https://www.rfc-editor.org/rfc/rfc3962.html#section-6)
/// HMAC output size = 12 octets
pub const AES_MAC_SIZE: usize = 12;

/// [Assigned Numbers](https://www.rfc-editor.org/rfc/rfc3962.html#section-7)
pub const AES128_KEY_SIZE: usize = 128 / 8;
pub const AES256_KEY_SIZE: usize = 256 / 8;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AesSize {
    Aes256,
    Aes128,
}

impl AesSize {
    pub fn key_length(&self) -> usize {
        match self {
            AesSize::Aes256 => AES256_KEY_SIZE,
            AesSize::Aes128 => AES128_KEY_SIZE,
        }
    }

    pub fn block_bit_len(&self) -> usize {
        AES_BLOCK_SIZE * 8
    }
}

pub(crate) fn swap_two_last_blocks(data: &mut [u8]) -> KerberosCryptoResult<()> {
    if data.len() < AES_BLOCK_SIZE * 2 {
        return Err(KerberosCryptoError::CipherLength(data.len(), AES_BLOCK_SIZE * 2));
    }

    let len = data.len();

    for i in 0..AES_BLOCK_SIZE {
        data.swap(i + len - 2 * AES_BLOCK_SIZE, i + len - AES_BLOCK_SIZE)
    }

    Ok(())
}

/// [Checksum Profiles Based on Simplified Profile](https://datatracker.ietf.org/doc/html/rfc3961#section-5.4):
/// HMAC-SHA1-96 keyed with Kc.
pub(crate) fn checksum_sha_aes(
    key: &[u8],
    key_usage: i32,
    payload: &[u8],
    aes_size: &AesSize,
) -> KerberosCryptoResult<Vec<u8>> {
    let kc = derive_key(key, &usage_kc(key_usage), aes_size)?;

    hmac_sha1(&kc, payload, AES_MAC_SIZE)
}

/// [Encryption checksum](https://datatracker.ietf.org/doc/html/rfc3961#section-5.3):
/// HMAC-SHA1-96 keyed with Ki, used by the decrypt integrity check.
pub(crate) fn encryption_checksum_sha_aes(
    key: &[u8],
    key_usage: i32,
    payload: &[u8],
    aes_size: &AesSize,
) -> KerberosCryptoResult<Vec<u8>> {
    let ki = derive_key(key, &usage_ki(key_usage), aes_size)?;

    hmac_sha1(&ki, payload, AES_MAC_SIZE)
}

/// The aes128-cts-hmac-sha1-96 encryption profile (etype 17).
///
/// [RFC 3962](https://www.rfc-editor.org/rfc/rfc3962.html)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Aes128CtsHmacSha196;

impl Aes128CtsHmacSha196 {
    pub fn new() -> Self {
        Self
    }
}

impl Cipher for Aes128CtsHmacSha196 {
    fn cipher_type(&self) -> CipherSuite {
        CipherSuite::Aes128CtsHmacSha196
    }

    fn key_size(&self) -> usize {
        AES128_KEY_SIZE
    }

    fn encrypt(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        encrypt_message(key, key_usage, payload, &AesSize::Aes128)
    }

    fn decrypt(&self, key: &[u8], key_usage: i32, cipher_data: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        decrypt_message(key, key_usage, cipher_data, &AesSize::Aes128)
    }
}

/// The aes256-cts-hmac-sha1-96 encryption profile (etype 18).
///
/// [RFC 3962](https://www.rfc-editor.org/rfc/rfc3962.html)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Aes256CtsHmacSha196;

impl Aes256CtsHmacSha196 {
    pub fn new() -> Self {
        Self
    }
}

impl Cipher for Aes256CtsHmacSha196 {
    fn cipher_type(&self) -> CipherSuite {
        CipherSuite::Aes256CtsHmacSha196
    }

    fn key_size(&self) -> usize {
        AES256_KEY_SIZE
    }

    fn encrypt(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        encrypt_message(key, key_usage, payload, &AesSize::Aes256)
    }

    fn decrypt(&self, key: &[u8], key_usage: i32, cipher_data: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        decrypt_message(key, key_usage, cipher_data, &AesSize::Aes256)
    }
}
