use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use des::Des;
use rand::rngs::OsRng;
use rand::RngCore;

use super::common::compute_md5;
use super::{Cipher, CipherSuite, KerberosCryptoError, KerberosCryptoResult};

type DesCbcEncryptor = cbc::Encryptor<Des>;
type DesCbcDecryptor = cbc::Decryptor<Des>;

pub const DES_KEY_SIZE: usize = 8;
pub const DES_BLOCK_SIZE: usize = 8;

const DES_CONFOUNDER_SIZE: usize = 8;
const DES_MD5_CHECKSUM_SIZE: usize = 16;

/// The des-cbc-md5 encryption profile (etype 3).
///
/// [RFC 3961 6.2](https://datatracker.ietf.org/doc/html/rfc3961#section-6.2):
/// old-style layout `CBC(key, confounder | checksum | msg | pad)` with a plain
/// MD5 checksum computed over the plaintext with the checksum field zeroed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DesCbcMd5;

impl DesCbcMd5 {
    pub fn new() -> Self {
        Self
    }
}

impl Cipher for DesCbcMd5 {
    fn cipher_type(&self) -> CipherSuite {
        CipherSuite::DesCbcMd5
    }

    fn key_size(&self) -> usize {
        DES_KEY_SIZE
    }

    fn encrypt(&self, key: &[u8], _key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        let mut confounder = [0_u8; DES_CONFOUNDER_SIZE];
        OsRng.fill_bytes(&mut confounder);

        let unpadded_len = DES_CONFOUNDER_SIZE + DES_MD5_CHECKSUM_SIZE + payload.len();
        let padded_len = unpadded_len.div_ceil(DES_BLOCK_SIZE) * DES_BLOCK_SIZE;

        let mut plaintext = vec![0_u8; padded_len];
        plaintext[0..DES_CONFOUNDER_SIZE].copy_from_slice(&confounder);
        plaintext[DES_CONFOUNDER_SIZE + DES_MD5_CHECKSUM_SIZE..unpadded_len].copy_from_slice(payload);

        let checksum = compute_md5(&plaintext);
        plaintext[DES_CONFOUNDER_SIZE..DES_CONFOUNDER_SIZE + DES_MD5_CHECKSUM_SIZE].copy_from_slice(&checksum);

        encrypt_des_cbc(key, &plaintext)
    }

    fn decrypt(&self, key: &[u8], _key_usage: i32, cipher_data: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        let minimal_len = DES_CONFOUNDER_SIZE + DES_MD5_CHECKSUM_SIZE;
        if cipher_data.len() < minimal_len || cipher_data.len() % DES_BLOCK_SIZE != 0 {
            return Err(KerberosCryptoError::CipherLength(cipher_data.len(), minimal_len));
        }

        let plaintext = decrypt_des_cbc(key, cipher_data)?;

        let mut zeroed = plaintext.clone();
        zeroed[DES_CONFOUNDER_SIZE..DES_CONFOUNDER_SIZE + DES_MD5_CHECKSUM_SIZE].fill(0);

        if compute_md5(&zeroed) != plaintext[DES_CONFOUNDER_SIZE..DES_CONFOUNDER_SIZE + DES_MD5_CHECKSUM_SIZE] {
            return Err(KerberosCryptoError::IntegrityCheck);
        }

        // the message keeps its zero padding: the DER content inside is self-delimiting
        Ok(plaintext[DES_CONFOUNDER_SIZE + DES_MD5_CHECKSUM_SIZE..].to_vec())
    }
}

fn encrypt_des_cbc(key: &[u8], plaintext: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
    // RFC 3961: initial cipher state      All bits zero
    let iv = [0_u8; DES_BLOCK_SIZE];
    let cipher = DesCbcEncryptor::new_from_slices(key, &iv)
        .map_err(|_| KerberosCryptoError::KeyLength(key.len(), DES_KEY_SIZE))?;

    let mut payload = plaintext.to_vec();
    let payload_len = payload.len();
    cipher
        .encrypt_padded_mut::<NoPadding>(&mut payload, payload_len)
        .map_err(|err| KerberosCryptoError::CipherError(format!("des-cbc encryption failed: {}", err)))?;

    Ok(payload)
}

fn decrypt_des_cbc(key: &[u8], cipher_data: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
    let iv = [0_u8; DES_BLOCK_SIZE];
    let cipher = DesCbcDecryptor::new_from_slices(key, &iv)
        .map_err(|_| KerberosCryptoError::KeyLength(key.len(), DES_KEY_SIZE))?;

    let mut payload = cipher_data.to_vec();
    cipher
        .decrypt_padded_mut::<NoPadding>(&mut payload)
        .map_err(|err| KerberosCryptoError::CipherError(format!("des-cbc decryption failed: {}", err)))?;

    Ok(payload)
}
