use aes::{Aes128, Aes256};
use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockEncryptMut, KeyIvInit};
use rand::rngs::OsRng;
use rand::RngCore;

use super::{encryption_checksum_sha_aes, swap_two_last_blocks, AesSize, AES_BLOCK_SIZE};
use crate::crypto::utils::usage_ke;
use crate::crypto::{KerberosCryptoError, KerberosCryptoResult};

use super::derive_key;

type Aes256CbcEncryptor = cbc::Encryptor<Aes256>;
type Aes128CbcEncryptor = cbc::Encryptor<Aes128>;

//= [Cryptosystem Profile Based on Simplified Profile](https://datatracker.ietf.org/doc/html/rfc3961#section-5.3) =//
pub(crate) fn encrypt_message(
    key: &[u8],
    key_usage: i32,
    payload: &[u8],
    aes_size: &AesSize,
) -> KerberosCryptoResult<Vec<u8>> {
    let mut confounder = [0_u8; AES_BLOCK_SIZE];
    OsRng.fill_bytes(&mut confounder);

    encrypt_message_with_confounder(key, key_usage, payload, aes_size, confounder)
}

pub(crate) fn encrypt_message_with_confounder(
    key: &[u8],
    key_usage: i32,
    payload: &[u8],
    aes_size: &AesSize,
    // conf = Random string of length c
    confounder: [u8; AES_BLOCK_SIZE],
) -> KerberosCryptoResult<Vec<u8>> {
    if key.len() != aes_size.key_length() {
        return Err(KerberosCryptoError::KeyLength(key.len(), aes_size.key_length()));
    }

    let mut data_to_encrypt = vec![0_u8; AES_BLOCK_SIZE + payload.len()];

    let (confounder_buf, payload_buf) = data_to_encrypt.split_at_mut(AES_BLOCK_SIZE);
    confounder_buf.copy_from_slice(&confounder);
    payload_buf.copy_from_slice(payload);

    let ke = derive_key(key, &usage_ke(key_usage), aes_size)?;
    // (C1, newIV) = E(Ke, conf | plaintext | pad, oldstate.ivec)
    let mut encrypted = encrypt_aes_cts(&ke, &data_to_encrypt, aes_size)?;

    // ciphertext = C1 | H1[1..h]
    let hmac = encryption_checksum_sha_aes(key, key_usage, &data_to_encrypt, aes_size)?;
    encrypted.extend_from_slice(&hmac);

    Ok(encrypted)
}

pub(crate) fn encrypt_aes_cbc(key: &[u8], plaintext: &[u8], aes_size: &AesSize) -> KerberosCryptoResult<Vec<u8>> {
    if plaintext.len() % AES_BLOCK_SIZE != 0 {
        return Err(KerberosCryptoError::CipherLength(plaintext.len(), AES_BLOCK_SIZE));
    }

    let iv = [0_u8; AES_BLOCK_SIZE];

    let mut payload = plaintext.to_vec();
    let payload_len = payload.len();

    match aes_size {
        AesSize::Aes256 => {
            let cipher = Aes256CbcEncryptor::new_from_slices(key, &iv)
                .map_err(|_| KerberosCryptoError::KeyLength(key.len(), aes_size.key_length()))?;
            cipher
                .encrypt_padded_mut::<NoPadding>(&mut payload, payload_len)
                .map_err(|err| KerberosCryptoError::CipherError(format!("aes-cbc encryption failed: {}", err)))?;
        }
        AesSize::Aes128 => {
            let cipher = Aes128CbcEncryptor::new_from_slices(key, &iv)
                .map_err(|_| KerberosCryptoError::KeyLength(key.len(), aes_size.key_length()))?;
            cipher
                .encrypt_padded_mut::<NoPadding>(&mut payload, payload_len)
                .map_err(|err| KerberosCryptoError::CipherError(format!("aes-cbc encryption failed: {}", err)))?;
        }
    }

    Ok(payload)
}

//= [CTS using CBC](https://en.wikipedia.org/wiki/Ciphertext_stealing#CBC_ciphertext_stealing_encryption_using_a_standard_CBC_interface) =//
pub(crate) fn encrypt_aes_cts(key: &[u8], payload: &[u8], aes_size: &AesSize) -> KerberosCryptoResult<Vec<u8>> {
    let pad_length = (AES_BLOCK_SIZE - (payload.len() % AES_BLOCK_SIZE)) % AES_BLOCK_SIZE;

    let mut padded_payload = payload.to_vec();
    padded_payload.resize(padded_payload.len() + pad_length, 0);

    let mut cipher = encrypt_aes_cbc(key, &padded_payload, aes_size)?;

    if cipher.len() <= AES_BLOCK_SIZE {
        return Ok(cipher);
    }

    if cipher.len() >= 2 * AES_BLOCK_SIZE {
        swap_two_last_blocks(&mut cipher)?;
    }

    cipher.resize(payload.len(), 0);

    Ok(cipher)
}
