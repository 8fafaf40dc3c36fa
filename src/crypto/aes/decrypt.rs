use aes::{Aes128, Aes256};
use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockDecryptMut, KeyIvInit};

use super::{encryption_checksum_sha_aes, swap_two_last_blocks, AesSize, AES_BLOCK_SIZE, AES_MAC_SIZE};
use crate::crypto::utils::usage_ke;
use crate::crypto::{KerberosCryptoError, KerberosCryptoResult};

use super::derive_key;

type Aes256CbcDecryptor = cbc::Decryptor<Aes256>;
type Aes128CbcDecryptor = cbc::Decryptor<Aes128>;

//= [Cryptosystem Profile Based on Simplified Profile](https://datatracker.ietf.org/doc/html/rfc3961#section-5.3) =//
pub(crate) fn decrypt_message(
    key: &[u8],
    key_usage: i32,
    cipher_data: &[u8],
    aes_size: &AesSize,
) -> KerberosCryptoResult<Vec<u8>> {
    if cipher_data.len() < AES_BLOCK_SIZE + AES_MAC_SIZE {
        return Err(KerberosCryptoError::CipherLength(
            cipher_data.len(),
            AES_BLOCK_SIZE + AES_MAC_SIZE,
        ));
    }

    // (C1,H1) = ciphertext
    let (cipher_data, checksum) = cipher_data.split_at(cipher_data.len() - AES_MAC_SIZE);

    let ke = derive_key(key, &usage_ke(key_usage), aes_size)?;
    // (P1, newIV) = D(Ke, C1, oldstate.ivec)
    let plaintext = decrypt_aes_cts(&ke, cipher_data, aes_size)?;

    // if (H1 != HMAC(Ki, P1)[1..h])
    let calculated_checksum = encryption_checksum_sha_aes(key, key_usage, &plaintext, aes_size)?;
    if calculated_checksum != checksum {
        return Err(KerberosCryptoError::IntegrityCheck);
    }

    // the first block is a random confounder
    Ok(plaintext[AES_BLOCK_SIZE..].to_vec())
}

pub(crate) fn decrypt_aes_cbc(key: &[u8], cipher_data: &[u8], aes_size: &AesSize) -> KerberosCryptoResult<Vec<u8>> {
    if cipher_data.len() % AES_BLOCK_SIZE != 0 {
        return Err(KerberosCryptoError::CipherLength(cipher_data.len(), AES_BLOCK_SIZE));
    }

    let mut cipher_data = cipher_data.to_vec();
    let iv = [0_u8; AES_BLOCK_SIZE];

    match aes_size {
        AesSize::Aes256 => {
            let cipher = Aes256CbcDecryptor::new_from_slices(key, &iv)
                .map_err(|_| KerberosCryptoError::KeyLength(key.len(), aes_size.key_length()))?;
            cipher
                .decrypt_padded_mut::<NoPadding>(cipher_data.as_mut_slice())
                .map_err(|err| KerberosCryptoError::CipherError(format!("aes-cbc decryption failed: {}", err)))?;
        }
        AesSize::Aes128 => {
            let cipher = Aes128CbcDecryptor::new_from_slices(key, &iv)
                .map_err(|_| KerberosCryptoError::KeyLength(key.len(), aes_size.key_length()))?;
            cipher
                .decrypt_padded_mut::<NoPadding>(cipher_data.as_mut_slice())
                .map_err(|err| KerberosCryptoError::CipherError(format!("aes-cbc decryption failed: {}", err)))?;
        }
    }

    Ok(cipher_data)
}

//= [CTS using CBC](https://en.wikipedia.org/wiki/Ciphertext_stealing#CBC_ciphertext_stealing_decryption_using_a_standard_CBC_interface) =//
pub(crate) fn decrypt_aes_cts(key: &[u8], cipher_data: &[u8], aes_size: &AesSize) -> KerberosCryptoResult<Vec<u8>> {
    if cipher_data.len() == AES_BLOCK_SIZE {
        return decrypt_aes_cbc(key, cipher_data, aes_size);
    }

    let pad_length = (AES_BLOCK_SIZE - (cipher_data.len() % AES_BLOCK_SIZE)) % AES_BLOCK_SIZE;

    let mut cipher = cipher_data.to_vec();

    if pad_length != 0 {
        // recover the stolen tail: decrypt Cn-1 with iv = 0
        let start = cipher.len() + pad_length - AES_BLOCK_SIZE * 2;

        let dn = decrypt_aes_cbc(key, &cipher[start..start + AES_BLOCK_SIZE], aes_size)?;

        let dn_len = dn.len();
        cipher.extend_from_slice(&dn[dn_len - pad_length..]);
    }

    if cipher.len() >= 2 * AES_BLOCK_SIZE {
        swap_two_last_blocks(&mut cipher)?;
    }

    let mut plaintext = decrypt_aes_cbc(key, &cipher, aes_size)?;

    plaintext.resize(cipher.len() - pad_length, 0);

    Ok(plaintext)
}
