use rand::rngs::OsRng;
use rand::RngCore;

use super::common::hmac_md5;
use super::{Cipher, CipherSuite, KerberosCryptoError, KerberosCryptoResult};

pub const RC4_KEY_SIZE: usize = 16;

const RC4_CHECKSUM_SIZE: usize = 16;
const RC4_CONFOUNDER_SIZE: usize = 8;

/// ARCFOUR stream cipher state.
pub struct Rc4 {
    state: [u8; 256],
    i: u8,
    j: u8,
}

impl Rc4 {
    pub fn new(key: &[u8]) -> Self {
        let mut state = [0_u8; 256];
        for (index, value) in state.iter_mut().enumerate() {
            *value = index as u8;
        }

        let mut j: u8 = 0;
        for i in 0..256 {
            j = j
                .wrapping_add(state[i])
                .wrapping_add(key[i % key.len()]);
            state.swap(i, usize::from(j));
        }

        Self { state, i: 0, j: 0 }
    }

    pub fn process(&mut self, data: &[u8]) -> Vec<u8> {
        data.iter()
            .map(|byte| {
                self.i = self.i.wrapping_add(1);
                self.j = self.j.wrapping_add(self.state[usize::from(self.i)]);
                self.state.swap(usize::from(self.i), usize::from(self.j));

                let index = self.state[usize::from(self.i)].wrapping_add(self.state[usize::from(self.j)]);
                byte ^ self.state[usize::from(index)]
            })
            .collect()
    }
}

/// [RFC 4757 3](https://datatracker.ietf.org/doc/html/rfc4757#section-3):
/// key usage values are mapped onto the T values Microsoft assigned before
/// the RFC 3961 numbers existed.
pub(crate) fn translate_key_usage(key_usage: i32) -> i32 {
    match key_usage {
        3 => 8,
        9 => 8,
        23 => 13,
        _ => key_usage,
    }
}

/// The RC4-HMAC encryption profile (etype 23).
///
/// [RFC 4757](https://datatracker.ietf.org/doc/html/rfc4757)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Rc4HmacMd5;

impl Rc4HmacMd5 {
    pub fn new() -> Self {
        Self
    }
}

impl Cipher for Rc4HmacMd5 {
    fn cipher_type(&self) -> CipherSuite {
        CipherSuite::Rc4HmacMd5
    }

    fn key_size(&self) -> usize {
        RC4_KEY_SIZE
    }

    fn encrypt(&self, key: &[u8], key_usage: i32, payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        if key.len() != RC4_KEY_SIZE {
            return Err(KerberosCryptoError::KeyLength(key.len(), RC4_KEY_SIZE));
        }

        let usage = translate_key_usage(key_usage).to_le_bytes();
        let k1 = hmac_md5(key, &usage)?;

        let mut confounder = [0_u8; RC4_CONFOUNDER_SIZE];
        OsRng.fill_bytes(&mut confounder);

        let mut plaintext = Vec::with_capacity(RC4_CONFOUNDER_SIZE + payload.len());
        plaintext.extend_from_slice(&confounder);
        plaintext.extend_from_slice(payload);

        // edata = checksum | RC4(K3, confounder | plaintext)
        let checksum = hmac_md5(&k1, &plaintext)?;
        let k3 = hmac_md5(&k1, &checksum)?;

        let mut cipher_data = checksum;
        cipher_data.extend_from_slice(&Rc4::new(&k3).process(&plaintext));

        Ok(cipher_data)
    }

    fn decrypt(&self, key: &[u8], key_usage: i32, cipher_data: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
        if key.len() != RC4_KEY_SIZE {
            return Err(KerberosCryptoError::KeyLength(key.len(), RC4_KEY_SIZE));
        }

        if cipher_data.len() < RC4_CHECKSUM_SIZE + RC4_CONFOUNDER_SIZE {
            return Err(KerberosCryptoError::CipherLength(
                cipher_data.len(),
                RC4_CHECKSUM_SIZE + RC4_CONFOUNDER_SIZE,
            ));
        }

        let usage = translate_key_usage(key_usage).to_le_bytes();
        let k1 = hmac_md5(key, &usage)?;

        let (checksum, encrypted) = cipher_data.split_at(RC4_CHECKSUM_SIZE);

        let k3 = hmac_md5(&k1, checksum)?;
        let plaintext = Rc4::new(&k3).process(encrypted);

        if hmac_md5(&k1, &plaintext)? != checksum {
            return Err(KerberosCryptoError::IntegrityCheck);
        }

        Ok(plaintext[RC4_CONFOUNDER_SIZE..].to_vec())
    }
}
