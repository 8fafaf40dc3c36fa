use super::encrypt::encrypt_aes_cbc;
use super::AesSize;
use crate::crypto::nfold::n_fold;
use crate::crypto::KerberosCryptoResult;

/// [Key Derivation](https://datatracker.ietf.org/doc/html/rfc3961#section-5.1):
/// DK(base-key, well-known-constant) with the constant n-folded to the cipher
/// block size and key material produced by iterated encryption.
pub(crate) fn derive_key(key: &[u8], well_known: &[u8], aes_size: &AesSize) -> KerberosCryptoResult<Vec<u8>> {
    let mut n_fold_usage = n_fold(well_known, aes_size.block_bit_len());

    let key_len = aes_size.key_length();
    let mut out = Vec::with_capacity(key_len);

    while out.len() < key_len {
        n_fold_usage = encrypt_aes_cbc(key, &n_fold_usage, aes_size)?;
        out.extend_from_slice(&n_fold_usage);
    }

    Ok(out)
}
