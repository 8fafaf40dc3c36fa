use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use sha1::Sha1;

use super::{KerberosCryptoError, KerberosCryptoResult};

//= [Checksum Profiles Based on Simplified Profile](https://datatracker.ietf.org/doc/html/rfc3961#section-5.4) =//
pub(crate) fn hmac_sha1(key: &[u8], payload: &[u8], mac_size: usize) -> KerberosCryptoResult<Vec<u8>> {
    let mut hmacker = Hmac::<Sha1>::new_from_slice(key)
        .map_err(|err| KerberosCryptoError::CipherError(format!("invalid hmac-sha1 key: {}", err)))?;

    hmacker.update(payload);

    let mut hmac = hmacker.finalize().into_bytes().to_vec();
    hmac.truncate(mac_size);

    Ok(hmac)
}

pub(crate) fn hmac_md5(key: &[u8], payload: &[u8]) -> KerberosCryptoResult<Vec<u8>> {
    let mut hmacker = Hmac::<Md5>::new_from_slice(key)
        .map_err(|err| KerberosCryptoError::CipherError(format!("invalid hmac-md5 key: {}", err)))?;

    hmacker.update(payload);

    Ok(hmacker.finalize().into_bytes().to_vec())
}

pub(crate) fn compute_md5(data: &[u8]) -> Vec<u8> {
    let mut context = Md5::new();
    context.update(data);

    context.finalize().to_vec()
}
