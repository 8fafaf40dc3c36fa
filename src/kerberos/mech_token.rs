use std::io::{Cursor, Read};

use oid::ObjectIdentifier;
use picky_asn1_x509::oids;
use picky_krb::constants::gss_api::AP_REQ_TOKEN_ID;
use picky_krb::messages::ApReq;
use tracing::instrument;

use crate::ber;
use crate::spnego::read_oid;
use crate::{Error, ErrorKind, Result};

/// The Kerberos GSS mechanism token embedded in a NegTokenInit:
/// `[APPLICATION 0] { OID, TOK_ID 0x01 0x00, AP-REQ }`.
///
/// [RFC 4121 4.1](https://datatracker.ietf.org/doc/html/rfc4121#section-4.1)
#[derive(Debug, Clone, PartialEq)]
pub struct KerberosMechToken {
    pub mech_type: ObjectIdentifier,
    pub ap_req: ApReq,
}

impl KerberosMechToken {
    #[instrument(level = "trace", skip_all)]
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::new(ErrorKind::EmptyKerberosToken, "Kerberos mechanism token is empty"));
        }

        let mut stream = Cursor::new(data);

        ber::read_application_tag(&mut stream, 0).map_err(malformed)?;

        let mech_type = read_oid(&mut stream).map_err(|_| {
            Error::new(
                ErrorKind::MalformedKerberosToken,
                "Kerberos mechanism token carries no valid oid",
            )
        })?;
        if mech_type != oids::krb5() && mech_type != oids::ms_krb5() {
            return Err(Error::new(
                ErrorKind::MalformedKerberosToken,
                format!("unexpected Kerberos mechanism oid: {:?}", mech_type),
            ));
        }

        let mut token_id = [0_u8; 2];
        stream.read_exact(&mut token_id).map_err(malformed)?;
        if token_id != AP_REQ_TOKEN_ID {
            return Err(Error::new(
                ErrorKind::MalformedKerberosToken,
                format!("unexpected token id: {:02x?}, expected AP-REQ (01 00)", token_id),
            ));
        }

        let ap_req: ApReq = picky_asn1_der::from_bytes(&data[stream.position() as usize..]).map_err(|err| {
            Error::new(
                ErrorKind::MalformedKerberosToken,
                format!("invalid AP-REQ structure: {:?}", err),
            )
        })?;

        Ok(Self { mech_type, ap_req })
    }
}

fn malformed(err: std::io::Error) -> Error {
    Error::new(
        ErrorKind::MalformedKerberosToken,
        format!("invalid Kerberos mechanism token: {}", err),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_empty_token_fails_with_typed_error() {
        let err = KerberosMechToken::decode(&[]).unwrap_err();

        assert_eq!(err.kind, ErrorKind::EmptyKerberosToken);
        assert_eq!(err.kind.key(), "kerberos.token.empty");
    }

    #[test]
    fn decode_wrong_oid_fails() {
        // [APPLICATION 0] { OID(1.3.6.1.5.5.2) /* SPNEGO, not Kerberos */, 01 00 }
        let token = [
            0x60, 0x0A, 0x06, 0x06, 0x2B, 0x06, 0x01, 0x05, 0x05, 0x02, 0x01, 0x00,
        ];

        let err = KerberosMechToken::decode(&token).unwrap_err();

        assert_eq!(err.kind, ErrorKind::MalformedKerberosToken);
    }

    #[test]
    fn decode_wrong_token_id_fails() {
        // [APPLICATION 0] { OID(krb5), 02 00 /* AP-REP, not AP-REQ */ }
        let token = [
            0x60, 0x0D, 0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x12, 0x01, 0x02, 0x02, 0x02, 0x00,
        ];

        let err = KerberosMechToken::decode(&token).unwrap_err();

        assert_eq!(err.kind, ErrorKind::MalformedKerberosToken);
        assert!(err.description.contains("token id"));
    }

    #[test]
    fn decode_truncated_ap_req_fails() {
        // valid framing followed by garbage instead of an AP-REQ
        let token = [
            0x60, 0x10, 0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x12, 0x01, 0x02, 0x02, 0x01, 0x00, 0x6E, 0x03,
            0x30,
        ];

        let err = KerberosMechToken::decode(&token).unwrap_err();

        assert_eq!(err.kind, ErrorKind::MalformedKerberosToken);
    }
}
