use picky_krb::constants::key_usages::TICKET_REP;
use picky_krb::data_types::EncTicketPart;
use picky_krb::messages::ApReq;
use tracing::{instrument, trace};

use super::{integer_as_u32, KerberosKey};
use crate::crypto::{Cipher, CipherSuite};
use crate::{Error, ErrorKind, Result};

/// Decrypts the AP-REQ ticket's enc-part and returns the decoded
/// [EncTicketPart] together with the key that decrypted it.
///
/// Candidate keys are tried in the order supplied. A key applies when its
/// encryption type matches the enc-part's declared etype and, when both sides
/// carry one, the key version number matches. A failed integrity check only
/// disqualifies that key; decryption fails as a whole once the candidate list
/// is exhausted.
#[instrument(level = "trace", skip_all)]
pub fn decrypt_ticket<'keys>(
    ap_req: &ApReq,
    keys: &'keys [KerberosKey],
) -> Result<(EncTicketPart, &'keys KerberosKey)> {
    let ticket_enc_part = &ap_req.0.ticket.0 .0.enc_part.0;

    let etype = CipherSuite::try_from(ticket_enc_part.etype.0 .0.as_slice())
        .map_err(|err| Error::new(ErrorKind::InvalidKey, format!("ticket enc-part: {}", err)))?;
    let kvno = ticket_enc_part
        .kvno
        .0
        .as_ref()
        .and_then(|kvno| integer_as_u32(&kvno.0));
    let cipher_data = &ticket_enc_part.cipher.0 .0;

    let cipher = etype.cipher();

    for key in keys {
        if key.encryption_type() != etype {
            trace!(?etype, key_etype = ?key.encryption_type(), "skipping key: encryption type mismatch");
            continue;
        }

        if let (Some(declared), Some(provided)) = (kvno, key.key_version()) {
            if declared != provided {
                trace!(declared, provided, "skipping key: key version mismatch");
                continue;
            }
        }

        match cipher.decrypt(key.key_bytes(), TICKET_REP, cipher_data) {
            Ok(plaintext) => {
                let enc_part = picky_asn1_der::from_bytes(&plaintext).map_err(|err| {
                    Error::new(
                        ErrorKind::MalformedKerberosToken,
                        format!("decrypted enc-part is not a valid EncTicketPart: {:?}", err),
                    )
                })?;

                return Ok((enc_part, key));
            }
            Err(err) => {
                // this key does not apply, try the next candidate
                trace!(%err, "candidate key rejected");
            }
        }
    }

    Err(Error::new(
        ErrorKind::TicketDecryptionFailed,
        "no candidate key decrypted the ticket enc-part",
    ))
}
