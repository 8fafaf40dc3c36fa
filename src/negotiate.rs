use tracing::instrument;

use crate::kerberos::{decrypt_ticket, find_pac_data, KerberosKey, KerberosMechToken};
use crate::pac::{ChecksumPolicy, Pac, PacLogonInfo, PacUpnDnsInfo};
use crate::spnego::SpnegoToken;
use crate::{Error, ErrorKind, Result};

/// The outcome of a successful `Negotiate` token validation: the principal
/// asserted by the ticket and, when the ticket carries one, its PAC.
#[derive(Debug)]
pub struct AuthenticatedUser {
    /// The client principal name from the decrypted ticket, components
    /// joined with `/`.
    pub principal: String,
    /// The client realm from the decrypted ticket.
    pub realm: String,
    pub pac: Option<Pac>,
    pub logon_info: Option<PacLogonInfo>,
    pub upn_dns_info: Option<PacUpnDnsInfo>,
}

/// Runs the whole decode pipeline over the raw bytes of an
/// `Authorization: Negotiate` token (base64-decoded by the caller):
/// SPNEGO NegTokenInit -> Kerberos mechanism token -> AP-REQ -> ticket
/// decryption under `keys` -> authorization-data walk -> PAC decode and
/// signature verification.
///
/// The PAC server checksum is verified with the key that decrypted the
/// ticket; `kdc_key` and `policy` control the PRIVSVR checksum. Callers are
/// expected to map any failure to "authentication not successful" and log the
/// carried error key.
#[instrument(level = "trace", skip_all)]
pub fn accept_negotiate_token(
    token: &[u8],
    keys: &[KerberosKey],
    kdc_key: Option<&KerberosKey>,
    policy: ChecksumPolicy,
) -> Result<AuthenticatedUser> {
    let spnego_token = SpnegoToken::decode_init(token)?;
    let mech_token_data = spnego_token
        .mechanism_token()
        .ok_or_else(|| Error::new(ErrorKind::EmptyKerberosToken, "NegTokenInit carries no mechanism token"))?;

    let mech_token = KerberosMechToken::decode(mech_token_data)?;
    let (enc_part, server_key) = decrypt_ticket(&mech_token.ap_req, keys)?;

    let principal = enc_part
        .0
        .cname
        .0
        .name_string
        .0
         .0
        .iter()
        .map(|name| name.to_string())
        .collect::<Vec<_>>()
        .join("/");
    let realm = enc_part.0.crealm.0.to_string();

    let (pac, logon_info, upn_dns_info) = match find_pac_data(&enc_part)? {
        Some(pac_data) => {
            let pac = Pac::parse(&pac_data)?;
            pac.verify_signatures(server_key, kdc_key, policy)?;

            let logon_info = pac.logon_info()?;
            let upn_dns_info = pac.upn_dns_info()?;

            (Some(pac), logon_info, upn_dns_info)
        }
        None => (None, None, None),
    };

    Ok(AuthenticatedUser {
        principal,
        realm,
        pac,
        logon_info,
        upn_dns_info,
    })
}
