use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};
use uuid::Uuid;

const SECRET_LENGTH: usize = 40;
const SEPARATOR: char = '|';

/// A freshly minted token. Only `hash` is ever stored.
pub(crate) struct MintedToken {
    pub id: Uuid,
    pub plain_text: String,
    pub hash: String,
}

/// Plain text is `{id}|{secret}`; the id locates the stored record and the
/// SHA-256 of the secret must match its hash.
pub(crate) fn mint() -> MintedToken {
    let id = Uuid::new_v4();
    let secret: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(SECRET_LENGTH)
        .map(char::from)
        .collect();

    MintedToken {
        id,
        plain_text: format!("{}{SEPARATOR}{secret}", id.simple()),
        hash: hash_secret(&secret),
    }
}

/// Splits a presented token into its record id and the hash of its secret.
pub(crate) fn parse(token: &str) -> Option<(Uuid, String)> {
    let (id, secret) = token.split_once(SEPARATOR)?;
    let id = Uuid::try_parse(id).ok()?;
    if secret.len() != SECRET_LENGTH {
        return None;
    }
    Some((id, hash_secret(secret)))
}

fn hash_secret(secret: &str) -> String {
    format!("{:x}", Sha256::digest(secret.as_bytes()))
}
