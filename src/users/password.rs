/// Fixed suffix appended to the plaintext in place of a real hash.
const FAKE_HASH_SUFFIX: &str = "notreallyhashed";

/// Placeholder password transform: appends a fixed suffix to the plaintext.
///
/// This is NOT hashing. The stored value is trivially reversible and exists
/// only so the column has a distinct "derived" value. A real deployment must
/// replace this with a vetted password-hashing primitive before storing
/// anything.
pub fn hash_password(plain: &str) -> String {
    format!("{plain}{FAKE_HASH_SUFFIX}")
}
