//! Logical session identifiers (`lsid`)

use crate::error::{Error, Result};
use rand::rngs::OsRng;
use rand::TryRngCore;

/// Number of random bytes in an lsid
pub const LSID_BYTES: usize = 16;

/// Generate a fresh lsid: 16 bytes from the OS random source, lowercase hex.
///
/// There is no fallback to a weaker generator; an unavailable entropy
/// source fails the call.
pub fn generate_lsid() -> Result<String> {
    let mut bytes = [0u8; LSID_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| Error::Entropy(e.to_string()))?;
    Ok(hex::encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_lsid_shape() {
        let lsid = generate_lsid().unwrap();
        assert_eq!(lsid.len(), 32);
        assert!(lsid
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_lsid_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_lsid().unwrap()).collect();
        assert_eq!(ids.len(), 1000);
    }
}
