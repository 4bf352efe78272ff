// Argument validation run before any request goes on the wire

use crate::protocol::{MapiError, MapiResult};

/// Length of each IDPS/PSID half, in characters
pub const IDENTITY_PART_LEN: usize = 16;

/// True when every character is an ASCII hex digit, in either case.
/// The empty string passes.
pub fn is_hex_string(s: &str) -> bool {
    // Per-character ASCII uppercasing: full Unicode case mapping can expand
    // a single non-hex character into hex letters
    s.chars()
        .map(|c| c.to_ascii_uppercase())
        .all(|c| c.is_ascii_alphanumeric() && (!c.is_ascii_alphabetic() || ('A'..='F').contains(&c)))
}

pub fn require_hex(what: &str, s: &str) -> MapiResult<()> {
    if is_hex_string(s) {
        Ok(())
    } else {
        Err(MapiError::Validation(format!("{} is not a hex string: {:?}", what, s)))
    }
}

/// Check the four identity halves: lengths first, then the combined hex test
pub fn validate_identity(idps1: &str, idps2: &str, psid1: &str, psid2: &str) -> MapiResult<()> {
    for (name, part) in [("idps1", idps1), ("idps2", idps2), ("psid1", psid1), ("psid2", psid2)] {
        let len = part.chars().count();
        if len != IDENTITY_PART_LEN {
            return Err(MapiError::Validation(format!(
                "{} must be {} characters, got {}",
                name, IDENTITY_PART_LEN, len
            )));
        }
    }

    let combined = [idps1, idps2, psid1, psid2].concat();
    require_hex("IDPS/PSID", &combined)
}

pub fn validate_read_length(length: u32) -> MapiResult<()> {
    if length == 0 {
        return Err(MapiError::Validation("read length must be greater than 0".to_string()));
    }
    Ok(())
}
