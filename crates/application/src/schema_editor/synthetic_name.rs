use super::SYNTHETIC_FIELD_PREFIX;

/// Generates a placeholder field name: the prefix followed by four base-36 characters.
pub(super) fn generate_synthetic_name() -> String {
    const SUFFIX_LENGTH: usize = 4;
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut bytes = [0u8; SUFFIX_LENGTH];
    getrandom::fill(&mut bytes).unwrap_or(());

    let suffix: String = bytes
        .iter()
        .map(|byte| {
            let index = (*byte as usize) % ALPHABET.len();
            ALPHABET[index] as char
        })
        .collect();

    format!("{SYNTHETIC_FIELD_PREFIX}{suffix}")
}
