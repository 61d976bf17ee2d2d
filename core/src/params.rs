/// Validate the relation between threshold and participant counts.
///
/// Every participant needs its own nonzero `x` in the field, so there can be
/// at most `modulus - 1` of them.
pub fn validate_threshold_config(
    threshold: usize,
    participants: usize,
    modulus: u64,
) -> bool {
    (1..=participants).contains(&threshold)
        && u64::try_from(participants).is_ok_and(|n| n < modulus)
}
