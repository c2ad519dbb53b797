use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for an audit finding.
///
/// Identity fields:
/// - check_id
/// - code
/// - device path
/// - interface header text (if any)
/// - salient detail (offending line or missing pattern)
pub fn fingerprint_for_finding(
    check_id: &str,
    code: &str,
    device: &str,
    interface: Option<&str>,
    salient: &str,
) -> String {
    let mut parts = vec![check_id, code, device];
    if let Some(i) = interface {
        parts.push(i);
    }
    parts.push(salient);
    let canonical = parts.join("|");

    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let digest = hasher.finalize();
    hex::encode(digest)
}
