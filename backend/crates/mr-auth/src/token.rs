use base64::Engine;

/// Generate an unguessable opaque token: 32 CSPRNG bytes (256 bits),
/// base64url without padding.
pub fn generate_token() -> String {
    let mut buf = [0u8; 32];
    let _ = getrandom::getrandom(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf)
}
