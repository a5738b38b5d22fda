use lazy_static::lazy_static;
use regex::Regex;

/// Batas panjang key di realtime database (dalam bytes UTF-8)
pub const MAX_KEY_BYTES: usize = 768;

lazy_static! {
    // Karakter yang dilarang di key: . $ # [ ] / dan ASCII control chars
    static ref FORBIDDEN_KEY_CHARS: Regex =
        Regex::new(r"[.$#\[\]/\x00-\x1F\x7F]").expect("forbidden key pattern harus valid");
}

// Validate satu key (satu segment path) realtime database
pub fn is_valid_store_key(key: &str) -> bool {
    !key.is_empty() && key.len() <= MAX_KEY_BYTES && !FORBIDDEN_KEY_CHARS.is_match(key)
}

// Validate path seperti "chats/abc/messages": setiap segment harus key valid
pub fn is_valid_store_path(path: &str) -> bool {
    let trimmed = path.trim_matches('/');
    !trimmed.is_empty() && trimmed.split('/').all(is_valid_store_key)
}

/// Key index untuk pasangan participant.
///
/// Urutan argumen tidak berpengaruh: `(a, b)` dan `(b, a)` menghasilkan key
/// yang sama. Panjang id pertama ikut di depan key, jadi pasangan berbeda
/// tidak bisa menghasilkan key yang sama walaupun id berisi `_`.
pub fn participant_pair_key(user_a: &str, user_b: &str) -> String {
    let (first, second) = if user_a <= user_b {
        (user_a, user_b)
    } else {
        (user_b, user_a)
    };
    format!("{}_{}_{}", first.len(), first, second)
}
