//! WhatsApp invite link parsing.

use lazy_static::lazy_static;
use regex::Regex;
use uuid::Uuid;

const INVITE_HOST_MARKER: &str = "chat.whatsapp.com/";

/// Length of the locally generated code used when a link has no invite path.
const FALLBACK_CODE_LEN: usize = 22;

lazy_static! {
    static ref INVITE_LINK_REGEX: Regex =
        Regex::new(r"^https://chat\.whatsapp\.com/[A-Za-z0-9]+$").unwrap();
}

/// True for a canonical invite link: https, the chat.whatsapp.com host and
/// an alphanumeric code with nothing after it.
pub fn validate_link(link: &str) -> bool {
    INVITE_LINK_REGEX.is_match(link)
}

/// The invite code of a link: the last path segment when the link points at
/// chat.whatsapp.com, otherwise a random 22-character token.
///
/// Callers that store the code validate the link first, so the random branch
/// is only reachable for links that were never checked.
pub fn extract_invite_code(link: &str) -> String {
    if link.contains(INVITE_HOST_MARKER) {
        if let Some(code) = link.rsplit('/').next() {
            return code.to_string();
        }
    }
    fallback_code()
}

fn fallback_code() -> String {
    Uuid::new_v4()
        .to_string()
        .chars()
        .take(FALLBACK_CODE_LEN)
        .collect()
}
