//! Path-like part tokens.
//!
//! Each selected part is rendered as `color/category/part`. The category and
//! part are percent-encoded as URL path components (the unreserved set of
//! `encodeURIComponent`), so names containing `#`, spaces or `/` survive a
//! round trip. The color is assumed sanitized and is left as-is.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::RobohashError;

/// Characters left unescaped: `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes one path component.
pub fn percent_encode_component(component: &str) -> String {
    utf8_percent_encode(component, COMPONENT).to_string()
}

/// Reverses [`percent_encode_component`].
pub fn percent_decode_component(component: &str) -> Result<String, RobohashError> {
    percent_decode_str(component)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| RobohashError::InvalidToken {
            token: component.to_string(),
            reason: format!("decoded bytes are not UTF-8: {}", e),
        })
}

/// Builds the token for one selected part.
pub fn encode_token(color: &str, category: &str, part: &str) -> String {
    format!(
        "{}/{}/{}",
        color,
        percent_encode_component(category),
        percent_encode_component(part)
    )
}

/// A token split back into its decoded components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenParts {
    pub color: String,
    pub category: String,
    pub part: String,
}

/// Splits and decodes a `color/category/part` token.
pub fn decode_token(token: &str) -> Result<TokenParts, RobohashError> {
    let mut pieces = token.split('/');
    let (Some(color), Some(category), Some(part), None) =
        (pieces.next(), pieces.next(), pieces.next(), pieces.next())
    else {
        return Err(RobohashError::InvalidToken {
            token: token.to_string(),
            reason: "expected exactly three '/'-separated components".to_string(),
        });
    };

    if color.is_empty() || category.is_empty() || part.is_empty() {
        return Err(RobohashError::InvalidToken {
            token: token.to_string(),
            reason: "empty component".to_string(),
        });
    }

    Ok(TokenParts {
        color: color.to_string(),
        category: percent_decode_component(category)?,
        part: percent_decode_component(part)?,
    })
}
