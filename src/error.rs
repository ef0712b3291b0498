//! Error types.
//!
//! Reordering operations report [`KeyNotFound`], handle-based access reports
//! [`StaleHandle`], and the JSON/YAML adapters report [`Error`].

use crate::Handle;

/// A key named by a reordering operation is not present in the map.
///
/// Carries the missing key, which is either the key being moved or the mark
/// key it was to be placed next to.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("key {key:?} not found")]
pub struct KeyNotFound<K> {
    /// The key that was looked up and not found.
    pub key: K,
}

/// A [`Handle`] whose pair has been deleted from the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0:?} does not refer to a live pair")]
pub struct StaleHandle(pub Handle);

/// Errors surfaced by the JSON and YAML adapters.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A key type has no textual, integral or custom-text representation.
    ///
    /// This is a property of the key type rather than of the data, so every
    /// encode or decode of a non-empty map with that key type fails the same
    /// way.
    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(String),

    /// The input is not a mapping, is syntactically invalid, or holds a
    /// scalar that does not parse into its target type.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The underlying reader or writer failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Classifies a message produced by the serde layer.
    ///
    /// Unsupported-key failures are wrapped in [`KEY_MARK`] by the key codec
    /// and recognized only at the start of the message or right after a
    /// `path: ` prefix. Everything else is malformed input.
    ///
    /// [`KEY_MARK`]: crate::key::KEY_MARK
    #[cfg(any(feature = "json", feature = "yaml"))]
    pub(crate) fn from_message(message: String) -> Self {
        use crate::key::KEY_MARK;
        use crate::key::UNSUPPORTED_KEY_TYPE;

        let body = message.strip_prefix(KEY_MARK).or_else(|| {
            let (_path, rest) = message.split_once(": ")?;
            rest.strip_prefix(KEY_MARK)
        });
        let marked = body.and_then(|body| {
            let rest = body.strip_prefix(UNSUPPORTED_KEY_TYPE)?;
            rest.find(KEY_MARK).map(|end| &rest[..end])
        });

        match marked {
            Some(type_name) => Error::UnsupportedKeyType(type_name.to_string()),
            None => Error::MalformedInput(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_not_found_display() {
        let err = KeyNotFound { key: "missing" };
        assert_eq!(err.to_string(), r#"key "missing" not found"#);
    }

    #[test]
    fn test_stale_handle_display() {
        let err = StaleHandle(Handle::new(3, 1));
        assert_eq!(err.to_string(), "Handle(3v1) does not refer to a live pair");
    }

    #[cfg(any(feature = "json", feature = "yaml"))]
    #[test]
    fn test_from_message_classification() {
        let err = Error::from_message("\u{1}unsupported key type: bool\u{1} at line 2 column 3".into());
        assert!(matches!(err, Error::UnsupportedKeyType(ref name) if name == "bool"), "{err:?}");

        let err = Error::from_message("m.a: \u{1}unsupported key type: (i32, i32)\u{1}".into());
        assert!(matches!(err, Error::UnsupportedKeyType(ref name) if name == "(i32, i32)"), "{err:?}");

        let err = Error::from_message("invalid type: boolean `true`, expected a mapping".into());
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[cfg(any(feature = "json", feature = "yaml"))]
    #[test]
    fn test_from_message_ignores_marker_text_in_data() {
        let err = Error::from_message(
            r#"invalid type: string "unsupported key type: x", expected i32 at line 1 column 31"#.into(),
        );
        assert!(matches!(err, Error::MalformedInput(_)), "{err:?}");

        let err = Error::from_message("unsupported key type: x".into());
        assert!(matches!(err, Error::MalformedInput(_)), "{err:?}");

        let err = Error::from_message("a: invalid type: \u{1}unsupported key type: x\u{1}".into());
        assert!(matches!(err, Error::MalformedInput(_)), "{err:?}");
    }
}
