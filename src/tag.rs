use std::fmt;

/// A 4-character ASCII tag packed big-endian into a `u32`.
///
/// Languages, scripts and OpenType language systems are all identified by
/// short ASCII tags. Packing them gives every emitted table a cheap total
/// order (numeric order == padded string order), which is what makes the
/// generated arrays binary-searchable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tag(pub u32);

/// Tags shorter than 4 characters are padded with spaces on the right.
pub const EMPTY_TAG_CHARACTER: u8 = b' ';

impl Tag {
    /// The all-zero tag standing for "no value".
    pub const UNKNOWN: Tag = Tag(0);

    /// The default OpenType language system tag.
    pub const DFLT: Tag = Tag::from_bytes(*b"dflt");

    pub const fn from_bytes(bytes: [u8; 4]) -> Tag {
        Tag(u32::from_be_bytes(bytes))
    }

    /// Pack a 1-4 character ASCII string, space-padded on the right.
    pub fn new(text: &str) -> Tag {
        debug_assert!(
            !text.is_empty() && text.len() <= 4 && text.is_ascii(),
            "tag must be 1-4 ASCII characters: {text:?}"
        );
        let mut bytes = [EMPTY_TAG_CHARACTER; 4];
        for (slot, b) in bytes.iter_mut().zip(text.bytes()) {
            *slot = b;
        }
        Tag::from_bytes(bytes)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    pub const fn bytes(self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.bytes() {
            f.write_str(char::from(b).encode_utf8(&mut [0; 4]))?;
        }
        Ok(())
    }
}
