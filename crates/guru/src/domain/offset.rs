//! Rune to byte offset conversion.
//!
//! Acme addresses text in runes while the analysis tool wants byte offsets.
//! Bodies are decoded as UTF-8; a byte that does not begin a valid sequence
//! counts as a single one-byte rune, the same way Acme treats stray bytes.

use crate::domain::errors::GuruError;

/// Iterator over the encoded width of each rune in a byte slice.
#[derive(Debug, Clone)]
pub struct RuneWidths<'a> {
    bytes: &'a [u8],
}

impl<'a> RuneWidths<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }
}

impl Iterator for RuneWidths<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let first = *self.bytes.first()?;
        let width = match sequence_len(first) {
            Some(len)
                if self
                    .bytes
                    .get(..len)
                    .is_some_and(|seq| std::str::from_utf8(seq).is_ok()) =>
            {
                len
            }
            _ => 1,
        };
        self.bytes = &self.bytes[width..];
        Some(width)
    }
}

fn sequence_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7f => Some(1),
        0xc2..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf4 => Some(4),
        _ => None,
    }
}

/// Byte offset at which rune `q` of `body` begins.
///
/// `q` may equal the rune count, which yields `body.len()`.
pub fn byte_offset(q: usize, body: &[u8]) -> Result<usize, GuruError> {
    let mut runes = RuneWidths::new(body);
    let mut off = 0;
    for consumed in 0..q {
        match runes.next() {
            Some(width) => off += width,
            None => {
                return Err(GuruError::OffsetOutOfRange {
                    requested: q,
                    available: consumed,
                });
            }
        }
    }
    Ok(off)
}
