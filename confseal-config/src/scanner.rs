//! `${...}` reference scanning.

/// A `${...}` reference, or an escaped opener, found in a string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span<'a> {
    /// Byte offset of the `$`. For an escape, the offset of the escaping `$`.
    pub start: usize,
    /// Byte offset just past the closing `}`, or past `$${` for an escape.
    pub end: usize,
    /// Text between the delimiters. Empty for an escape.
    pub inner: &'a str,
    /// `$${` stands for a literal `${` and opens no reference.
    pub escaped: bool,
}

const OPEN: &str = "${";
const CLOSE: char = '}';
const ESCAPE: u8 = b'$';

/// Iterator over the non-overlapping references in a string, left to right.
///
/// A reference ends at the first `}` after its opener, so `${a ${b}` is one
/// span with inner text `a ${b`. An unterminated `${` ends the scan.
#[derive(Clone, Debug)]
pub struct Spans<'a> {
    text: &'a str,
    pos: usize,
}

pub fn spans(text: &str) -> Spans<'_> {
    Spans { text, pos: 0 }
}

impl<'a> Iterator for Spans<'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Span<'a>> {
        let start = self.pos + self.text.get(self.pos..)?.find(OPEN)?;
        let open_end = start + OPEN.len();

        // Delimiters are ASCII, so every index we stop at is a char boundary.
        if start > 0 && self.text.as_bytes()[start - 1] == ESCAPE {
            self.pos = open_end;
            return Some(Span {
                start: start - 1,
                end: open_end,
                inner: "",
                escaped: true,
            });
        }

        let Some(len) = self.text[open_end..].find(CLOSE) else {
            self.pos = self.text.len();
            return None;
        };
        let close = open_end + len;
        self.pos = close + 1;
        Some(Span {
            start,
            end: close + 1,
            inner: &self.text[open_end..close],
            escaped: false,
        })
    }
}
