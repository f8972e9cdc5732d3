//! Text primitives shared by the scanners.
//!
//! The driver source is C++ full of macro invocations. None of the scanners
//! parse it; they look for a handful of call shapes and read their argument
//! lists. Everything here works on byte offsets of ASCII delimiters, so slicing
//! is always on character boundaries.

/// One `name( ... )` invocation found in a text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Call<'a> {
    /// Offset of the first byte of the name.
    pub start: usize,
    /// Text between the parentheses, untrimmed.
    pub args: &'a str,
    /// Offset just past the closing parenthesis.
    pub end: usize,
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn starts_word(text: &str, at: usize) -> bool {
    at == 0 || !is_ident_byte(text.as_bytes()[at - 1])
}

fn ends_word(text: &str, at: usize) -> bool {
    text.as_bytes().get(at).is_none_or(|&b| !is_ident_byte(b))
}

/// Offsets of `word` in `text` where it is not part of a longer identifier.
pub fn word_positions<'a>(text: &'a str, word: &'a str) -> impl Iterator<Item = usize> + 'a {
    text.match_indices(word)
        .map(|(at, _)| at)
        .filter(move |&at| starts_word(text, at) && ends_word(text, at + word.len()))
}

/// Offset of the `)` matching the `(` at `open`. Parentheses inside string
/// literals are not counted.
pub fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&b'(') {
        return None;
    }

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    for (offset, &b) in bytes.iter().enumerate().skip(open) {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(offset);
                }
            }
            _ => {}
        }
    }
    None
}

/// Every balanced invocation of `name` in `text`, in order. Whitespace is
/// allowed between the name and `(`. Unbalanced invocations are skipped.
pub fn find_calls<'a>(text: &'a str, name: &'a str) -> impl Iterator<Item = Call<'a>> + 'a {
    let mut from = 0;
    std::iter::from_fn(move || {
        while let Some(found) = text[from..].find(name) {
            let start = from + found;
            let after = start + name.len();
            from = after;

            if !starts_word(text, start) {
                continue;
            }
            let mut cursor = Cursor::new(text, after);
            cursor.skip_ws();
            let open = cursor.pos();
            let Some(close) = matching_paren(text, open) else {
                continue;
            };

            from = close + 1;
            return Some(Call {
                start,
                args: &text[open + 1..close],
                end: close + 1,
            });
        }
        None
    })
}

/// Split an argument list on top-level commas. Each argument is trimmed; an
/// empty list yields no arguments.
pub fn split_args(args: &str) -> Vec<&str> {
    if args.trim().is_empty() {
        return Vec::new();
    }

    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut start = 0;
    for (offset, b) in args.bytes().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                out.push(args[start..offset].trim());
                start = offset + 1;
            }
            _ => {}
        }
    }
    out.push(args[start..].trim());
    out
}

/// Contents of a `"..."` literal, if `arg` is one.
pub fn unquote(arg: &str) -> Option<&str> {
    let arg = arg.trim();
    arg.strip_prefix('"')?.strip_suffix('"')
}

/// True for tokens shaped like a bitmask literal (`0x0f`, `08`).
pub fn is_hex_literal(token: &str) -> bool {
    !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_hexdigit() || b == b'x' || b == b'X')
}

/// Value of a bitmask literal, read as hexadecimal with or without a `0x`
/// prefix. Unreadable literals are 0.
pub fn parse_hex_literal(token: &str) -> u32 {
    let token = token.trim();
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    u32::from_str_radix(digits, 16).unwrap_or(0)
}

/// Forward-only reader over a text, used to match fixed token sequences.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str, pos: usize) -> Self {
        Self { text, pos }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Skip whitespace; returns how many bytes were skipped.
    pub fn skip_ws(&mut self) -> usize {
        let rest = self.rest();
        let skipped = rest.len() - rest.trim_start().len();
        self.pos += skipped;
        skipped
    }

    /// Consume `token` if the text continues with it.
    pub fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    /// Skip whitespace, then consume `token`.
    pub fn eat_ws(&mut self, token: &str) -> bool {
        self.skip_ws();
        self.eat(token)
    }

    /// Consume an identifier (`[A-Za-z0-9_]+`).
    pub fn ident(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let len = rest.bytes().take_while(|&b| is_ident_byte(b)).count();
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }
}
