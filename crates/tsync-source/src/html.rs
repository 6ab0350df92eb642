//! Minimal case-insensitive HTML scanning.
//!
//! Searches run over an ASCII-lowercased copy of the document. Lowercasing
//! ASCII never changes byte offsets, so every position found in the copy
//! slices the original document at the same place.

/// Byte offsets of one element inside a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    /// Start of `<tag`.
    pub start: usize,
    /// Just past the `>` of the opening tag.
    pub open_end: usize,
    /// Start of the closing tag, or the scan limit if the element is unclosed.
    pub inner_end: usize,
    /// Just past the closing tag, or the scan limit if the element is unclosed.
    pub end: usize,
}

impl Block {
    pub fn open_tag<'a>(&self, doc: &'a str) -> &'a str {
        &doc[self.start..self.open_end]
    }

    pub fn inner<'a>(&self, doc: &'a str) -> &'a str {
        &doc[self.open_end..self.inner_end]
    }
}

/// Position of the next `<tag` in `lower[from..limit]` whose name ends right
/// after `tag` (so `<th` does not match `<thead`).
pub fn find_open(lower: &str, tag: &str, from: usize, limit: usize) -> Option<usize> {
    let pat = format!("<{tag}");
    let mut pos = from;
    while pos < limit {
        let at = pos + lower.get(pos..limit)?.find(&pat)?;
        let after = at + pat.len();
        match lower.as_bytes().get(after) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(at),
            Some(_) => pos = after,
            None => return None,
        }
    }
    None
}

/// Next `<tag ...>...</tag>` element starting in `lower[from..limit]`.
///
/// An element without a closing tag runs to `limit`.
pub fn next_element(lower: &str, tag: &str, from: usize, limit: usize) -> Option<Block> {
    let start = find_open(lower, tag, from, limit)?;
    let open_end = start + lower.get(start..limit)?.find('>')? + 1;
    let close_pat = format!("</{tag}");
    match lower.get(open_end..limit)?.find(&close_pat) {
        Some(rel) => {
            let inner_end = open_end + rel;
            let end = lower[inner_end..limit]
                .find('>')
                .map_or(limit, |i| inner_end + i + 1);
            Some(Block { start, open_end, inner_end, end })
        }
        None => Some(Block { start, open_end, inner_end: limit, end: limit }),
    }
}

/// End `block` where the next sibling opens, for elements whose closing tag
/// was omitted (`<tr>` and `<td>` commonly are).
pub fn end_at_next_sibling(lower: &str, block: &mut Block, siblings: &[&str]) {
    let next = siblings
        .iter()
        .filter_map(|tag| find_open(lower, tag, block.open_end, block.inner_end))
        .min();
    if let Some(next) = next {
        block.inner_end = next;
        block.end = next;
    }
}

/// Value of attribute `name` in an opening tag, if present.
pub fn attr(open_tag: &str, name: &str) -> Option<String> {
    let lower = open_tag.to_ascii_lowercase();
    let pat = format!("{name}=");
    let mut pos = 0;
    let at = loop {
        let at = pos + lower[pos..].find(&pat)?;
        let preceded_by_space = at > 0 && lower.as_bytes()[at - 1].is_ascii_whitespace();
        if preceded_by_space {
            break at;
        }
        pos = at + pat.len();
    };

    let value = &open_tag[at + pat.len()..];
    let value = match value.chars().next()? {
        q @ ('"' | '\'') => {
            let rest = &value[1..];
            &rest[..rest.find(q)?]
        }
        _ => {
            let end = value
                .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
                .unwrap_or(value.len());
            &value[..end]
        }
    };
    Some(value.to_string())
}

/// Drop everything between `<` and `>`.
pub fn strip_tags(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;
    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "nbsp" => Some(' '),
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Decode named and numeric character references. Unknown ones are kept verbatim.
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp + 1..];
        let decoded = tail
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&tail[..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &tail[semi + 1..];
            }
            None => {
                out.push('&');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Collapse whitespace runs to one space and trim both ends.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Visible text of an element's inner HTML.
pub fn text(inner: &str) -> String {
    normalize_ws(&decode_entities(&strip_tags(inner)))
}
