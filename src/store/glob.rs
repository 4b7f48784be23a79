//! Redis-style glob matching used by the in-process store's key listing.
//!
//! Supports `*`, `?`, `[abc]`, `[a-z]`, `[^a]` and `\` escapes.

/// Returns true when `text` matches the glob `pattern`.
///
/// Runs in `O(pattern * text)`: only the most recent `*` is kept as a
/// backtrack point, since an earlier star can never need to absorb more.
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    // (pattern index after the last star, text index it currently absorbs up to)
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if pattern.get(p) == Some(&'*') {
            p += 1;
            backtrack = Some((p, t));
            continue;
        }
        if let Some(next) = match_single(&pattern, p, text[t]) {
            p = next;
            t += 1;
            continue;
        }
        match backtrack {
            Some((star_p, star_t)) => {
                p = star_p;
                t = star_t + 1;
                backtrack = Some((star_p, t));
            }
            None => return false,
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// Matches the single-character token at `p` against `ch`.
///
/// Returns the index just past the token on success.
fn match_single(pattern: &[char], p: usize, ch: char) -> Option<usize> {
    match pattern.get(p)? {
        '?' => Some(p + 1),
        '[' => match class_end(&pattern[p + 1..]) {
            Some(end) => class_match(&pattern[p + 1..p + 1 + end], ch).then_some(p + 2 + end),
            None => (ch == '[').then_some(p + 1),
        },
        '\\' if p + 1 < pattern.len() => (pattern[p + 1] == ch).then_some(p + 2),
        &c => (c == ch).then_some(p + 1),
    }
}

/// Index of the closing `]`, skipping escaped characters.
fn class_end(class: &[char]) -> Option<usize> {
    let mut i = 0;
    while i < class.len() {
        match class[i] {
            '\\' => i += 2,
            ']' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn class_match(class: &[char], ch: char) -> bool {
    let (negate, class) = match class {
        ['^', rest @ ..] => (true, rest),
        _ => (false, class),
    };

    let mut found = false;
    let mut i = 0;
    while i < class.len() {
        if class[i] == '\\' && i + 1 < class.len() {
            found |= class[i + 1] == ch;
            i += 2;
        } else if i + 2 < class.len() && class[i + 1] == '-' {
            let (lo, hi) = if class[i] <= class[i + 2] {
                (class[i], class[i + 2])
            } else {
                (class[i + 2], class[i])
            };
            found |= lo <= ch && ch <= hi;
            i += 3;
        } else {
            found |= class[i] == ch;
            i += 1;
        }
    }

    found != negate
}
