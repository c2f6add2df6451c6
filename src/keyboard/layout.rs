use crate::hotkey::combo::KeyToken;

/// One key cap on the on-screen keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyCap {
    pub token: KeyToken,
    /// Width in cells, including the cap brackets.
    pub width: u16,
}

const fn cap(token: KeyToken) -> KeyCap {
    KeyCap { token, width: 5 }
}

const fn wide(token: KeyToken, width: u16) -> KeyCap {
    KeyCap { token, width }
}

const fn ch(c: char) -> KeyCap {
    cap(KeyToken::Char(c))
}

/// ANSI layout shown under the trainer, row by row.
pub const ROWS: &[&[KeyCap]] = &[
    &[
        ch('`'),
        ch('1'),
        ch('2'),
        ch('3'),
        ch('4'),
        ch('5'),
        ch('6'),
        ch('7'),
        ch('8'),
        ch('9'),
        ch('0'),
        ch('-'),
        ch('='),
        wide(KeyToken::Backspace, 8),
    ],
    &[
        wide(KeyToken::Tab, 7),
        ch('q'),
        ch('w'),
        ch('e'),
        ch('r'),
        ch('t'),
        ch('y'),
        ch('u'),
        ch('i'),
        ch('o'),
        ch('p'),
        ch('['),
        ch(']'),
        ch('\\'),
    ],
    &[
        wide(KeyToken::Caps, 8),
        ch('a'),
        ch('s'),
        ch('d'),
        ch('f'),
        ch('g'),
        ch('h'),
        ch('j'),
        ch('k'),
        ch('l'),
        ch(';'),
        ch('\''),
        wide(KeyToken::Enter, 8),
    ],
    &[
        wide(KeyToken::Shift, 10),
        ch('z'),
        ch('x'),
        ch('c'),
        ch('v'),
        ch('b'),
        ch('n'),
        ch('m'),
        ch(','),
        ch('.'),
        ch('/'),
        wide(KeyToken::Shift, 10),
    ],
    &[
        wide(KeyToken::Ctrl, 7),
        wide(KeyToken::Cmd, 6),
        wide(KeyToken::Alt, 6),
        wide(KeyToken::Space, 28),
        wide(KeyToken::Alt, 6),
        wide(KeyToken::Cmd, 6),
        wide(KeyToken::Menu, 7),
        wide(KeyToken::Ctrl, 7),
    ],
];

/// Unshifted/shifted pairs of the US number and punctuation keys.
const SHIFT_PAIRS: &[(char, char)] = &[
    ('`', '~'),
    ('1', '!'),
    ('2', '@'),
    ('3', '#'),
    ('4', '$'),
    ('5', '%'),
    ('6', '^'),
    ('7', '&'),
    ('8', '*'),
    ('9', '('),
    ('0', ')'),
    ('-', '_'),
    ('=', '+'),
    ('[', '{'),
    (']', '}'),
    ('\\', '|'),
    (';', ':'),
    ('\'', '"'),
    (',', '<'),
    ('.', '>'),
    ('/', '?'),
];

/// Map a character to the physical key that produces it unshifted.
/// Letters are lower-cased; unknown characters pass through.
pub fn base_char(ch: char) -> char {
    if ch.is_ascii_uppercase() {
        return ch.to_ascii_lowercase();
    }
    SHIFT_PAIRS
        .iter()
        .find(|&&(_, shifted)| shifted == ch)
        .map(|&(base, _)| base)
        .unwrap_or(ch)
}

/// Total row width in cells, used to center the diagram.
pub fn row_width(row: &[KeyCap]) -> u16 {
    row.iter().map(|k| k.width).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_char_unshifts_symbols() {
        assert_eq!(base_char('!'), '1');
        assert_eq!(base_char('?'), '/');
        assert_eq!(base_char('"'), '\'');
        assert_eq!(base_char('Q'), 'q');
        assert_eq!(base_char('q'), 'q');
    }

    #[test]
    fn test_base_char_leaves_unknown_alone() {
        assert_eq!(base_char('ж'), 'ж');
    }

    #[test]
    fn test_layout_has_every_catalog_letter() {
        for letter in ['s', 'c', 'v', 'x', 'f', 'a', 'z'] {
            assert!(
                ROWS.iter()
                    .flat_map(|row| row.iter())
                    .any(|k| k.token == KeyToken::Char(letter)),
                "missing key {letter}"
            );
        }
    }

    #[test]
    fn test_both_ctrl_keys_share_one_token() {
        let ctrl_caps = ROWS
            .iter()
            .flat_map(|row| row.iter())
            .filter(|k| k.token == KeyToken::Ctrl)
            .count();
        assert_eq!(ctrl_caps, 2);
    }
}
