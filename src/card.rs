//! Card identity types.
//!
//! A recognized card is a value symbol plus a suit/color category. Number
//! cards only carry a color (red or black); face cards carry a concrete suit
//! because they stack by suit rather than by color.

use std::fmt;

/// Card value symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Value {
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    /// Face card (jack/queen/king — interchangeable for stacking).
    Face,
    /// Sentinel for a capture that matched nothing.
    Unknown,
}

impl Value {
    /// Single-character form used in the two-character card id.
    /// Ten is written `0` so every id stays two characters wide.
    pub fn as_char(self) -> char {
        match self {
            Value::Six => '6',
            Value::Seven => '7',
            Value::Eight => '8',
            Value::Nine => '9',
            Value::Ten => '0',
            Value::Face => 'F',
            Value::Unknown => '?',
        }
    }

    /// Decodes the value character of a reference image name.
    ///
    /// Reference images name face cards `H` (head); recognized cards render
    /// the same value as `F`, and both decode to [`Value::Face`].
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '6' => Some(Value::Six),
            '7' => Some(Value::Seven),
            '8' => Some(Value::Eight),
            '9' => Some(Value::Nine),
            '0' => Some(Value::Ten),
            'H' | 'F' => Some(Value::Face),
            _ => None,
        }
    }
}

/// Suit or color category.
///
/// Number cards are recognized by color only (`Red`/`Black`); face cards by
/// their suit glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Suit {
    Heart,
    Diamond,
    Club,
    Spade,
    Red,
    Black,
    Unknown,
}

impl Suit {
    pub fn as_char(self) -> char {
        match self {
            Suit::Heart => 'H',
            Suit::Diamond => 'D',
            Suit::Club => 'C',
            Suit::Spade => 'S',
            Suit::Red => 'R',
            Suit::Black => 'B',
            Suit::Unknown => '?',
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'H' => Some(Suit::Heart),
            'D' => Some(Suit::Diamond),
            'C' => Some(Suit::Club),
            'S' => Some(Suit::Spade),
            'R' => Some(Suit::Red),
            'B' => Some(Suit::Black),
            _ => None,
        }
    }
}

/// One recognized card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Card {
    pub value: Value,
    pub suit: Suit,
}

impl Card {
    /// Sentinel returned when exact matching finds no reference.
    pub const UNKNOWN: Card = Card {
        value: Value::Unknown,
        suit: Suit::Unknown,
    };

    pub fn new(value: Value, suit: Suit) -> Self {
        Self { value, suit }
    }

    /// Two-character identifier: value char followed by suit char.
    pub fn id(&self) -> String {
        let mut id = String::with_capacity(2);
        id.push(self.value.as_char());
        id.push(self.suit.as_char());
        id
    }

    /// Combines a classified glyph name (`6`..`10`, `C`, `D`, `H`, `S`) with
    /// the independently classified color flag into a card.
    ///
    /// Number glyphs take the color as their category; suit glyphs mean a
    /// face card of that suit, where the color flag carries no extra
    /// information.
    pub fn from_glyph(name: &str, is_red: bool) -> Card {
        let color = if is_red { Suit::Red } else { Suit::Black };
        match name {
            "6" => Card::new(Value::Six, color),
            "7" => Card::new(Value::Seven, color),
            "8" => Card::new(Value::Eight, color),
            "9" => Card::new(Value::Nine, color),
            "10" => Card::new(Value::Ten, color),
            "C" => Card::new(Value::Face, Suit::Club),
            "D" => Card::new(Value::Face, Suit::Diamond),
            "H" => Card::new(Value::Face, Suit::Heart),
            "S" => Card::new(Value::Face, Suit::Spade),
            _ => Card::UNKNOWN,
        }
    }

    pub fn is_face(&self) -> bool {
        self.value == Value::Face
    }

    pub fn is_number(&self) -> bool {
        !matches!(self.value, Value::Face | Value::Unknown)
    }

    pub fn is_red(&self) -> bool {
        self.suit == Suit::Red
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.as_char(), self.suit.as_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_concatenates_value_and_suit() {
        assert_eq!(Card::new(Value::Six, Suit::Red).id(), "6R");
        assert_eq!(Card::new(Value::Ten, Suit::Black).id(), "0B");
        assert_eq!(Card::new(Value::Face, Suit::Spade).id(), "FS");
        assert_eq!(Card::UNKNOWN.id(), "??");
    }

    #[test]
    fn test_from_glyph_numbers_take_color() {
        assert_eq!(
            Card::from_glyph("7", true),
            Card::new(Value::Seven, Suit::Red)
        );
        assert_eq!(
            Card::from_glyph("10", false),
            Card::new(Value::Ten, Suit::Black)
        );
    }

    #[test]
    fn test_from_glyph_suits_mean_face_cards() {
        let card = Card::from_glyph("S", true);
        assert_eq!(card, Card::new(Value::Face, Suit::Spade));
        assert!(card.is_face());
        assert!(!card.is_red());
    }

    #[test]
    fn test_from_glyph_unrecognized_is_unknown() {
        assert_eq!(Card::from_glyph("J", false), Card::UNKNOWN);
    }

    #[test]
    fn test_predicates() {
        let number = Card::new(Value::Eight, Suit::Red);
        assert!(number.is_number());
        assert!(!number.is_face());
        assert!(number.is_red());

        let face = Card::new(Value::Face, Suit::Heart);
        assert!(face.is_face());
        assert!(!face.is_number());
        assert!(!face.is_red());

        assert!(!Card::UNKNOWN.is_number());
        assert!(!Card::UNKNOWN.is_face());
    }

    #[test]
    fn test_value_chars_round_trip() {
        for value in [Value::Six, Value::Seven, Value::Eight, Value::Nine, Value::Ten] {
            assert_eq!(Value::from_char(value.as_char()), Some(value));
        }
        // Face decodes from both the reference-image form and the id form.
        assert_eq!(Value::from_char('H'), Some(Value::Face));
        assert_eq!(Value::from_char('F'), Some(Value::Face));
        assert_eq!(Value::from_char('X'), None);
    }
}
