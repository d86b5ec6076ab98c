use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    #[default]
    Red = 0,
    Green = 1,
    Blue = 2,
    Purple = 3,
    Yellow = 4,
    Orange = 5,
}

impl Suit {
    pub const fn all() -> [Self; crate::SUITS] {
        [
            Suit::Red,
            Suit::Green,
            Suit::Blue,
            Suit::Purple,
            Suit::Yellow,
            Suit::Orange,
        ]
    }
}

impl From<Suit> for u8 {
    fn from(s: Suit) -> u8 {
        s as u8
    }
}
impl TryFrom<u8> for Suit {
    type Error = String;
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Self::all()
            .get(n as usize)
            .copied()
            .ok_or_else(|| format!("invalid suit index {}", n))
    }
}

/// single uppercase letter, first of the color name
impl TryFrom<char> for Suit {
    type Error = String;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'R' => Ok(Suit::Red),
            'G' => Ok(Suit::Green),
            'B' => Ok(Suit::Blue),
            'P' => Ok(Suit::Purple),
            'Y' => Ok(Suit::Yellow),
            'O' => Ok(Suit::Orange),
            _ => Err(format!("invalid suit char {:?}", c)),
        }
    }
}

impl std::fmt::Display for Suit {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Suit::Red => "red",
                Suit::Green => "green",
                Suit::Blue => "blue",
                Suit::Purple => "purple",
                Suit::Yellow => "yellow",
                Suit::Orange => "orange",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bijective_u8() {
        for suit in Suit::all() {
            assert_eq!(Suit::try_from(u8::from(suit)), Ok(suit));
        }
        assert!(Suit::try_from(6u8).is_err());
    }

    #[test]
    fn lowercase_on_the_wire() {
        assert_eq!(serde_json::to_string(&Suit::Purple).unwrap(), "\"purple\"");
    }
}
