use super::card::Card;
use super::suit::Suit;
use crate::Strength;
use crate::Value;
use rand::Rng;
use serde::Deserialize;
use serde::Serialize;

/// Failure to take a card from an empty sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckError {
    EmptyDeck,
}

impl std::fmt::Display for DeckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDeck => write!(f, "deck is empty"),
        }
    }
}

impl std::error::Error for DeckError {}

/// Ordered sequence of cards. The last card is the top of the deck.
///
/// Every operation hands back a new Deck rather than mutating in place,
/// so a state transition is always an explicit reassignment by the owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Deck(Vec<Card>);

impl Deck {
    /// All 60 troops, one of each (suit, value), suit-major.
    pub fn new() -> Self {
        Suit::all()
            .into_iter()
            .flat_map(|suit| (1..=crate::VALUES as Value).map(move |v| Card::from((suit, v))))
            .collect()
    }
    pub fn empty() -> Self {
        Self(Vec::new())
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn cards(&self) -> &[Card] {
        &self.0
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.0.iter()
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0.contains(card)
    }

    /// uniform permutation using the thread-local rng
    pub fn shuffle(&self) -> Self {
        self.shuffle_with(&mut rand::rng())
    }
    /// Fisher-Yates from the last index down to 1
    pub fn shuffle_with<R>(&self, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut cards = self.0.clone();
        for i in (1..cards.len()).rev() {
            let j = rng.random_range(0..=i);
            cards.swap(i, j);
        }
        Self(cards)
    }

    /// remove the top card
    pub fn pop(&self) -> Result<(Self, Card), DeckError> {
        match self.0.split_last() {
            Some((card, rest)) => Ok((Self(rest.to_vec()), *card)),
            None => Err(DeckError::EmptyDeck),
        }
    }
    /// place a card on top
    pub fn push(&self, card: Card) -> Self {
        let mut cards = self.0.clone();
        cards.push(card);
        Self(cards)
    }
    /// excise the card at index, keeping the relative order of the rest.
    /// out of range indices leave the deck untouched.
    pub fn remove_at(&self, index: usize) -> Self {
        if index >= self.0.len() {
            return self.clone();
        }
        self.0
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, c)| *c)
            .collect()
    }
    pub fn find(&self, card: &Card) -> Option<usize> {
        self.0.iter().position(|c| c == card)
    }
    pub fn concat(&self, other: &Self) -> Self {
        self.0.iter().chain(other.0.iter()).copied().collect()
    }

    /// stable, ascending by value
    pub fn sort_by_rank(&self) -> Self {
        let mut cards = self.0.clone();
        cards.sort_by_key(|c| c.value());
        Self(cards)
    }
    /// stable, suit-major then value
    pub fn sort_by_suit(&self) -> Self {
        let mut cards = self.0.clone();
        cards.sort_by_key(|c| c.suit_sorting_value());
        Self(cards)
    }
    /// sum of face values
    pub fn total(&self) -> Strength {
        self.0.iter().map(|c| Strength::from(c.value())).sum()
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards)
    }
}
impl From<Deck> for Vec<Card> {
    fn from(deck: Deck) -> Self {
        deck.0
    }
}
impl FromIterator<Card> for Deck {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cards = self.0.iter().map(|c| c.to_string()).collect::<Vec<_>>();
        write!(f, "{}", cards.join(", "))
    }
}
