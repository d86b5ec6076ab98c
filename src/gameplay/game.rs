use super::*;
use crate::Seat;
use crate::cards::*;
use rand::Rng;

/// Authoritative state of one match and its turn state machine.
///
/// Placement -> Claim -> Draw, then the turn passes to the opponent.
/// A placement that leaves nothing to claim skips straight to Draw.
/// There is no terminal state: the match runs until the session closes.
///
/// The 60 troops are always partitioned across the troop deck, both hands,
/// and the lane sides. Moves only ever relocate a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    troops: Deck,
    lanes: [Lane; crate::LANES],
    hands: [Deck; crate::SEATS],
    active: Seat,
    phase: Phase,
}

impl Game {
    /// Fresh match: shuffled troops, random first player, seven cards each.
    pub fn root() -> Self {
        let active = rand::rng().random_range(0..crate::SEATS);
        Self::deal(Deck::new().shuffle(), active)
    }

    /// Deal round-robin, one card at a time, from the top of the given deck.
    pub fn deal(deck: Deck, active: Seat) -> Self {
        let mut troops = deck;
        let mut hands: [Deck; crate::SEATS] = Default::default();
        for _ in 0..crate::HAND {
            for hand in hands.iter_mut() {
                if let Ok((rest, card)) = troops.pop() {
                    *hand = hand.push(card);
                    troops = rest;
                }
            }
        }
        Self {
            troops,
            hands,
            active,
            lanes: Default::default(),
            phase: Phase::Placement,
        }
    }

    pub fn active(&self) -> Seat {
        self.active
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn troops(&self) -> &Deck {
        &self.troops
    }
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }
    pub fn hand(&self, seat: Seat) -> &Deck {
        &self.hands[seat]
    }
    /// cards not yet placed in any lane
    pub fn unplayed(&self) -> Deck {
        self.troops.concat(&self.hands[0]).concat(&self.hands[1])
    }
    /// lanes whose cached flag says the active player may claim them
    pub fn claimable(&self) -> Vec<usize> {
        self.lanes
            .iter()
            .enumerate()
            .filter(|(_, lane)| lane.is_claimable())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn view(&self, seat: Seat) -> View {
        View {
            active_player: self.active,
            turn_phase: self.phase,
            lanes: self.lanes.to_vec(),
            hand: self.hands[seat].clone(),
            troop_deck_size: self.troops.len(),
            opponent_hand_size: self.hands[crate::opponent(seat)].len(),
        }
    }
}

impl Game {
    /// Validate, then execute. Nothing changes when validation fails.
    pub fn apply(&mut self, seat: Seat, m: Move) -> Result<(), MoveError> {
        self.validate(seat, &m)?;
        self.execute(seat, m);
        Ok(())
    }

    pub fn validate(&self, seat: Seat, m: &Move) -> Result<(), MoveError> {
        if seat != self.active {
            return Err(MoveError::NotYourTurn);
        }
        match *m {
            Move::Place(card, lane) => {
                self.expect(Phase::Placement)?;
                if !self.hands[seat].contains(&card) {
                    return Err(MoveError::CardNotInHand);
                }
                match self.lanes.get(lane) {
                    None => Err(MoveError::LaneOutOfRange),
                    Some(l) if l.is_claimed() => Err(MoveError::LaneClaimed),
                    Some(l) if !l.accepts(seat) => Err(MoveError::LaneFull),
                    Some(_) => Ok(()),
                }
            }
            Move::Claim(lane) => {
                self.expect(Phase::Claim)?;
                match self.lanes.get(lane) {
                    None => Err(MoveError::LaneOutOfRange),
                    Some(l) if l.is_claimed() => Err(MoveError::LaneClaimed),
                    Some(l) if !l.is_claimable() => Err(MoveError::NotClaimable),
                    Some(_) => Ok(()),
                }
            }
            Move::Draw => {
                self.expect(Phase::Draw)?;
                match self.troops.is_empty() {
                    true => Err(MoveError::EmptyDeck),
                    false => Ok(()),
                }
            }
        }
    }

    fn expect(&self, phase: Phase) -> Result<(), MoveError> {
        match self.phase == phase {
            true => Ok(()),
            false => Err(MoveError::WrongPhase {
                expected: phase,
                actual: self.phase,
            }),
        }
    }

    /// Only reached with a validated move.
    fn execute(&mut self, seat: Seat, m: Move) {
        match m {
            Move::Place(card, lane) => {
                let found = self.hands[seat].find(&card);
                debug_assert!(found.is_some(), "placement of {} passed validation", card);
                let Some(index) = found else {
                    log::error!("[game] validated placement of {} missing from hand", card);
                    return;
                };
                self.hands[seat] = self.hands[seat].remove_at(index);
                self.lanes[lane].place(seat, card);
                self.refresh(seat);
                if self.claimable().is_empty() {
                    self.advance();
                }
            }
            Move::Claim(lane) => {
                self.lanes[lane].claim(seat);
            }
            Move::Draw => {
                let drawn = self.troops.pop();
                debug_assert!(drawn.is_ok(), "draw from an empty troop deck passed validation");
                let Ok((rest, card)) = drawn else {
                    log::error!("[game] validated draw from an empty troop deck");
                    return;
                };
                self.troops = rest;
                self.hands[seat] = self.hands[seat].push(card);
            }
        }
        self.advance();
    }

    /// Recompute every lane's claimable flag with respect to the seat.
    fn refresh(&mut self, seat: Seat) {
        let unplayed = self.unplayed();
        let look = Lookahead::from(unplayed.cards());
        let flags = self
            .lanes
            .iter()
            .map(|lane| look.claimable(lane, seat))
            .collect::<Vec<_>>();
        self.lanes
            .iter_mut()
            .zip(flags)
            .for_each(|(lane, flag)| lane.cache(flag));
    }

    fn advance(&mut self) {
        match self.phase.next() {
            Some(phase) => self.phase = phase,
            None => {
                self.phase = Phase::Placement;
                self.active = crate::opponent(self.active);
            }
        }
    }
}
