use super::lane::Lane;
use crate::Seat;
use crate::Strength;
use crate::cards::*;

/// Decides whether a lane may be claimed, looking ahead over every card
/// that has not yet been placed (troop deck plus both hands).
///
/// When the opponent's side is still open, the search tries to complete it
/// with each include/exclude choice over the unplayed pool. The include
/// branch stops once the side holds three cards, so with `k` open slots and
/// `n` unplayed cards the search touches O(n^(k+1)) nodes rather than 2^n.
/// With at most 3 open slots and 60 troops that stays in the hundreds of
/// thousands of nodes for a lane, and the strict-inequality cutoff below
/// usually ends it far sooner.
pub struct Lookahead<'a> {
    pool: &'a [Card],
}

impl<'a> From<&'a [Card]> for Lookahead<'a> {
    fn from(pool: &'a [Card]) -> Self {
        Self { pool }
    }
}

impl Lookahead<'_> {
    /// Claimable when the lane is open, the seat's side is complete, and the
    /// opponent cannot reach (or already has) a strength at least as high.
    pub fn claimable(&self, lane: &Lane, seat: Seat) -> bool {
        if lane.is_claimed() || !lane.is_complete(seat) {
            return false;
        }
        let ours = lane.strength(seat);
        let other = crate::opponent(seat);
        if lane.is_complete(other) {
            return ours > lane.strength(other);
        }
        let ref mut side = lane.side(other).cards().to_vec();
        !Self::threatens(side, self.pool, ours)
    }

    /// Best strength the side can reach by adding cards from the pool,
    /// stopping at three cards or when the pool runs out.
    pub fn best(side: &[Card], pool: &[Card]) -> Strength {
        Self::search(&mut side.to_vec(), pool)
    }

    fn search(side: &mut Vec<Card>, pool: &[Card]) -> Strength {
        match pool.split_first() {
            _ if side.len() >= crate::SIDE => Formation::strength(side),
            None => Formation::strength(side),
            Some((card, rest)) => {
                side.push(*card);
                let with = Self::search(side, rest);
                side.pop();
                let without = Self::search(side, rest);
                with.max(without)
            }
        }
    }

    /// Whether some completion reaches `target`. Same answer as
    /// `best(side, pool) >= target`, but returns on the first witness.
    fn threatens(side: &mut Vec<Card>, pool: &[Card], target: Strength) -> bool {
        match pool.split_first() {
            _ if side.len() >= crate::SIDE => Formation::strength(side) >= target,
            None => Formation::strength(side) >= target,
            Some((card, rest)) => {
                side.push(*card);
                let with = Self::threatens(side, rest, target);
                side.pop();
                with || Self::threatens(side, rest, target)
            }
        }
    }
}
