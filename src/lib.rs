//! Server-authoritative engine for a two-player lane-based card game.
//!
//! Two players contest nine lanes by placing troop cards. A side of a lane
//! holding three cards forms a formation; the stronger formation may claim
//! the lane once no remaining card could let the opponent catch up.
//!
//! - [`cards`] — suits, cards, decks and formation ranking
//! - [`gameplay`] — lanes, claim look-ahead and the turn state machine
//! - [`gameroom`] — one serialized coordinator per match
//! - [`hosting`] — session registry, websocket bridge and HTTP handlers

pub mod cards;
pub mod gameplay;
#[cfg(feature = "server")]
pub mod gameroom;
#[cfg(feature = "server")]
pub mod hosting;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Player slot index (0 or 1).
pub type Seat = usize;
/// Face value of a troop card (1 through 10).
pub type Value = u8;
/// Formation rank in the hundreds digit, card sum below it.
pub type Strength = u32;
/// Milliseconds since the unix epoch.
pub type Timestamp = u64;

// ============================================================================
// GAME PARAMETERS
// ============================================================================
/// Players per match.
pub const SEATS: usize = 2;
/// Contested lanes on the board.
pub const LANES: usize = 9;
/// Cards per side of a lane.
pub const SIDE: usize = 3;
/// Cards dealt to each player at match start.
pub const HAND: usize = 7;
/// Distinct troop suits.
pub const SUITS: usize = 6;
/// Distinct troop values per suit.
pub const VALUES: usize = 10;
/// Size of the full troop deck.
pub const TROOPS: usize = SUITS * VALUES;

/// Nickname given to clients that did not pick one.
pub const DEFAULT_NICKNAME: &str = "Client";
/// Longest nickname kept, in characters.
pub const MAX_NICKNAME: usize = 24;

/// Opponent of the given seat.
pub fn opponent(seat: Seat) -> Seat {
    1 - seat
}

/// Current wall clock time.
pub fn now() -> Timestamp {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as Timestamp)
        .unwrap_or_default()
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over uuid::Uuid.
pub struct ID<T> {
    inner: uuid::Uuid,
    marker: PhantomData<T>,
}

impl<T> From<uuid::Uuid> for ID<T> {
    fn from(inner: uuid::Uuid) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> TryFrom<&str> for ID<T> {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        uuid::Uuid::parse_str(s.trim())
            .map(Self::from)
            .map_err(|e| anyhow::anyhow!("invalid id {:?}: {}", s, e))
    }
}

impl<T> Default for ID<T> {
    fn default() -> Self {
        Self::from(uuid::Uuid::now_v7())
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

impl<T> serde::Serialize for ID<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.inner.serialize(serializer)
    }
}

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Terminal logging at `level`, plus a full DEBUG trace of every session
/// in `logs/battleline-<unix seconds>.log`. Actix's own worker chatter is
/// kept out of both.
#[cfg(feature = "server")]
pub fn log(level: log::LevelFilter) -> anyhow::Result<()> {
    std::fs::create_dir_all("logs")?;
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .add_filter_ignore_str("actix_server")
        .add_filter_ignore_str("mio")
        .build();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(logfile(now() / 1000))?,
    );
    let term = simplelog::TermLogger::new(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file])?;
    Ok(())
}

#[cfg(feature = "server")]
fn logfile(seconds: Timestamp) -> String {
    format!("logs/battleline-{}.log", seconds)
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
/// Sessions are memory-only, so there is nothing to flush.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!();
            log::warn!("interrupt received, exiting immediately");
            std::process::exit(0);
        }
    });
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;

    #[test]
    fn ids_parse_back() {
        let id = ID::<()>::default();
        assert_eq!(ID::<()>::try_from(id.to_string().as_str()).unwrap(), id);
        assert!(ID::<()>::try_from("not-a-uuid").is_err());
    }

    #[test]
    fn logfiles_are_named_by_server_and_time() {
        assert_eq!(logfile(1_700_000_000), "logs/battleline-1700000000.log");
    }
}
