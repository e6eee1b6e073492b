use serde::{Deserialize, Serialize};

/// Chips every player buys in with when an entry does not say otherwise.
pub const STARTING_CHIPS: i64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub date: String,
    pub players: Vec<PlayerEntry>,
}

impl Session {
    pub fn new(id: Option<u64>, date: impl Into<String>) -> Self {
        Self {
            id,
            date: date.into(),
            players: Vec::new(),
        }
    }
}

/// One player's result in a session. `net` is derived from the chip counts
/// and any `net` present in incoming JSON is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawPlayerEntry")]
pub struct PlayerEntry {
    pub player: String,
    pub starting: i64,
    pub ending: i64,
    pub net: i64,
}

impl PlayerEntry {
    pub fn new(player: impl Into<String>, starting: i64, ending: i64) -> Self {
        Self {
            player: player.into(),
            starting,
            ending,
            net: ending - starting,
        }
    }
}

#[derive(Deserialize)]
struct RawPlayerEntry {
    player: String,
    #[serde(default = "default_starting")]
    starting: i64,
    ending: i64,
}

impl From<RawPlayerEntry> for PlayerEntry {
    fn from(raw: RawPlayerEntry) -> Self {
        PlayerEntry::new(raw.player, raw.starting, raw.ending)
    }
}

fn default_starting() -> i64 {
    STARTING_CHIPS
}

#[derive(Debug, Deserialize)]
pub struct EntryRequest {
    pub date: String,
    pub player: String,
    pub starting: Option<i64>,
    pub ending: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    pub win: u32,
    pub loss: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Gold,
    Silver,
    Bronze,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingRow {
    pub rank: usize,
    pub display_rank: usize,
    pub badge: Option<Badge>,
    pub player: String,
    pub total: i64,
    pub chips: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerTotal {
    pub player: String,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: String,
    pub players: Vec<PlayerTotal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreakRow {
    pub player: String,
    pub win: u32,
    pub loss: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryCard {
    pub id: Option<u64>,
    pub date: String,
    pub label: String,
    pub players: Vec<PlayerEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardResponse {
    pub standings: Vec<StandingRow>,
    pub yearly: Vec<YearSummary>,
    pub streaks: Vec<StreakRow>,
    pub history: Vec<HistoryCard>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EntryResponse {
    pub saved: bool,
    pub board: BoardResponse,
}
