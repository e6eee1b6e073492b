use crate::models::{PlayerEntry, Session};

/// In-memory list of sessions, keyed by their date string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStore {
    sessions: Vec<Session>,
}

impl SessionStore {
    pub fn new(sessions: Vec<Session>) -> Self {
        Self { sessions }
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn find(&self, date: &str) -> Option<&Session> {
        self.sessions.iter().find(|session| session.date == date)
    }

    /// Records `player`'s result for `date`, creating the session if needed
    /// and replacing any earlier entry for the same player.
    pub fn upsert_entry(&mut self, date: &str, player: &str, starting: i64, ending: i64) -> &Session {
        let entry = PlayerEntry::new(player, starting, ending);
        let index = match self.sessions.iter().position(|session| session.date == date) {
            Some(index) => index,
            None => {
                let id = self.next_id();
                self.sessions.push(Session::new(Some(id), date));
                self.sessions.len() - 1
            }
        };

        let session = &mut self.sessions[index];
        match session.players.iter_mut().find(|existing| existing.player == player) {
            Some(existing) => *existing = entry,
            None => session.players.push(entry),
        }
        &self.sessions[index]
    }

    pub fn delete_session(&mut self, date: &str) -> Option<Session> {
        let index = self.sessions.iter().position(|session| session.date == date)?;
        Some(self.sessions.remove(index))
    }

    pub fn clear(&mut self) {
        self.sessions.clear();
    }

    pub fn replace_all(&mut self, sessions: Vec<Session>) {
        self.sessions = sessions;
    }

    fn next_id(&self) -> u64 {
        self.sessions
            .iter()
            .filter_map(|session| session.id)
            .max()
            .map_or(1, |id| id.saturating_add(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upsert_replaces_existing_player_entry() {
        let mut store = SessionStore::default();
        store.upsert_entry("2024-03-01", "Papa", 1000, 1200);
        let session = store.upsert_entry("2024-03-01", "Papa", 1000, 800);

        assert_eq!(session.players.len(), 1);
        assert_eq!(session.players[0], PlayerEntry::new("Papa", 1000, 800));
        assert_eq!(store.sessions().len(), 1);
    }

    #[test]
    fn bare_year_and_iso_date_are_distinct_sessions() {
        let mut store = SessionStore::default();
        store.upsert_entry("2023", "Papa", 1000, 1100);
        store.upsert_entry("2023-05-05", "Papa", 1000, 900);
        assert_eq!(store.sessions().len(), 2);
    }

    #[test]
    fn new_sessions_get_increasing_ids() {
        let mut loaded = Session::new(Some(7), "2022-01-01");
        loaded.players.push(PlayerEntry::new("Mama", 1000, 1000));
        let mut store = SessionStore::new(vec![loaded, Session::new(None, "2021")]);

        let id = store.upsert_entry("2024-01-01", "Papa", 1000, 1000).id;
        assert_eq!(id, Some(8));
        let id = store.upsert_entry("2024-01-02", "Papa", 1000, 1000).id;
        assert_eq!(id, Some(9));
    }

    #[test]
    fn delete_removes_only_that_date() {
        let mut store = SessionStore::default();
        store.upsert_entry("2024-01-01", "Papa", 1000, 1100);
        store.upsert_entry("2024-01-08", "Mama", 1000, 900);
        store.upsert_entry("2024-01-15", "Papa", 1000, 1300);
        let before = store.clone();

        let removed = store.delete_session("2024-01-08").expect("session removed");
        assert_eq!(removed.date, "2024-01-08");
        assert_eq!(store.sessions().len(), 2);
        assert_eq!(store.find("2024-01-01"), before.find("2024-01-01"));
        assert_eq!(store.find("2024-01-15"), before.find("2024-01-15"));
        assert!(store.delete_session("2024-01-08").is_none());
    }
}
