//! Start / guess / state operations over injected collaborators
//!
//! Each call is a read-modify-write against the session store:
//! load the session, mutate it in memory, write it back. Every check runs
//! before the write, so a failed call never leaves a partial update behind.

use crate::core::Word;
use crate::game::{
    BOARD_COUNT, GameMode, GameState, GuessResult, InvalidMode, MAX_GUESSES, Session, TargetError,
    daily_seed, random_seed, resolve_targets, seconds_until_midnight_utc, session_ttl,
};
use crate::store::{NoTargetCache, SessionStore, StoreError, TargetCache, WordStore, session_key};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Broad class of a [`GameError`], for the outer request layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed mode or guess; nothing changed
    Input,
    /// Missing or unknown token; nothing changed
    Auth,
    /// Guess against a finished session; nothing changed
    StateConflict,
    /// The word store cannot supply a full target set; no session created
    DataSufficiency,
    /// A collaborator failed; nothing persisted
    Upstream,
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    InvalidMode(#[from] InvalidMode),
    #[error("Invalid guess")]
    InvalidGuess(String),
    #[error("Missing token")]
    MissingToken,
    #[error("Session not found")]
    SessionNotFound,
    #[error("Game over")]
    GameOver,
    #[error("Insufficient words: {0}")]
    InsufficientWords(String),
    #[error("Upstream failure: {0}")]
    Upstream(#[from] StoreError),
}

impl GameError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidMode(_) | Self::InvalidGuess(_) => ErrorKind::Input,
            Self::MissingToken | Self::SessionNotFound => ErrorKind::Auth,
            Self::GameOver => ErrorKind::StateConflict,
            Self::InsufficientWords(_) => ErrorKind::DataSufficiency,
            Self::Upstream(_) => ErrorKind::Upstream,
        }
    }
}

impl From<TargetError> for GameError {
    fn from(err: TargetError) -> Self {
        match err {
            TargetError::Store(store) => Self::Upstream(store),
            other => Self::InsufficientWords(other.to_string()),
        }
    }
}

/// Reply to a successful `start`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
    pub session_id: String,
    pub token: String,
    pub board_count: usize,
    pub max_guesses: usize,
}

/// Reply to a successful `guess`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessResponse {
    pub valid: bool,
    pub results: Vec<GuessResult>,
    pub solved_count: usize,
    pub total_guesses: usize,
    pub game_over: bool,
}

/// The game engine wired to its collaborators
pub struct GameService<W, S, C = NoTargetCache> {
    words: W,
    sessions: S,
    cache: C,
}

impl<W: WordStore, S: SessionStore> GameService<W, S> {
    /// Service without a daily target cache
    pub const fn new(words: W, sessions: S) -> Self {
        Self {
            words,
            sessions,
            cache: NoTargetCache,
        }
    }
}

impl<W: WordStore, S: SessionStore, C: TargetCache> GameService<W, S, C> {
    /// Reuse daily target sets through `cache`
    pub fn with_target_cache<C2: TargetCache>(self, cache: C2) -> GameService<W, S, C2> {
        GameService {
            words: self.words,
            sessions: self.sessions,
            cache,
        }
    }

    pub const fn words(&self) -> &W {
        &self.words
    }

    /// Start a session in the mode named by `mode` (`daily` or `random`)
    ///
    /// # Errors
    ///
    /// `InvalidMode` for an unknown mode, `InsufficientWords` if the word
    /// store is too small, `Upstream` if a collaborator fails.
    pub fn start(&self, mode: &str) -> Result<StartResponse, GameError> {
        let mode: GameMode = mode.parse()?;
        self.start_at(mode, Utc::now())
    }

    /// Start a session as if the current time were `now`
    ///
    /// # Errors
    ///
    /// Same as [`GameService::start`], minus mode parsing.
    pub fn start_at(&self, mode: GameMode, now: DateTime<Utc>) -> Result<StartResponse, GameError> {
        let (seed, targets) = match mode {
            GameMode::Daily => {
                let seed = daily_seed(now);
                (seed, self.daily_targets(seed, now)?)
            }
            GameMode::Random => {
                let seed = random_seed();
                (seed, resolve_targets(&self.words, seed, BOARD_COUNT)?)
            }
        };

        if targets.len() != BOARD_COUNT {
            return Err(GameError::InsufficientWords(format!(
                "need {BOARD_COUNT} targets, have {}",
                targets.len()
            )));
        }

        let session = Session::new(mode, seed, targets);
        self.sessions
            .put(&session_key(session.token()), &session, session_ttl(mode))?;

        log::info!(
            "started {mode} session {} (seed {seed})",
            session.session_id()
        );

        Ok(StartResponse {
            session_id: session.session_id().to_string(),
            token: session.token().to_string(),
            board_count: BOARD_COUNT,
            max_guesses: MAX_GUESSES,
        })
    }

    /// Submit one guess for the session behind `token`
    ///
    /// Surrounding whitespace is stripped from both the token and the guess,
    /// and the guess is lowercased before it is checked.
    ///
    /// Not transactional: two concurrent guesses on one token both read the
    /// same snapshot and the later write wins, dropping the other's effect.
    ///
    /// # Errors
    ///
    /// In order of checking: `MissingToken`, `SessionNotFound`, `GameOver`,
    /// `InvalidGuess` (format or dictionary), and `Upstream` on store failure.
    pub fn guess(&self, token: Option<&str>, guess: &str) -> Result<GuessResponse, GameError> {
        let (key, mut session) = self.load(token)?;

        if session.is_game_over() {
            return Err(GameError::GameOver);
        }

        let guess = self.validate_guess(guess)?;
        let results = session.record_guess(&guess);

        self.sessions
            .put(&key, &session, session_ttl(session.mode()))?;

        Ok(GuessResponse {
            valid: true,
            results,
            solved_count: session.solved_count(),
            total_guesses: session.total_guesses(),
            game_over: session.is_game_over(),
        })
    }

    /// Reconstructed display state for the session behind `token`
    ///
    /// # Errors
    ///
    /// `MissingToken`, `SessionNotFound`, or `Upstream` on store failure.
    pub fn state(&self, token: Option<&str>) -> Result<GameState, GameError> {
        let (_, session) = self.load(token)?;
        Ok(session.reconstruct())
    }

    fn load(&self, token: Option<&str>) -> Result<(String, Session), GameError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(GameError::MissingToken)?;

        let key = session_key(token);
        let session = self.sessions.get(&key)?.ok_or(GameError::SessionNotFound)?;
        Ok((key, session))
    }

    fn validate_guess(&self, raw: &str) -> Result<Word, GameError> {
        let normalized = raw.trim().to_lowercase();

        if !Word::is_well_formed(&normalized) || !self.words.contains(&normalized)? {
            return Err(GameError::InvalidGuess(normalized));
        }

        Word::new(normalized.as_str()).map_err(|_| GameError::InvalidGuess(normalized))
    }

    /// A cached target set is only reused if it fits the current dictionary
    fn is_usable(&self, targets: &[Word]) -> bool {
        targets.len() == BOARD_COUNT
            && targets.iter().all(|t| match self.words.contains(t.text()) {
                Ok(found) => found,
                Err(e) => {
                    log::warn!("word store lookup failed while checking cached targets: {e}");
                    false
                }
            })
    }

    fn daily_targets(&self, seed: u32, now: DateTime<Utc>) -> Result<Vec<Word>, GameError> {
        match self.cache.get_targets(seed) {
            Ok(Some(targets)) if self.is_usable(&targets) => {
                log::debug!("daily targets for seed {seed} served from cache");
                return Ok(targets);
            }
            Ok(Some(_)) => log::debug!("cached daily targets for seed {seed} rejected"),
            Ok(None) => {}
            Err(e) => log::warn!("daily target cache read failed for seed {seed}: {e}"),
        }

        let targets = resolve_targets(&self.words, seed, BOARD_COUNT)?;

        let ttl = Duration::seconds(seconds_until_midnight_utc(now));
        if let Err(e) = self.cache.put_targets(seed, &targets, ttl) {
            log::warn!("daily target cache write failed for seed {seed}: {e}");
        }

        Ok(targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::wordlists::{WordList, synthetic_words};
    use chrono::TimeZone;
    use std::cell::Cell;

    fn service(words: WordList) -> GameService<WordList, MemoryStore, MemoryStore> {
        GameService::new(words, MemoryStore::new()).with_target_cache(MemoryStore::new())
    }

    fn new_year() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    /// A dictionary word that solves none of the session's boards
    fn miss(words: &WordList, session: &Session) -> String {
        words
            .words()
            .iter()
            .find(|w| !session.targets().contains(w))
            .map(|w| w.text().to_string())
            .unwrap()
    }

    #[test]
    fn start_rejects_unknown_mode() {
        let service = service(synthetic_words(2000));
        let err = service.start("unknown").unwrap_err();

        assert!(matches!(err, GameError::InvalidMode(_)));
        assert_eq!(err.kind(), ErrorKind::Input);
    }

    #[test]
    fn start_returns_ids_and_limits() {
        let service = service(synthetic_words(2000));
        let start = service.start("random").unwrap();

        assert_eq!(start.board_count, 67);
        assert_eq!(start.max_guesses, 73);
        assert_ne!(start.session_id, start.token);

        let state = service.state(Some(&start.token)).unwrap();
        assert_eq!(state.mode, GameMode::Random);
        assert_eq!(state.board_count, BOARD_COUNT);
        assert_eq!(state.total_guesses, 0);
    }

    #[test]
    fn start_fails_on_small_dictionary() {
        let service = service(synthetic_words(20));
        let err = service.start("daily").unwrap_err();

        assert!(matches!(err, GameError::InsufficientWords(_)));
        assert_eq!(err.kind(), ErrorKind::DataSufficiency);
    }

    #[test]
    fn daily_sessions_share_targets() {
        let words = synthetic_words(2000);
        let sessions = MemoryStore::new();
        let service = GameService::new(&words, &sessions);

        let a = service.start_at(GameMode::Daily, new_year()).unwrap();
        let b = service
            .start_at(GameMode::Daily, new_year() + Duration::hours(10))
            .unwrap();

        let a = sessions.get(&session_key(&a.token)).unwrap().unwrap();
        let b = sessions.get(&session_key(&b.token)).unwrap().unwrap();

        assert_eq!(a.seed(), 20_240_101);
        assert_eq!(a.targets(), b.targets());
        assert_ne!(a.token(), b.token());
    }

    #[test]
    fn daily_targets_are_cached_for_the_day() {
        let words = synthetic_words(2000);
        let sessions = MemoryStore::new();
        let cache = MemoryStore::new();
        let service = GameService::new(&words, &sessions).with_target_cache(&cache);

        assert!(cache.get_targets(20_240_101).unwrap().is_none());
        let start = service.start_at(GameMode::Daily, new_year()).unwrap();

        let cached = cache.get_targets(20_240_101).unwrap().unwrap();
        let session = sessions.get(&session_key(&start.token)).unwrap().unwrap();
        assert_eq!(cached, session.targets());
    }

    #[test]
    fn cached_targets_from_another_word_list_are_replaced() {
        let sessions = MemoryStore::new();
        let cache = MemoryStore::new();
        let small = synthetic_words(200);
        let other = WordList::from_strings(
            synthetic_words(2000).words()[1000..]
                .iter()
                .map(Word::text),
        );

        GameService::new(&small, &sessions)
            .with_target_cache(&cache)
            .start_at(GameMode::Daily, new_year())
            .unwrap();

        let service = GameService::new(&other, &sessions).with_target_cache(&cache);
        let start = service.start_at(GameMode::Daily, new_year()).unwrap();
        let session = sessions.get(&session_key(&start.token)).unwrap().unwrap();

        assert!(session.targets().iter().all(|t| other.contains_word(t.text())));
        assert_eq!(cache.get_targets(20_240_101).unwrap().unwrap(), session.targets());

        let target = session.targets()[0].text().to_string();
        let response = service.guess(Some(&start.token), &target).unwrap();
        assert!(response.results[0].solved);
    }

    #[test]
    fn short_cached_target_set_is_a_miss() {
        let words = synthetic_words(2000);
        let sessions = MemoryStore::new();
        let cache = MemoryStore::new();
        cache
            .put_targets(20_240_101, &words.words()[..3], Duration::hours(1))
            .unwrap();

        let service = GameService::new(&words, &sessions).with_target_cache(&cache);
        let start = service.start_at(GameMode::Daily, new_year()).unwrap();
        let session = sessions.get(&session_key(&start.token)).unwrap().unwrap();

        assert_eq!(session.targets().len(), BOARD_COUNT);
    }

    #[test]
    fn cache_failures_do_not_block_start() {
        struct BrokenCache(Cell<usize>);

        impl TargetCache for BrokenCache {
            fn get_targets(&self, _seed: u32) -> Result<Option<Vec<Word>>, StoreError> {
                self.0.set(self.0.get() + 1);
                Err(StoreError::Unavailable("cache down".to_string()))
            }

            fn put_targets(&self, _: u32, _: &[Word], _: Duration) -> Result<(), StoreError> {
                self.0.set(self.0.get() + 1);
                Err(StoreError::Unavailable("cache down".to_string()))
            }
        }

        let cache = BrokenCache(Cell::new(0));
        let service =
            GameService::new(synthetic_words(2000), MemoryStore::new()).with_target_cache(&cache);

        assert!(service.start_at(GameMode::Daily, new_year()).is_ok());
        assert_eq!(cache.0.get(), 2);
    }

    #[test]
    fn guess_requires_token() {
        let service = service(synthetic_words(2000));

        for token in [None, Some(""), Some("   ")] {
            let err = service.guess(token, "aaaaa").unwrap_err();
            assert!(matches!(err, GameError::MissingToken));
            assert_eq!(err.kind(), ErrorKind::Auth);
        }
        assert!(matches!(service.state(None), Err(GameError::MissingToken)));
    }

    #[test]
    fn unknown_token_is_not_found() {
        let service = service(synthetic_words(2000));

        assert!(matches!(
            service.guess(Some("nope"), "aaaaa"),
            Err(GameError::SessionNotFound)
        ));
        assert!(matches!(
            service.state(Some("nope")),
            Err(GameError::SessionNotFound)
        ));
    }

    #[test]
    fn invalid_guesses_leave_session_untouched() {
        let service = service(synthetic_words(2000));
        let start = service.start("random").unwrap();
        let token = Some(start.token.as_str());

        for bad in ["abc", "toolong", "ab1de", "zzzzz"] {
            let err = service.guess(token, bad).unwrap_err();
            assert!(matches!(err, GameError::InvalidGuess(_)), "{bad}");
            assert_eq!(err.kind(), ErrorKind::Input);
        }

        assert_eq!(service.state(token).unwrap().total_guesses, 0);
    }

    #[test]
    fn guess_is_normalized_before_lookup() {
        let service = service(synthetic_words(2000));
        let start = service.start("random").unwrap();

        let response = service.guess(Some(&start.token), "  AAAAB ").unwrap();
        assert!(response.valid);
        assert_eq!(response.total_guesses, 1);

        let state = service.state(Some(&start.token)).unwrap();
        assert_eq!(state.guesses[0].text(), "aaaab");
    }

    #[test]
    fn guess_reports_per_board_results() {
        let words = synthetic_words(2000);
        let sessions = MemoryStore::new();
        let service = GameService::new(&words, &sessions);
        let start = service.start("random").unwrap();

        let session = sessions.get(&session_key(&start.token)).unwrap().unwrap();
        let first_target = session.targets()[0].text().to_string();

        let response = service.guess(Some(&start.token), &first_target).unwrap();
        assert_eq!(response.results.len(), BOARD_COUNT);
        assert!(response.results[0].solved);
        assert!(response.solved_count >= 1);
        assert!(!response.game_over);

        let again = service.guess(Some(&start.token), &first_target).unwrap();
        assert!(again.results.iter().all(|r| r.board_index != 0));
        assert_eq!(again.total_guesses, 2);
    }

    #[test]
    fn finished_game_rejects_guesses() {
        let words = synthetic_words(2000);
        let sessions = MemoryStore::new();
        let service = GameService::new(&words, &sessions);
        let start = service.start("random").unwrap();
        let token = Some(start.token.as_str());

        let session = sessions.get(&session_key(&start.token)).unwrap().unwrap();
        let filler = miss(&words, &session);

        let mut last = None;
        for _ in 0..MAX_GUESSES {
            last = Some(service.guess(token, &filler).unwrap());
        }
        let last = last.unwrap();
        assert!(last.game_over);
        assert_eq!(last.total_guesses, MAX_GUESSES);

        let err = service.guess(token, &filler).unwrap_err();
        assert!(matches!(err, GameError::GameOver));
        assert_eq!(err.kind(), ErrorKind::StateConflict);

        // Terminal check runs before guess validation
        assert!(matches!(service.guess(token, "!!"), Err(GameError::GameOver)));
        assert_eq!(service.state(token).unwrap().total_guesses, MAX_GUESSES);
    }

    #[test]
    fn state_matches_guess_responses() {
        let words = synthetic_words(2000);
        let sessions = MemoryStore::new();
        let service = GameService::new(&words, &sessions);
        let start = service.start("random").unwrap();
        let token = Some(start.token.as_str());

        let session = sessions.get(&session_key(&start.token)).unwrap().unwrap();
        let plays = [
            session.targets()[3].text().to_string(),
            "aaaaa".to_string(),
            session.targets()[10].text().to_string(),
        ];

        let mut rows = vec![Vec::new(); BOARD_COUNT];
        for play in &plays {
            let response = service.guess(token, play).unwrap();
            for result in response.results {
                rows[result.board_index].push(result.states);
            }
        }

        let state = service.state(token).unwrap();
        for board in &state.boards {
            assert_eq!(board.guess_results, rows[board.board_index]);
        }
        assert!(state.boards[3].solved);
        assert!(state.boards[10].solved);
    }

    #[test]
    fn store_outage_is_upstream_error() {
        struct DownStore;

        impl SessionStore for DownStore {
            fn get(&self, _key: &str) -> Result<Option<Session>, StoreError> {
                Err(StoreError::Unavailable("down".to_string()))
            }

            fn put(&self, _: &str, _: &Session, _: Duration) -> Result<(), StoreError> {
                Err(StoreError::Unavailable("down".to_string()))
            }
        }

        let service = GameService::new(synthetic_words(2000), DownStore);

        let err = service.start("random").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Upstream);

        let err = service.state(Some("tok")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Upstream);
    }

    #[test]
    fn error_messages_match_wire_strings() {
        assert_eq!(GameError::MissingToken.to_string(), "Missing token");
        assert_eq!(GameError::SessionNotFound.to_string(), "Session not found");
        assert_eq!(GameError::GameOver.to_string(), "Game over");
        assert_eq!(
            GameError::InvalidGuess("x".to_string()).to_string(),
            "Invalid guess"
        );
    }

    #[test]
    fn responses_serialize_camel_case() {
        let service = service(synthetic_words(2000));
        let start = service.start("random").unwrap();

        let json = serde_json::to_value(&start).unwrap();
        assert!(json.get("sessionId").is_some());
        assert_eq!(json["boardCount"], 67);
        assert_eq!(json["maxGuesses"], 73);

        let response = service.guess(Some(&start.token), "aaaaa").unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["valid"], true);
        assert_eq!(json["totalGuesses"], 1);
        assert!(json.get("solvedCount").is_some());
        assert!(json.get("gameOver").is_some());
    }
}
