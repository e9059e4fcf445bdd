//! Session state for the stateful tools.
//!
//! A `Session` owns everything the tools mutate between actions: the ATM
//! balance, the running guessing game, the login table and the random
//! source. It lives for one run of the program and is never persisted.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::SessionConfig;
use crate::tools::guess::GuessGame;

/// Source of uniform random draws for the games.
pub trait RandomSource {
    /// Draw one value uniformly from `range` (both ends included).
    fn draw(&mut self, range: RangeInclusive<u32>) -> u32;
}

/// `RandomSource` backed by `rand`'s standard generator.
pub struct StdRandom(StdRng);

impl StdRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    pub fn from_os() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl RandomSource for StdRandom {
    fn draw(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.0.random_range(range)
    }
}

pub struct Session {
    id: String,
    created_at: String,
    atm_balance: u64,
    guess: Option<GuessGame>,
    accounts: BTreeMap<String, String>,
    rng: Box<dyn RandomSource>,
}

impl Session {
    /// New session seeded from `settings.seed`, or from the OS.
    pub fn new(settings: &SessionConfig) -> Self {
        let rng: Box<dyn RandomSource> = match settings.seed {
            Some(seed) => Box::new(StdRandom::from_seed(seed)),
            None => Box::new(StdRandom::from_os()),
        };
        Self::with_random(settings, rng)
    }

    pub fn with_random(settings: &SessionConfig, rng: Box<dyn RandomSource>) -> Self {
        let session = Self {
            id: generate_session_id(),
            created_at: now_timestamp(),
            atm_balance: settings.atm_opening_balance,
            guess: None,
            accounts: settings.accounts.clone(),
            rng,
        };
        info!(
            session = %session.id,
            balance = session.atm_balance,
            seeded = settings.seed.is_some(),
            "session created"
        );
        session
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn atm_balance(&self) -> u64 {
        self.atm_balance
    }

    /// Take `amount` off the balance. Returns the new balance, or `None`
    /// (balance untouched) when the balance does not cover it.
    pub fn debit(&mut self, amount: u64) -> Option<u64> {
        let remaining = self.atm_balance.checked_sub(amount)?;
        self.atm_balance = remaining;
        Some(remaining)
    }

    pub fn random(&mut self) -> &mut dyn RandomSource {
        self.rng.as_mut()
    }

    pub fn guess_game(&self) -> Option<&GuessGame> {
        self.guess.as_ref()
    }

    pub fn guess_game_mut(&mut self) -> Option<&mut GuessGame> {
        self.guess.as_mut()
    }

    /// Replace any running game with a fresh one.
    pub fn set_guess_game(&mut self, game: GuessGame) {
        self.guess = Some(game);
    }

    /// Exact match on both username and password.
    pub fn check_credentials(&self, username: &str, password: &str) -> bool {
        self.accounts
            .get(username)
            .is_some_and(|expected| expected == password)
    }

    /// `(username, password)` pairs, for the demo-account hint.
    pub fn accounts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.accounts
            .iter()
            .map(|(user, pass)| (user.as_str(), pass.as_str()))
    }
}

pub fn generate_session_id() -> String {
    uuid::Uuid::new_v4().to_string()[..8].to_string()
}

pub fn now_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_session_id() {
        let id = generate_session_id();
        assert_eq!(id.len(), 8);
    }

    #[test]
    fn test_debit_never_goes_negative() {
        let mut session = testing::session([]);
        assert_eq!(session.atm_balance(), 10_000);
        assert_eq!(session.debit(700), Some(9_300));
        assert_eq!(session.debit(9_400), None);
        assert_eq!(session.atm_balance(), 9_300);
        assert_eq!(session.debit(9_300), Some(0));
        assert_eq!(session.debit(100), None);
        assert_eq!(session.atm_balance(), 0);
    }

    #[test]
    fn test_credentials_are_exact() {
        let session = testing::session([]);
        assert!(session.check_credentials("admin", "password123"));
        assert!(!session.check_credentials("admin", "password123 "));
        assert!(!session.check_credentials("Admin", "password123"));
        assert!(!session.check_credentials("nouser", "x"));
        assert_eq!(session.accounts().count(), 3);
    }

    #[test]
    fn test_seeded_sources_repeat() {
        let mut a = StdRandom::from_seed(42);
        let mut b = StdRandom::from_seed(42);
        for _ in 0..20 {
            let x = a.draw(1..=100);
            assert!((1..=100).contains(&x));
            assert_eq!(x, b.draw(1..=100));
        }
    }

    #[test]
    fn test_independent_sessions() {
        let mut first = testing::session([]);
        let second = testing::session([]);
        first.debit(1_000);
        assert_eq!(first.atm_balance(), 9_000);
        assert_eq!(second.atm_balance(), 10_000);
        assert_ne!(first.id(), second.id());
    }
}
