//! Wire shapes used only by the integration-test harness: how a test file names the players to
//! run (well-behaved or deliberately broken) and how the referee's final result is reported back.

use common::json::JsonState;
use common::name::Name;
use players::bad_player::BadFM;
use players::strategy::NaiveStrategy;
use serde::{Deserialize, Serialize};

use crate::referee::GameResult;

/// A well-behaved player spec: a name and which brute-force strategy to run.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct PS(Name, JsonStrategy);

impl From<PS> for (Name, NaiveStrategy) {
    fn from(ps: PS) -> Self {
        (ps.0, ps.1.into())
    }
}

/// A player spec that misbehaves on one call by erroring immediately.
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct BadPS(Name, JsonStrategy, BadFM);

impl From<BadPS> for (Name, NaiveStrategy, BadFM) {
    fn from(bad_ps: BadPS) -> Self {
        (bad_ps.0, bad_ps.1.into(), bad_ps.2)
    }
}

/// A player spec that misbehaves on one call by looping, with a bound in milliseconds on how long
/// it loops for before giving up on its own (so a misbehaving test double never outlives the test
/// that spawned it, even if nothing else cancels it).
#[derive(Debug, Deserialize, PartialEq, Eq)]
pub struct BadPS2(Name, JsonStrategy, BadFM, u64);

impl From<BadPS2> for (Name, NaiveStrategy, BadFM, u64) {
    fn from(bad_ps2: BadPS2) -> Self {
        (bad_ps2.0, bad_ps2.1.into(), bad_ps2.2, bad_ps2.3)
    }
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PlayerSpec {
    BadPS2(BadPS2),
    BadPS(BadPS),
    PS(PS),
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
pub enum JsonStrategy {
    Riemann,
    Euclid,
}

impl From<JsonStrategy> for NaiveStrategy {
    fn from(jss: JsonStrategy) -> Self {
        match jss {
            JsonStrategy::Riemann => NaiveStrategy::Riemann,
            JsonStrategy::Euclid => NaiveStrategy::Euclid,
        }
    }
}

/// Re-exported so test harnesses can build a [`common::state::RedactedState`] straight off a
/// literal JSON fixture; the wire shape itself lives in `common::json` since the server and the
/// players use it too.
pub type JsonRefereeState = JsonState;

/// The wire report of a finished game: winner names, then kicked names, in the order the referee
/// produced them.
#[derive(Debug, Serialize)]
pub struct JsonGameResult(Vec<Name>, Vec<Name>);

impl From<GameResult> for JsonGameResult {
    fn from(result: GameResult) -> Self {
        JsonGameResult(result.winners, result.kicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ps_parses_a_name_and_strategy_pair() {
        let ps: PS = serde_json::from_str(r#"["bob", "Riemann"]"#).unwrap();
        assert_eq!(ps, PS(Name::new("bob").unwrap(), JsonStrategy::Riemann));
    }

    #[test]
    fn bad_ps_parses_a_name_strategy_and_bad_call() {
        let bad_ps: BadPS = serde_json::from_str(r#"["bob", "Euclid", "takeTurn"]"#).unwrap();
        assert_eq!(bad_ps, BadPS(Name::new("bob").unwrap(), JsonStrategy::Euclid, BadFM::TakeTurn));
    }

    #[test]
    fn player_spec_prefers_the_longest_matching_shape() {
        let spec: PlayerSpec = serde_json::from_str(r#"["bob", "Euclid"]"#).unwrap();
        assert_eq!(spec, PlayerSpec::PS(PS(Name::new("bob").unwrap(), JsonStrategy::Euclid)));

        let spec: PlayerSpec = serde_json::from_str(r#"["bob", "Euclid", "win", 2]"#).unwrap();
        assert_eq!(
            spec,
            PlayerSpec::BadPS2(BadPS2(Name::new("bob").unwrap(), JsonStrategy::Euclid, BadFM::Win, 2))
        );
    }

    #[test]
    fn game_result_reports_winners_then_kicked() {
        let result = GameResult {
            winners: vec![Name::new("alice").unwrap()],
            kicked: vec![Name::new("bob").unwrap()],
        };
        let json = serde_json::to_string(&JsonGameResult::from(result)).unwrap();
        assert_eq!(json, r#"[["alice"],["bob"]]"#);
    }
}
