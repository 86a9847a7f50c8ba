/// Contains implementations of players that misbehave
pub mod bad_player;
/// Contains data definitions for serializing to and from JSON
pub mod json;
/// Contains the structs for constructin players
pub mod player;
/// Contains the trait definition for strategies the players can use
pub mod strategy;
