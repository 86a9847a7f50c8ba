/// Contains the Observer trait and a logging implementation.
pub mod observer;

/// Contains all the data types and functionalities used for interfacing with Players and handling timeouts
pub mod player;

/// Contains the `Referee` implementation
pub mod referee;

/// Contains a `Config` struct that defines how a Referee should run the game.
pub mod config;

/// Contains all the JSON definitions needed for the Referee integration tests.
pub mod json;

/// Contains the error types a `Referee` can return.
pub mod error;
