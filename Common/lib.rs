//! # Library Layout
//!
//! ## State
//! Contains [`state::State`], the referee's mutable view of a game in progress, and
//! [`state::RedactedState`], the subset of it ever sent to a player.
//!
//! ## Board / Grid / Tile / Shape / Direction
//! [`board::Board`] is the playing surface, backed by a runtime-sized [`grid::Grid`] of
//! [`tile::Tile`]s. A tile's connectivity is a [`shape::ConnectorShape`], described in terms of
//! the four [`direction::Direction`]s, which also describe slides.
//!
//! ## Gem / Color
//! [`gem::Gem`] enumerates the treasure images a tile can carry; [`color::Color`] is a player's
//! display color, either one of a closed named palette or an arbitrary hex code.
//!
//! ## Name
//! [`name::Name`] is a validated player handle, constructed once at the signup boundary.
//!
//! ## Json
//! [`json`] holds the wire-format types and their conversions to and from the model, used by
//! both the remote proxies and the referee's broadcast logic.

/// Contains all the types needed for the Board and mutating it.
pub mod board;
/// Contains the types needed to represent player display colors.
pub mod color;
/// Contains the `Direction` enum shared by tile connectivity and slides.
pub mod direction;
/// Error types shared across the Common crate.
pub mod error;
/// Contains the enum including all the possible Gems.
pub mod gem;
/// Contains the `Grid` type that backs a `Board`.
pub mod grid;
/// Contains all the utilities for serializing and deserializing to/from JSON.
pub mod json;
/// A validated player handle.
pub mod name;
/// Player identity and goal-progress records.
pub mod player_details;
/// Contains the `Position` type used to index a `Grid`.
pub mod position;
/// Contains `ConnectorShape` and `PathOrientation`, describing a tile's connectivity.
pub mod shape;
/// Contains the `State` and `RedactedState` types.
pub mod state;
/// Contains the `Tile` type for use in a `Board`.
pub mod tile;
