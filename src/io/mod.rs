//! I/O utilities for the chatbot.
//!
//! File reading, seed data loading, the turn transcript, and Unicode helpers.

pub mod reader;
pub mod seed;
pub mod transcript;
pub mod unicode;

pub use reader::read_file;
pub use seed::{SeedPair, load_seed_file, parse_json, parse_lines, seed_storage, seed_table};
pub use transcript::Transcript;
pub use unicode::{find_char_boundary, graphemes, truncate_bytes};
