pub mod db;
pub mod scratchpad;

pub use scratchpad::{MemoryScratchpad, Scratchpad, SqliteScratchpad};
