pub mod config;
pub mod coords;
pub mod direction;
pub mod display;
pub mod engine;
pub mod events;
pub mod grid;
pub mod level;
pub mod lexer;
pub mod policy;
pub mod session;
pub mod sprites;
pub mod tile;
pub mod token;

// Re-exports for convenience in tests and integration users.
pub use config::{GameConfig, PolicyConfig, TileSymbols};
pub use coords::TileCoord;
pub use direction::Direction;
pub use display::{FlagWatch, format_facings, format_grid, format_lex_error, format_status, format_tokens};
pub use engine::{CycleSummary, Engine};
pub use events::{Event, EventSink, NullSink, Request};
pub use grid::{Grid, GridIndexError};
pub use level::{InvalidLayoutError, Level, LevelLoadError};
pub use lexer::{LexError, ScriptError, tokenize, tokenize_file};
pub use policy::{IdlePolicy, TilePolicy, WanderPolicy};
pub use session::{Session, SessionError};
pub use tile::{TileAction, TileData, TileType};
pub use token::{Token, TokenKind, Value};
