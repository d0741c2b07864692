pub mod board;
pub mod diagram;
pub mod error;
pub mod move_gen;
pub mod perft;
pub mod position;
pub mod rules;
pub mod session;
pub mod types;

pub use board::*;
pub use diagram::{piece_from_char, piece_to_char};
pub use error::{DiagramError, ParseError, Rejected};
pub use move_gen::*;
pub use perft::{perft, perft_detailed, perft_divide, PerftResults};
pub use position::{continuation_after, Position};
pub use session::{Session, SessionState};
pub use types::*;
