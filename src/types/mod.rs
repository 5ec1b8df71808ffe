//! Telegram object model
//!
//! Response objects tolerate unknown fields so that additions to the Bot API
//! do not break decoding. Request-side objects serialize only the fields
//! that were set.

pub mod chat;
pub mod commands;
pub mod field;
pub mod games;
pub mod ids;
pub mod inline;
pub mod input_file;
pub mod markup;
pub mod media;
pub mod message;
pub mod payments;
pub mod response;
pub mod sticker;
pub mod update;
pub mod user;

pub use chat::*;
pub use commands::*;
pub use field::Field;
pub use games::*;
pub use ids::*;
pub use inline::*;
pub use input_file::*;
pub use markup::*;
pub use media::*;
pub use message::*;
pub use payments::*;
pub use response::*;
pub use sticker::*;
pub use update::*;
pub use user::*;
