use crate::cmd::get::Get;
use crate::cmd::hgetall::HGetAll;
use crate::cmd::hset::HSet;
use crate::cmd::set::Set;
use crate::cmd::unknown::Unknown;
use crate::connection::connect::Connection;
use crate::connection::frame::Frame;
use crate::connection::parse::Parse;
use crate::error::{StoreConnectionError, StoreParseError};
use crate::storage::db::Db;

pub mod get;
pub mod hgetall;
pub mod hset;
pub mod set;
pub mod unknown;

/// Enumeration of supported commands.
///
/// Methods called on `Command` are delegated to the command implementation.
#[derive(Debug)]
pub enum Command {
    Get(Get),
    Set(Set),
    HSet(HSet),
    HGetAll(HGetAll),
    Unknown(Unknown),
}

impl Command {
    /// Parse a command from a received frame.
    ///
    /// The `Frame` must be the array variant. Names are matched case
    /// insensitively; anything unsupported becomes `Command::Unknown`.
    pub(crate) fn from_frame(frame: Frame) -> Result<Command, StoreParseError> {
        let mut parse = Parse::new(frame)?;

        let command_name = parse.next_string()?.to_lowercase();

        let command = match &command_name[..] {
            "get" => Command::Get(Get::parse_frames(&mut parse)?),
            "set" => Command::Set(Set::parse_frames(&mut parse)?),
            "hset" => Command::HSet(HSet::parse_frames(&mut parse)?),
            "hgetall" => Command::HGetAll(HGetAll::parse_frames(&mut parse)?),
            // The remaining arguments are ignored, so `finish` is skipped.
            _ => return Ok(Command::Unknown(Unknown::new(command_name))),
        };

        // Trailing arguments are a protocol error.
        parse.finish()?;

        Ok(command)
    }

    /// Apply the command to the specified `Db` instance.
    ///
    /// The response is written to `dst`.
    pub(crate) async fn apply(self, db: &Db, dst: &mut Connection) -> Result<(), StoreConnectionError> {
        match self {
            Command::Get(cmd) => cmd.apply(db, dst).await,
            Command::Set(cmd) => cmd.apply(db, dst).await,
            Command::HSet(cmd) => cmd.apply(db, dst).await,
            Command::HGetAll(cmd) => cmd.apply(db, dst).await,
            Command::Unknown(cmd) => cmd.apply(dst).await,
        }
    }

    /// Returns the command name
    pub(crate) fn get_name(&self) -> &str {
        match self {
            Command::Get(_) => "get",
            Command::Set(_) => "set",
            Command::HSet(_) => "hset",
            Command::HGetAll(_) => "hgetall",
            Command::Unknown(cmd) => cmd.get_name(),
        }
    }
}
