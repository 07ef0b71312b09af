use log::debug;

use crate::connection::connect::Connection;
use crate::connection::frame::Frame;
use crate::error::StoreConnectionError;

/// Represents a command the store does not implement.
#[derive(Debug)]
pub struct Unknown {
    command_name: String,
}

impl Unknown {
    pub(crate) fn new(key: impl ToString) -> Unknown {
        Unknown {
            command_name: key.to_string(),
        }
    }

    pub(crate) fn get_name(&self) -> &str {
        &self.command_name
    }

    /// Responds to the client, indicating the command is not recognized.
    pub(crate) async fn apply(self, dst: &mut Connection) -> Result<(), StoreConnectionError> {
        let response = Frame::Error(format!("ERR unknown command '{}'", self.command_name));

        debug!("apply unknown command resp: {:?}", response);

        dst.write_frame(&response).await
    }
}
