use clap::Subcommand;

/// Commands accepted by `store-cli`.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get the value of key.
    Get {
        /// Name of key to get
        key: String,
    },
    /// Set key to hold the string value.
    Set {
        /// Name of key to set
        key: String,

        /// Value to set.
        value: String,
    },
    /// Set a field of the hash stored at key.
    Hset {
        /// Name of the hash
        key: String,

        /// Field to set
        field: String,

        /// Value of the field
        value: String,
    },
    /// Get every field and value of the hash stored at key.
    Hgetall {
        /// Name of the hash
        key: String,
    },
}
