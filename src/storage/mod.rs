pub(crate) mod db;
pub(crate) mod store;
pub(crate) mod traits;
