pub mod discovery;
mod store;

pub use store::{HistoryStore, LoadError};
