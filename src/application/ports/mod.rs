mod completion_client;
mod file_loader;
mod session_observer;

pub use completion_client::{CompletionClient, CompletionError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use session_observer::{NoopObserver, SessionObserver};
