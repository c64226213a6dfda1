// Utils compartidos

pub mod constants;
pub mod storage;
pub mod validation;

pub use constants::*;
pub use storage::{BrowserStorage, KeyValueStorage, MemoryStorage};
pub use validation::{FieldErrors, Validator};
