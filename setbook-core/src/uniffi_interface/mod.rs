//! Bindings for a native app. The host owns navigation and the current draft;
//! these exports only transform drafts and talk to the store.

pub mod errors;
pub mod logging;
pub mod objects;
pub mod session;
