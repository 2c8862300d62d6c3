//! One-shot messages carried across a redirect in the cookie session.

use poem::session::Session;
use serde::{Deserialize, Serialize};

const FLASH_KEY: &str = "_flashes";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub category: String,
    pub message: String,
}

pub fn flash(session: &Session, category: &str, message: impl Into<String>) {
    let mut flashes: Vec<Flash> = session.get(FLASH_KEY).unwrap_or_default();
    flashes.push(Flash {
        category: category.to_string(),
        message: message.into(),
    });
    session.set(FLASH_KEY, flashes);
}

/// Returns the pending messages and forgets them.
pub fn take_flashes(session: &Session) -> Vec<Flash> {
    let flashes: Vec<Flash> = session.get(FLASH_KEY).unwrap_or_default();
    if !flashes.is_empty() {
        session.remove(FLASH_KEY);
    }
    flashes
}
