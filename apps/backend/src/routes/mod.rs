pub mod decks;
pub mod items;
pub mod sessions;
pub mod study;
