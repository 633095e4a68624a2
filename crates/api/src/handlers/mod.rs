pub mod admin;
pub mod auth;
pub mod catalog;
pub mod deck_cards;
pub mod decks;
