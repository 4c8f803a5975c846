pub mod bet;
pub mod card;
pub mod feed;
