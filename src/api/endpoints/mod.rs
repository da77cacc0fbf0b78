pub mod consult;
pub mod health;
pub mod suggestions;
