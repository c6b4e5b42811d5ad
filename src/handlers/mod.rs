pub mod locations;
pub mod pokemon;
