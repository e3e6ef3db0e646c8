pub mod cartoons;
pub mod health;
