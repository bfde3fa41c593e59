pub mod audit;
pub mod gate;
