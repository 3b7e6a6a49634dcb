pub mod check;
pub mod phases;
pub mod replay;
