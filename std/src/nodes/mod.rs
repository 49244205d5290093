pub mod debug;
pub mod flow;
pub mod lambda;
pub mod logic;
pub mod path;
