pub mod amount;
pub mod babel;
pub mod codec;
pub mod data;
pub mod ergo;
pub mod interpreter;
