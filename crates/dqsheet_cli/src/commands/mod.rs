pub mod compile;
pub mod run;
pub mod validate;
