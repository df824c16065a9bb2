pub mod panic;
