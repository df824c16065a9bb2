pub mod prompt;
pub mod roaster;

pub use roaster::Roaster;
