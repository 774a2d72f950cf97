pub mod companies;
pub mod predictions;
pub mod stocks;
pub mod system;
