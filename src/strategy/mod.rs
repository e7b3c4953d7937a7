pub mod equilibrium;
pub mod implementations;
pub mod traits;
