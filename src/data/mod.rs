//! Record store behind the admin screens

mod memory;
mod seed;
mod traits;

pub use memory::InMemoryData;
#[cfg(test)]
pub use seed::demo_records;
pub use traits::SaccoData;
#[cfg(test)]
pub use traits::MockSaccoData;
