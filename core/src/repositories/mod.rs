pub mod revocation;

pub use revocation::RevocationStore;
