pub mod migrate;
pub mod superadmin;
