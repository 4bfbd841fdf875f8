pub mod home;
pub mod markets;
