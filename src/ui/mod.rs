// Console drivers for the RSA and password demos

pub mod app;
pub mod password_demo;
pub mod rsa_demo;

pub use app::{create_app, Demo};
