pub mod client;
pub mod form;

pub use client::HTTP_CLIENT;
