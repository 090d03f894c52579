pub mod contact_service;
pub mod mail;
