//! Business services

pub mod midtrans;
pub mod ordering;
pub mod qrcode;
