pub mod barcode;
pub mod detection;
pub mod gs1;
pub mod history;
pub mod status;
