// Domain layer: scan models, ports, and the pure barcode/report services.

pub mod model;
pub mod ports;

pub mod services;
