// Domain layer: CPF rules, models and ports. No I/O here.

pub mod cpf;
pub mod model;
pub mod ports;
