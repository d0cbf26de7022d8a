pub mod dto;
pub mod topics;
