pub mod ad;
pub mod campaign;
