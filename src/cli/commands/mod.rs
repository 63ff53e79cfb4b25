pub mod create;
pub mod fetch;
pub mod keygen;
pub mod serve;
