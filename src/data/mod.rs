pub mod colors;
pub mod dta;
pub mod experiment;
pub mod export;
pub mod figure;
pub mod plot;
pub mod session;
pub mod trace;
pub mod transform;
