//! Kind-specific movement strategies

mod amoeba;
mod antibody;
mod bacterium;
mod ciliate;
mod flagellate;
mod muscle;
mod pathogen;

pub use amoeba::AmoebaBehavior;
pub use antibody::{select_target, AntibodyBehavior};
pub use bacterium::BacteriumBehavior;
pub use ciliate::CiliateBehavior;
pub use flagellate::FlagellateBehavior;
pub use muscle::MuscleBehavior;
pub use pathogen::PathogenBehavior;
