pub mod construction;
pub mod perturbation;
