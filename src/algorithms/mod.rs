/// Module containing particle swarm optimizers.
pub mod particles;
