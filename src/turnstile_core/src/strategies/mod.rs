pub mod validation_step;
