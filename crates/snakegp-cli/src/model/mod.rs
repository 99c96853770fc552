pub mod trained_program;
