pub mod sample_arrays;
