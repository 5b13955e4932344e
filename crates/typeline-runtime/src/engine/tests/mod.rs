//! Test modules for the evaluation engine

#[cfg(test)]
mod operators_test;
