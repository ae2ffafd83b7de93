
mod memory_tests;
