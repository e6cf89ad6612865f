pub mod cultivator;
