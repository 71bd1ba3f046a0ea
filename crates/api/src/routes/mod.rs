pub mod predictions;
